// src/ops/mod.rs
// Domain groups contributing operations to the registry

pub mod arithmetic;
pub mod combinatorics;
pub mod complex;
pub mod conversion;
pub mod financial;
pub mod geometry;
pub mod logarithm;
pub mod matrix;
pub mod number_theory;
pub mod numerical;
pub mod roots;
pub mod statistics;
pub mod trigonometry;

use crate::registry::OperationDescriptor;

/// Names of every built-in group, in registration order
pub const GROUPS: &[&str] = &[
    arithmetic::GROUP,
    roots::GROUP,
    trigonometry::GROUP,
    logarithm::GROUP,
    statistics::GROUP,
    combinatorics::GROUP,
    number_theory::GROUP,
    complex::GROUP,
    matrix::GROUP,
    numerical::GROUP,
    financial::GROUP,
    conversion::GROUP,
    geometry::GROUP,
];

/// Every built-in group with its operations
pub fn all_groups() -> Vec<(&'static str, Vec<OperationDescriptor>)> {
    vec![
        (arithmetic::GROUP, arithmetic::operations()),
        (roots::GROUP, roots::operations()),
        (trigonometry::GROUP, trigonometry::operations()),
        (logarithm::GROUP, logarithm::operations()),
        (statistics::GROUP, statistics::operations()),
        (combinatorics::GROUP, combinatorics::operations()),
        (number_theory::GROUP, number_theory::operations()),
        (complex::GROUP, complex::operations()),
        (matrix::GROUP, matrix::operations()),
        (numerical::GROUP, numerical::operations()),
        (financial::GROUP, financial::operations()),
        (conversion::GROUP, conversion::operations()),
        (geometry::GROUP, geometry::operations()),
    ]
}

/// Names of every built-in operation, for config validation
pub fn all_operation_names() -> Vec<&'static str> {
    all_groups()
        .into_iter()
        .flat_map(|(_, ops)| ops.into_iter().map(|op| op.name))
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::error::Result;
    use crate::registry::{OperationDescriptor, validate};
    use crate::response::Response;
    use serde_json::Value;

    /// Validate `raw` against the named descriptor and run its handler
    pub fn call(ops: Vec<OperationDescriptor>, name: &str, raw: Value) -> Result<Response> {
        let desc = ops.into_iter().find(|d| d.name == name).unwrap();
        let args = validate(&desc.params, raw.as_object().unwrap()).unwrap();
        (desc.handler)(&args)
    }

    /// Number following the last `= ` in a response text
    pub fn value(text: &str) -> f64 {
        let tail = text.rsplit("= ").next().unwrap();
        let end = tail
            .find(|c: char| !(c.is_ascii_digit() || "+-.eE".contains(c)))
            .unwrap_or(tail.len());
        tail[..end].parse().unwrap()
    }
}
