// src/registry/validate.rs
// Generic argument validator and the typed view handlers read from

use super::schema::{ParamKind, ParameterSpec};
use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::str::FromStr;

type Checked<T> = std::result::Result<T, ValidationError>;

/// Validate raw arguments against an ordered parameter list.
///
/// Stops at the first violation in declaration order. Absent parameters
/// with a default receive it and unknown keys are dropped. Integers are normalized to i64 so that `5.0` reads back as `5`.
pub fn validate(params: &[ParameterSpec], raw: &Map<String, Value>) -> Checked<Args> {
    let mut values = Map::new();

    for spec in params {
        match raw.get(spec.name) {
            None | Some(Value::Null) => {
                let default = spec
                    .default
                    .as_ref()
                    .ok_or_else(|| ValidationError::missing(spec.name))?;
                values.insert(spec.name.to_string(), default.clone());
            }
            Some(value) => {
                let normalized = check_kind(spec.name, &spec.kind, value)?;
                check_constraints(spec, &normalized)?;
                values.insert(spec.name.to_string(), normalized);
            }
        }
    }

    Ok(Args { values })
}

fn check_kind(name: &str, kind: &ParamKind, value: &Value) -> Checked<Value> {
    let mismatch = || {
        ValidationError::new(
            name,
            format!("expected {}, got {}", kind.label(), json_type(value)),
        )
    };

    match kind {
        ParamKind::Number => match value.as_f64() {
            Some(_) => Ok(value.clone()),
            None => Err(mismatch()),
        },
        ParamKind::Integer => as_integer(value)
            .map(Value::from)
            .ok_or_else(|| ValidationError::new(name, "must be an integer")),
        ParamKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        ParamKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(value.clone()),
            Some(s) => Err(ValidationError::new(
                name,
                format!("'{}' is not {}", s, kind.label()),
            )),
            None => Err(mismatch()),
        },
        ParamKind::Array(element) => match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| check_kind(&format!("{}[{}]", name, i), element, item))
                .collect::<Checked<Vec<_>>>()
                .map(Value::Array),
            _ => Err(mismatch()),
        },
    }
}

fn check_constraints(spec: &ParameterSpec, value: &Value) -> Checked<()> {
    let c = &spec.constraints;

    if let Some(n) = value.as_f64() {
        if let Some(min) = c.min
            && n < min
        {
            return Err(ValidationError::new(
                spec.name,
                format!("must be greater than or equal to {}", min),
            ));
        }
        if let Some(max) = c.max
            && n > max
        {
            return Err(ValidationError::new(
                spec.name,
                format!("must be less than or equal to {}", max),
            ));
        }
        if c.positive && n <= 0.0 {
            return Err(ValidationError::new(spec.name, "must be positive"));
        }
    }

    if let (Some(min_items), Value::Array(items)) = (c.min_items, value)
        && items.len() < min_items
    {
        return Err(ValidationError::new(
            spec.name,
            format!("must contain at least {} item(s)", min_items),
        ));
    }

    Ok(())
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validated arguments for one invocation
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: Map<String, Value>,
}

impl Args {
    fn get(&self, name: &str) -> Checked<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| ValidationError::missing(name))
    }

    pub fn number(&self, name: &str) -> Checked<f64> {
        self.get(name)?
            .as_f64()
            .ok_or_else(|| ValidationError::new(name, "expected number"))
    }

    pub fn integer(&self, name: &str) -> Checked<i64> {
        self.get(name)?
            .as_i64()
            .ok_or_else(|| ValidationError::new(name, "must be an integer"))
    }

    pub fn boolean(&self, name: &str) -> Checked<bool> {
        self.get(name)?
            .as_bool()
            .ok_or_else(|| ValidationError::new(name, "expected boolean"))
    }

    pub fn choice(&self, name: &str) -> Checked<&str> {
        self.get(name)?
            .as_str()
            .ok_or_else(|| ValidationError::new(name, "expected string"))
    }

    /// Parse an enum parameter into a closed variant type
    pub fn parse<T: FromStr>(&self, name: &str) -> Checked<T> {
        let raw = self.choice(name)?;
        raw.parse::<T>()
            .map_err(|_| ValidationError::new(name, format!("unrecognized value '{}'", raw)))
    }

    pub fn numbers(&self, name: &str) -> Checked<Vec<f64>> {
        number_list(name, self.get(name)?)
    }

    pub fn integers(&self, name: &str) -> Checked<Vec<i64>> {
        match self.get(name)? {
            Value::Array(items) => items
                .iter()
                .map(|v| {
                    v.as_i64()
                        .ok_or_else(|| ValidationError::new(name, "must be an integer"))
                })
                .collect(),
            _ => Err(ValidationError::new(name, "expected array")),
        }
    }

    pub fn matrix(&self, name: &str) -> Checked<Vec<Vec<f64>>> {
        match self.get(name)? {
            Value::Array(rows) => rows.iter().map(|row| number_list(name, row)).collect(),
            _ => Err(ValidationError::new(name, "expected array")),
        }
    }
}

fn number_list(name: &str, value: &Value) -> Checked<Vec<f64>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| ValidationError::new(name, "expected number"))
            })
            .collect(),
        _ => Err(ValidationError::new(name, "expected array")),
    }
}
