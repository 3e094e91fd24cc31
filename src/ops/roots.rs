// src/ops/roots.rs
// Square, cube and n-th roots plus absolute value

use crate::error::{DomainError, Result};
use crate::format::num;
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "roots";

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("sqrt", "Square root", "Square root of a number", sqrt)
            .param(ParameterSpec::number("a", "Radicand")),
        OperationDescriptor::new("cbrt", "Cube root", "Cube root of a number", cbrt)
            .param(ParameterSpec::number("a", "Radicand")),
        OperationDescriptor::new("nthRoot", "N-th root", "N-th root of a number", nth_root)
            .param(ParameterSpec::number("a", "Radicand"))
            .param(ParameterSpec::number("n", "Root degree")),
        OperationDescriptor::new("abs", "Absolute value", "Absolute value of a number", abs)
            .param(ParameterSpec::number("a", "Value")),
    ]
}

fn sqrt(args: &Args) -> Result<Response> {
    let a = args.number("a")?;
    if a < 0.0 {
        return Err(DomainError::out_of_domain(
            "Cannot take the square root of a negative number",
        )
        .into());
    }
    Ok(Response::success(format!(
        "Square root result: √{} = {}",
        num(a),
        num(a.sqrt())
    )))
}

fn cbrt(args: &Args) -> Result<Response> {
    let a = args.number("a")?;
    Ok(Response::success(format!(
        "Cube root result: ∛{} = {}",
        num(a),
        num(a.cbrt())
    )))
}

/// Real n-th root; negative radicands only admit odd integer degrees
pub fn nth_root_value(a: f64, n: f64) -> std::result::Result<f64, DomainError> {
    if n == 0.0 {
        return Err(DomainError::Zero("Root degree"));
    }
    if a < 0.0 {
        if n % 2.0 == 0.0 {
            return Err(DomainError::out_of_domain(
                "Cannot take an even root of a negative number",
            ));
        }
        if (n % 2.0).abs() == 1.0 {
            return Ok(-(-a).powf(1.0 / n));
        }
    }
    Ok(a.powf(1.0 / n))
}

fn nth_root(args: &Args) -> Result<Response> {
    let a = args.number("a")?;
    let n = args.number("n")?;
    let root = nth_root_value(a, n)?;
    Ok(Response::success(format!(
        "Root of degree {} result: {}√{} = {}",
        num(n),
        num(n),
        num(a),
        num(root)
    )))
}

fn abs(args: &Args) -> Result<Response> {
    let a = args.number("a")?;
    Ok(Response::success(format!(
        "Absolute value result: |{}| = {}",
        num(a),
        num(a.abs())
    )))
}
