// src/ops/arithmetic.rs
// Basic two-operand arithmetic

use crate::error::{DomainError, Result};
use crate::format::num;
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "arithmetic";

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        binary("add", "Addition", "Add two numbers", add),
        binary("subtract", "Subtraction", "Subtract b from a", subtract),
        binary("multiply", "Multiplication", "Multiply two numbers", multiply),
        binary("divide", "Division", "Divide a by b", divide),
        binary("modulo", "Modulo", "Remainder of a divided by b", modulo),
        binary("power", "Power", "Raise a to the power b", power),
    ]
}

fn binary(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: crate::registry::Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::number("a", "First operand"))
        .param(ParameterSpec::number("b", "Second operand"))
}

fn operands(args: &Args) -> Result<(f64, f64)> {
    Ok((args.number("a")?, args.number("b")?))
}

fn add(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(Response::success(format!(
        "Addition result: {} + {} = {}",
        num(a),
        num(b),
        num(a + b)
    )))
}

fn subtract(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(Response::success(format!(
        "Subtraction result: {} - {} = {}",
        num(a),
        num(b),
        num(a - b)
    )))
}

fn multiply(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(Response::success(format!(
        "Multiplication result: {} × {} = {}",
        num(a),
        num(b),
        num(a * b)
    )))
}

fn divide(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    if b == 0.0 {
        return Err(DomainError::ZeroDivisor.into());
    }
    Ok(Response::success(format!(
        "Division result: {} ÷ {} = {}",
        num(a),
        num(b),
        num(a / b)
    )))
}

fn modulo(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    if b == 0.0 {
        return Err(DomainError::ZeroDivisor.into());
    }
    // f64 `%` is truncated remainder: sign follows the dividend
    Ok(Response::success(format!(
        "Modulo result: {} % {} = {}",
        num(a),
        num(b),
        num(a % b)
    )))
}

fn power(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(Response::success(format!(
        "Power result: {}^{} = {}",
        num(a),
        num(b),
        num(a.powf(b))
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::validate;
    use serde_json::json;

    fn run(handler: crate::registry::Handler, a: f64, b: f64) -> Result<Response> {
        let raw = json!({"a": a, "b": b});
        let args = validate(&operations()[0].params, raw.as_object().unwrap()).unwrap();
        handler(&args)
    }

    #[test]
    fn test_add() {
        assert_eq!(run(add, 2.0, 3.0).unwrap().text(), "Addition result: 2 + 3 = 5");
    }

    #[test]
    fn test_floating_point_rendering() {
        let r = run(add, 0.1, 0.2).unwrap();
        assert!(r.text().ends_with("= 0.30000000000000004"));
    }

    #[test]
    fn test_divide_by_zero() {
        let err = run(divide, 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("cannot be zero"));
    }

    #[test]
    fn test_modulo_sign_follows_dividend() {
        assert!(run(modulo, -7.0, 3.0).unwrap().text().ends_with("= -1"));
        assert!(run(modulo, 7.0, -3.0).unwrap().text().ends_with("= 1"));
        assert!(run(modulo, 5.0, 0.0).is_err());
    }

    #[test]
    fn test_power() {
        assert!(run(power, 2.0, 10.0).unwrap().text().ends_with("= 1024"));
        assert!(run(power, 4.0, 0.5).unwrap().text().ends_with("= 2"));
    }
}
