// src/ops/trigonometry.rs
// Circular, hyperbolic and reciprocal trig functions (radians)

use crate::error::{DomainError, Result};
use crate::format::num;
use crate::registry::{Args, Handler, OperationDescriptor, ParameterSpec};
use crate::response::Response;
use std::f64::consts::PI;

pub const GROUP: &str = "trigonometry";

/// Reciprocal functions are undefined when their denominator falls below this
const RECIPROCAL_EPSILON: f64 = 1e-15;

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        of_angle("sin", "Sine", "Sine of an angle in radians", sin),
        of_angle("cos", "Cosine", "Cosine of an angle in radians", cos),
        of_angle("tan", "Tangent", "Tangent of an angle in radians", tan),
        of_value("asin", "Arcsine", "Arcsine in radians; value in [-1, 1]", asin),
        of_value("acos", "Arccosine", "Arccosine in radians; value in [-1, 1]", acos),
        of_value("atan", "Arctangent", "Arctangent in radians", atan),
        OperationDescriptor::new(
            "atan2",
            "Two-argument arctangent",
            "Angle in radians from the x axis to the point (x, y)",
            atan2,
        )
        .param(ParameterSpec::number("y", "y coordinate"))
        .param(ParameterSpec::number("x", "x coordinate")),
        of_value("sinh", "Hyperbolic sine", "Hyperbolic sine", sinh),
        of_value("cosh", "Hyperbolic cosine", "Hyperbolic cosine", cosh),
        of_value("tanh", "Hyperbolic tangent", "Hyperbolic tangent", tanh),
        of_value("asinh", "Inverse hyperbolic sine", "Inverse hyperbolic sine", asinh),
        of_value(
            "acosh",
            "Inverse hyperbolic cosine",
            "Inverse hyperbolic cosine; value must be at least 1",
            acosh,
        ),
        of_value(
            "atanh",
            "Inverse hyperbolic tangent",
            "Inverse hyperbolic tangent; value strictly between -1 and 1",
            atanh,
        ),
        of_angle("sec", "Secant", "Secant of an angle in radians", sec),
        of_angle("csc", "Cosecant", "Cosecant of an angle in radians", csc),
        of_angle("cot", "Cotangent", "Cotangent of an angle in radians", cot),
        OperationDescriptor::new(
            "degToRad",
            "Degrees to radians",
            "Convert an angle from degrees to radians",
            deg_to_rad,
        )
        .param(ParameterSpec::number("degrees", "Angle in degrees")),
        OperationDescriptor::new(
            "radToDeg",
            "Radians to degrees",
            "Convert an angle from radians to degrees",
            rad_to_deg,
        )
        .param(ParameterSpec::number("radians", "Angle in radians")),
    ]
}

fn of_angle(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::number("angle", "Angle in radians"))
}

fn of_value(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::number("value", "Input value"))
}

fn show(label: &str, func: &str, input: f64, result: f64, unit: &str) -> Result<Response> {
    Ok(Response::success(format!(
        "{} result: {}({}) = {}{}",
        label,
        func,
        num(input),
        num(result),
        unit
    )))
}

fn sin(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    show("Sine", "sin", x, x.sin(), "")
}

fn cos(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    show("Cosine", "cos", x, x.cos(), "")
}

fn tan(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    show("Tangent", "tan", x, x.tan(), "")
}

fn unit_interval(value: f64, func: &str) -> Result<()> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(DomainError::out_of_domain(format!(
            "{} input must be between -1 and 1",
            func
        ))
        .into());
    }
    Ok(())
}

fn asin(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    unit_interval(v, "asin")?;
    show("Arcsine", "asin", v, v.asin(), " radians")
}

fn acos(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    unit_interval(v, "acos")?;
    show("Arccosine", "acos", v, v.acos(), " radians")
}

fn atan(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    show("Arctangent", "atan", v, v.atan(), " radians")
}

fn atan2(args: &Args) -> Result<Response> {
    let y = args.number("y")?;
    let x = args.number("x")?;
    Ok(Response::success(format!(
        "Two-argument arctangent result: atan2({}, {}) = {} radians",
        num(y),
        num(x),
        num(y.atan2(x))
    )))
}

fn sinh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    show("Hyperbolic sine", "sinh", v, v.sinh(), "")
}

fn cosh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    show("Hyperbolic cosine", "cosh", v, v.cosh(), "")
}

fn tanh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    show("Hyperbolic tangent", "tanh", v, v.tanh(), "")
}

fn asinh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    show("Inverse hyperbolic sine", "asinh", v, v.asinh(), "")
}

fn acosh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    if v < 1.0 {
        return Err(DomainError::out_of_domain("acosh input must be greater than or equal to 1").into());
    }
    show("Inverse hyperbolic cosine", "acosh", v, v.acosh(), "")
}

fn atanh(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    if v <= -1.0 || v >= 1.0 {
        return Err(DomainError::out_of_domain(
            "atanh input must be strictly between -1 and 1",
        )
        .into());
    }
    show("Inverse hyperbolic tangent", "atanh", v, v.atanh(), "")
}

fn reciprocal(denominator: f64, func: &str, base: &str) -> Result<f64> {
    if denominator.abs() < RECIPROCAL_EPSILON {
        return Err(DomainError::out_of_domain(format!(
            "{} is undefined at this angle ({} is 0)",
            func, base
        ))
        .into());
    }
    Ok(1.0 / denominator)
}

fn sec(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    let v = reciprocal(x.cos(), "sec", "cos")?;
    show("Secant", "sec", x, v, "")
}

fn csc(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    let v = reciprocal(x.sin(), "csc", "sin")?;
    show("Cosecant", "csc", x, v, "")
}

fn cot(args: &Args) -> Result<Response> {
    let x = args.number("angle")?;
    let v = reciprocal(x.tan(), "cot", "tan")?;
    show("Cotangent", "cot", x, v, "")
}

fn deg_to_rad(args: &Args) -> Result<Response> {
    let d = args.number("degrees")?;
    Ok(Response::success(format!(
        "Degrees to radians result: {}° = {} radians",
        num(d),
        num(d * (PI / 180.0))
    )))
}

fn rad_to_deg(args: &Args) -> Result<Response> {
    let r = args.number("radians")?;
    Ok(Response::success(format!(
        "Radians to degrees result: {} radians = {}°",
        num(r),
        num(r * (180.0 / PI))
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::value;
    use serde_json::{Value, json};

    fn call(op: &str, raw: Value) -> Result<Response> {
        crate::ops::testing::call(operations(), op, raw)
    }

    #[test]
    fn test_sin_zero() {
        let r = call("sin", json!({"angle": 0})).unwrap();
        assert_eq!(r.text(), "Sine result: sin(0) = 0");
    }

    #[test]
    fn test_asin_out_of_range() {
        assert!(call("asin", json!({"value": 1.5})).is_err());
        assert!(call("acos", json!({"value": -1.01})).is_err());
        assert!(call("asin", json!({"value": 1})).is_ok());
    }

    #[test]
    fn test_hyperbolic_domains() {
        assert!(call("acosh", json!({"value": 0.5})).is_err());
        assert!(call("atanh", json!({"value": 1})).is_err());
        assert!(call("atanh", json!({"value": 0.5})).is_ok());
    }

    #[test]
    fn test_reciprocal_undefined() {
        assert!(call("csc", json!({"angle": 0})).is_err());
        assert!(call("cot", json!({"angle": 0})).is_err());
        let r = call("sec", json!({"angle": 0})).unwrap();
        assert!(r.text().ends_with("= 1"));
    }

    #[test]
    fn test_deg_to_rad() {
        let r = call("degToRad", json!({"degrees": 180})).unwrap();
        assert!(r.text().contains("3.141592653589793"));
        let r = call("radToDeg", json!({"radians": value(r.text())})).unwrap();
        assert!((value(r.text()) - 180.0).abs() < 1e-9);
    }
}
