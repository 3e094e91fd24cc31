// src/ops/complex.rs
// Complex arithmetic on explicit (real, imag) parameter pairs

use crate::error::{DomainError, Result};
use crate::format::{self, num};
use crate::registry::{Args, Handler, OperationDescriptor, ParameterSpec};
use crate::response::Response;
use std::fmt;
use std::ops::{Add, Mul, Sub};

pub const GROUP: &str = "complex";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    pub fn magnitude(self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Principal argument in radians
    pub fn argument(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn checked_div(self, rhs: Self) -> std::result::Result<Self, DomainError> {
        if rhs.is_zero() {
            return Err(DomainError::ZeroDivisor);
        }
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Ok(Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        ))
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::complex(self.re, self.im))
    }
}

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        pair("complex_add", "Complex addition", "Sum of two complex numbers", complex_add),
        pair(
            "complex_subtract",
            "Complex subtraction",
            "Difference of two complex numbers",
            complex_subtract,
        ),
        pair(
            "complex_multiply",
            "Complex multiplication",
            "Product of two complex numbers",
            complex_multiply,
        ),
        pair(
            "complex_divide",
            "Complex division",
            "Quotient of two complex numbers",
            complex_divide,
        ),
        single("complex_magnitude", "Complex magnitude", "Modulus |z|", complex_magnitude),
        single("complex_conjugate", "Complex conjugate", "Conjugate of z", complex_conjugate),
        single(
            "complex_argument",
            "Complex argument",
            "Angle of z in radians and degrees",
            complex_argument,
        ),
        single("complex_polar", "Polar form", "z as r∠θ", complex_polar),
    ]
}

fn pair(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::number("a_real", "Real part of the first number"))
        .param(ParameterSpec::number("a_imag", "Imaginary part of the first number"))
        .param(ParameterSpec::number("b_real", "Real part of the second number"))
        .param(ParameterSpec::number("b_imag", "Imaginary part of the second number"))
}

fn single(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::number("real", "Real part"))
        .param(ParameterSpec::number("imag", "Imaginary part"))
}

fn degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

fn operands(args: &Args) -> Result<(Complex, Complex)> {
    Ok((
        Complex::new(args.number("a_real")?, args.number("a_imag")?),
        Complex::new(args.number("b_real")?, args.number("b_imag")?),
    ))
}

fn operand(args: &Args) -> Result<Complex> {
    Ok(Complex::new(args.number("real")?, args.number("imag")?))
}

fn binary_text(label: &str, symbol: &str, a: Complex, b: Complex, r: Complex) -> Response {
    Response::success(format!("{} result: ({}) {} ({}) = {}", label, a, symbol, b, r))
}

fn complex_add(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(binary_text("Complex addition", "+", a, b, a + b))
}

fn complex_subtract(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(binary_text("Complex subtraction", "-", a, b, a - b))
}

fn complex_multiply(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    Ok(binary_text("Complex multiplication", "×", a, b, a * b))
}

fn complex_divide(args: &Args) -> Result<Response> {
    let (a, b) = operands(args)?;
    let q = a.checked_div(b)?;
    Ok(binary_text("Complex division", "÷", a, b, q))
}

fn complex_magnitude(args: &Args) -> Result<Response> {
    let z = operand(args)?;
    Ok(Response::success(format!(
        "Complex magnitude: |{}| = {}",
        z,
        num(z.magnitude())
    )))
}

fn complex_conjugate(args: &Args) -> Result<Response> {
    let z = operand(args)?;
    Ok(Response::success(format!(
        "Complex conjugate: ({})* = {}",
        z,
        z.conjugate()
    )))
}

fn complex_argument(args: &Args) -> Result<Response> {
    let z = operand(args)?;
    if z.is_zero() {
        return Err(DomainError::out_of_domain("The argument of 0 is undefined").into());
    }
    let theta = z.argument();
    Ok(Response::success(format!(
        "Complex argument: arg({}) = {} radians = {}°",
        z,
        num(theta),
        num(degrees(theta))
    )))
}

fn complex_polar(args: &Args) -> Result<Response> {
    let z = operand(args)?;
    if z.is_zero() {
        return Ok(Response::success("Polar form: 0 + 0i = 0∠0°"));
    }
    let r = num(z.magnitude());
    let theta = z.argument();
    Ok(Response::success(format!(
        "Polar form: {} = {}∠{}° = {}∠{} radians",
        z,
        r,
        num(degrees(theta)),
        r,
        num(theta)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn call(op: &str, raw: Value) -> Result<Response> {
        crate::ops::testing::call(operations(), op, raw)
    }

    #[test]
    fn test_arithmetic() {
        let a = Complex::new(3.0, 4.0);
        let b = Complex::new(1.0, -2.0);
        assert_eq!(a + b, Complex::new(4.0, 2.0));
        assert_eq!(a - b, Complex::new(2.0, 6.0));
        assert_eq!(a * b, Complex::new(11.0, -2.0));
    }

    #[test]
    fn test_division() {
        let q = Complex::new(11.0, -2.0).checked_div(Complex::new(1.0, -2.0)).unwrap();
        assert!((q.re - 3.0).abs() < 1e-12 && (q.im - 4.0).abs() < 1e-12);
        assert_eq!(
            Complex::new(1.0, 1.0).checked_div(Complex::new(0.0, 0.0)),
            Err(DomainError::ZeroDivisor)
        );
    }

    #[test]
    fn test_add_text() {
        let r = call(
            "complex_add",
            json!({"a_real": 1, "a_imag": 2, "b_real": 3, "b_imag": -1}),
        )
        .unwrap();
        assert_eq!(r.text(), "Complex addition result: (1 + 2i) + (3 - i) = 4 + i");
    }

    #[test]
    fn test_magnitude() {
        let r = call("complex_magnitude", json!({"real": 3, "imag": 4})).unwrap();
        assert!(r.text().ends_with("= 5"));
    }

    #[test]
    fn test_argument_of_zero() {
        assert!(call("complex_argument", json!({"real": 0, "imag": 0})).is_err());
        let r = call("complex_polar", json!({"real": 0, "imag": 0})).unwrap();
        assert!(r.text().contains("0∠0°"));
    }

    #[test]
    fn test_polar() {
        let r = call("complex_polar", json!({"real": 0, "imag": 2})).unwrap();
        assert!(r.text().starts_with("Polar form: 2i = 2∠90°"));
    }
}
