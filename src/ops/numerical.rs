// src/ops/numerical.rs
// Integration, differentiation, root finding and interpolation over a
// closed family of parameterized functions

use crate::error::{DomainError, Result};
use crate::format::num;
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;
use strum::{AsRefStr, EnumString, VariantNames};

pub const GROUP: &str = "numerical";

/// Fixed step of the central difference used by Newton's method
const NEWTON_STEP: f64 = 1e-4;
/// Derivatives below this magnitude stall Newton's method
const STALL_EPSILON: f64 = 1e-15;

type Computed<T> = std::result::Result<T, DomainError>;

/// Function families selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum FunctionKind {
    /// `Σ cᵢ xⁱ`
    Polynomial,
    /// `c0 · e^(c1 x)`
    Exponential,
    /// `c0 sin(c1 x) + c2 cos(c3 x)`
    Trigonometric,
    /// `c0 ln(c1 x + c2)`
    Logarithmic,
}

/// A function family bound to its coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    kind: FunctionKind,
    coefficients: Vec<f64>,
}

impl Function {
    pub fn new(kind: FunctionKind, coefficients: Vec<f64>) -> Computed<Self> {
        if coefficients.is_empty() {
            return Err(DomainError::Empty("Coefficient list"));
        }
        if kind != FunctionKind::Polynomial && coefficients.len() < 2 {
            return Err(DomainError::out_of_domain(format!(
                "{} functions need at least 2 coefficients",
                kind.as_ref()
            )));
        }
        Ok(Self { kind, coefficients })
    }

    fn c(&self, i: usize) -> Option<f64> {
        self.coefficients.get(i).copied()
    }

    /// Evaluate at `x`; points outside the domain yield NaN
    pub fn eval(&self, x: f64) -> f64 {
        let c0 = self.coefficients[0];
        let c1 = self.c(1).unwrap_or(0.0);
        match self.kind {
            FunctionKind::Polynomial => self
                .coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c * x.powi(i as i32))
                .sum(),
            FunctionKind::Exponential => c0 * (c1 * x).exp(),
            FunctionKind::Trigonometric => {
                let c2 = self.c(2).unwrap_or(0.0);
                let c3 = self.c(3).unwrap_or(1.0);
                c0 * (c1 * x).sin() + c2 * (c3 * x).cos()
            }
            FunctionKind::Logarithmic => {
                let arg = c1 * x + self.c(2).unwrap_or(0.0);
                if arg <= 0.0 {
                    f64::NAN
                } else {
                    c0 * arg.ln()
                }
            }
        }
    }

    fn eval_finite(&self, x: f64) -> Computed<f64> {
        let y = self.eval(x);
        if !y.is_finite() {
            return Err(DomainError::NonFinite { x: num(x) });
        }
        Ok(y)
    }

    /// Central-difference derivative with step `h`
    pub fn derivative(&self, x: f64, h: f64) -> Computed<f64> {
        let plus = self.eval_finite(x + h).map_err(|_| DomainError::NonFinite { x: num(x) })?;
        let minus = self.eval_finite(x - h).map_err(|_| DomainError::NonFinite { x: num(x) })?;
        Ok((plus - minus) / (2.0 * h))
    }
}

/// Converged root of an iterative method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    pub fx: f64,
    pub iterations: u32,
}

/// Composite trapezoidal rule over `intervals` equal subintervals
pub fn trapezoid(f: &Function, lower: f64, upper: f64, intervals: u32) -> Computed<f64> {
    if lower >= upper {
        return Err(DomainError::InvalidInterval(
            "lower bound must be less than upper bound",
        ));
    }
    let h = (upper - lower) / intervals as f64;
    let mut sum = 0.0;
    for i in 0..=intervals {
        let y = f.eval_finite(lower + i as f64 * h)?;
        sum += if i == 0 || i == intervals { y } else { 2.0 * y };
    }
    Ok(h / 2.0 * sum)
}

pub fn newton_root(f: &Function, guess: f64, tolerance: f64, max_iterations: u32) -> Computed<Root> {
    let mut x = guess;
    for i in 0..max_iterations {
        let fx = f.eval_finite(x)?;
        let dfx = f.derivative(x, NEWTON_STEP)?;
        if dfx.abs() < STALL_EPSILON {
            return Err(DomainError::DerivativeStalled { x: num(x) });
        }
        let next = x - fx / dfx;
        if (next - x).abs() < tolerance {
            return Ok(Root {
                x: next,
                fx: f.eval(next),
                iterations: i + 1,
            });
        }
        x = next;
    }
    Err(DomainError::NotConverged {
        method: "Newton's method",
        iterations: max_iterations,
        last: num(x),
    })
}

pub fn bisection_root(
    f: &Function,
    left: f64,
    right: f64,
    tolerance: f64,
    max_iterations: u32,
) -> Computed<Root> {
    if left >= right {
        return Err(DomainError::InvalidInterval(
            "left bound must be less than right bound",
        ));
    }
    let f_left = f.eval_finite(left)?;
    let f_right = f.eval_finite(right)?;
    if f_left * f_right > 0.0 {
        return Err(DomainError::SameSign);
    }
    // An endpoint may already be the root
    for (x, fx) in [(left, f_left), (right, f_right)] {
        if fx == 0.0 {
            return Ok(Root {
                x,
                fx,
                iterations: 0,
            });
        }
    }

    let (mut a, mut b, mut fa) = (left, right, f_left);
    for i in 0..max_iterations {
        let c = (a + b) / 2.0;
        let fc = f.eval_finite(c)?;
        if fc.abs() < tolerance || (b - a) / 2.0 < tolerance {
            return Ok(Root {
                x: c,
                fx: fc,
                iterations: i + 1,
            });
        }
        if fa * fc <= 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }
    Err(DomainError::NotConverged {
        method: "Bisection method",
        iterations: max_iterations,
        last: num((a + b) / 2.0),
    })
}

pub fn lagrange(xs: &[f64], ys: &[f64], at: f64) -> Computed<f64> {
    if xs.len() != ys.len() {
        return Err(DomainError::DimensionMismatch(format!(
            "{} x coordinates but {} y coordinates",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(DomainError::out_of_domain(
            "Interpolation needs at least 2 data points",
        ));
    }
    for (i, x) in xs.iter().enumerate() {
        if xs[..i].contains(x) {
            return Err(DomainError::out_of_domain("x coordinates must be distinct"));
        }
    }

    Ok(xs
        .iter()
        .zip(ys)
        .enumerate()
        .map(|(i, (xi, yi))| {
            xs.iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(*yi, |term, (_, xj)| term * (at - xj) / (xi - xj))
        })
        .sum())
}

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new(
            "numerical_integration",
            "Numerical integration",
            "Definite integral by the composite trapezoidal rule",
            numerical_integration,
        )
        .param(function_type())
        .param(coefficients())
        .param(ParameterSpec::number("lower_bound", "Lower limit of integration"))
        .param(ParameterSpec::number("upper_bound", "Upper limit of integration"))
        .param(
            ParameterSpec::integer("intervals", "Number of subintervals")
                .min(1.0)
                .max(10000.0)
                .default(1000),
        ),
        OperationDescriptor::new(
            "numerical_derivative",
            "Numerical derivative",
            "Derivative at a point by central difference",
            numerical_derivative,
        )
        .param(function_type())
        .param(coefficients())
        .param(ParameterSpec::number("point", "Point of differentiation"))
        .param(ParameterSpec::number("step_size", "Difference step").positive().default(1e-4)),
        OperationDescriptor::new(
            "newton_method",
            "Newton's method",
            "Root of f(x) = 0 by Newton iteration",
            newton_method,
        )
        .param(function_type())
        .param(coefficients())
        .param(ParameterSpec::number("initial_guess", "Starting point"))
        .param(tolerance())
        .param(max_iterations()),
        OperationDescriptor::new(
            "bisection_method",
            "Bisection method",
            "Root of f(x) = 0 inside a bracketing interval",
            bisection_method,
        )
        .param(function_type())
        .param(coefficients())
        .param(ParameterSpec::number("left_bound", "Left end of the interval"))
        .param(ParameterSpec::number("right_bound", "Right end of the interval"))
        .param(tolerance())
        .param(max_iterations()),
        OperationDescriptor::new(
            "lagrange_interpolation",
            "Lagrange interpolation",
            "Value of the interpolating polynomial at a point",
            lagrange_interpolation,
        )
        .param(ParameterSpec::numbers("x_points", "x coordinates of the known points"))
        .param(ParameterSpec::numbers("y_points", "y coordinates of the known points"))
        .param(ParameterSpec::number("interpolation_point", "x at which to interpolate")),
    ]
}

fn function_type() -> ParameterSpec {
    ParameterSpec::choice("function_type", FunctionKind::VARIANTS, "Function family")
}

fn coefficients() -> ParameterSpec {
    ParameterSpec::numbers("coefficients", "Function coefficients c0, c1, ...")
}

fn tolerance() -> ParameterSpec {
    ParameterSpec::number("tolerance", "Convergence tolerance")
        .positive()
        .default(1e-6)
}

fn max_iterations() -> ParameterSpec {
    ParameterSpec::integer("max_iterations", "Iteration cap")
        .min(1.0)
        .default(100)
}

fn function(args: &Args) -> Result<Function> {
    let kind: FunctionKind = args.parse("function_type")?;
    Ok(Function::new(kind, args.numbers("coefficients")?)?)
}

fn iteration_cap(args: &Args) -> Result<u32> {
    Ok(u32::try_from(args.integer("max_iterations")?).unwrap_or(u32::MAX))
}

fn numerical_integration(args: &Args) -> Result<Response> {
    let f = function(args)?;
    let lower = args.number("lower_bound")?;
    let upper = args.number("upper_bound")?;
    let intervals = u32::try_from(args.integer("intervals")?).unwrap_or(1);
    let area = trapezoid(&f, lower, upper, intervals)?;
    Ok(Response::success(format!(
        "Numerical integration result: ∫[{}, {}] f(x)dx ≈ {}\nTrapezoidal rule with {} subintervals",
        num(lower),
        num(upper),
        num(area),
        intervals
    )))
}

fn numerical_derivative(args: &Args) -> Result<Response> {
    let f = function(args)?;
    let point = args.number("point")?;
    let step = args.number("step_size")?;
    let d = f.derivative(point, step)?;
    Ok(Response::success(format!(
        "Numerical derivative result: f'({}) ≈ {}\nCentral difference with step {}",
        num(point),
        num(d),
        num(step)
    )))
}

fn newton_method(args: &Args) -> Result<Response> {
    let f = function(args)?;
    let root = newton_root(
        &f,
        args.number("initial_guess")?,
        args.number("tolerance")?,
        iteration_cap(args)?,
    )?;
    Ok(Response::success(format!(
        "Newton's method root: x ≈ {}\nIterations: {}\nf({}) ≈ {}",
        num(root.x),
        root.iterations,
        num(root.x),
        num(root.fx)
    )))
}

fn bisection_method(args: &Args) -> Result<Response> {
    let f = function(args)?;
    let root = bisection_root(
        &f,
        args.number("left_bound")?,
        args.number("right_bound")?,
        args.number("tolerance")?,
        iteration_cap(args)?,
    )?;
    Ok(Response::success(format!(
        "Bisection method root: x ≈ {}\nIterations: {}\nf({}) ≈ {}",
        num(root.x),
        root.iterations,
        num(root.x),
        num(root.fx)
    )))
}

fn lagrange_interpolation(args: &Args) -> Result<Response> {
    let xs = args.numbers("x_points")?;
    let ys = args.numbers("y_points")?;
    let at = args.number("interpolation_point")?;
    let v = lagrange(&xs, &ys, at)?;
    Ok(Response::success(format!(
        "Lagrange interpolation result: f({}) ≈ {}\nInterpolated from {} data points",
        num(at),
        num(v),
        xs.len()
    )))
}
