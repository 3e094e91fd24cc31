// src/ops/combinatorics.rs
// Factorials, arrangements, selections and classic integer sequences

use crate::error::{DomainError, Result};
use crate::format::{list, num};
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "combinatorics";

/// Largest n whose factorial fits in an f64
pub const FACTORIAL_LIMIT: i64 = 170;
/// Largest index whose Fibonacci number fits in an f64
pub const FIBONACCI_LIMIT: i64 = 1476;

const BELL_NUMBERS: [u64; 16] = [
    1, 1, 2, 5, 15, 52, 203, 877, 4140, 21147, 115975, 678570, 4213597, 27644437, 190899322,
    1382958545,
];

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("factorial", "Factorial", "n! for a non-negative integer", factorial)
            .param(ParameterSpec::integer("n", "Non-negative integer").min(0.0)),
        OperationDescriptor::new(
            "permutation",
            "Permutations",
            "Ordered selections P(n, r) of r items from n",
            permutation,
        )
        .param(ParameterSpec::integer("n", "Total number of items").min(0.0))
        .param(ParameterSpec::integer("r", "Number of items selected").min(0.0)),
        OperationDescriptor::new(
            "combination",
            "Combinations",
            "Unordered selections C(n, r) of r items from n",
            combination,
        )
        .param(ParameterSpec::integer("n", "Total number of items").min(0.0))
        .param(ParameterSpec::integer("r", "Number of items selected").min(0.0)),
        OperationDescriptor::new(
            "fibonacci",
            "Fibonacci number",
            "The n-th Fibonacci number, counting from F(0) = 0",
            fibonacci,
        )
        .param(ParameterSpec::integer("n", "Index (from 0)").min(0.0)),
        OperationDescriptor::new(
            "fibonacciSequence",
            "Fibonacci sequence",
            "The first n Fibonacci numbers starting at 0",
            fibonacci_sequence,
        )
        .param(ParameterSpec::integer("n", "Number of terms (1-100)").min(1.0).max(100.0)),
        OperationDescriptor::new("catalan", "Catalan number", "The n-th Catalan number", catalan)
            .param(ParameterSpec::integer("n", "Index (0-35)").min(0.0).max(35.0)),
        OperationDescriptor::new(
            "bellNumber",
            "Bell number",
            "Number of partitions of a set of n elements",
            bell_number,
        )
        .param(ParameterSpec::integer("n", "Index (0-15)").min(0.0).max(15.0)),
        OperationDescriptor::new(
            "binomialCoefficient",
            "Binomial coefficient",
            "n choose k",
            binomial_coefficient,
        )
        .param(ParameterSpec::integer("n", "Upper index").min(0.0))
        .param(ParameterSpec::integer("k", "Lower index").min(0.0)),
    ]
}

fn check_limit(n: i64) -> std::result::Result<(), DomainError> {
    if n > FACTORIAL_LIMIT {
        return Err(DomainError::Overflow {
            limit: FACTORIAL_LIMIT as u64,
        });
    }
    Ok(())
}

fn check_selection(n: i64, r: i64) -> std::result::Result<(), DomainError> {
    if r > n {
        return Err(DomainError::out_of_domain(
            "Number of selected items cannot exceed the total",
        ));
    }
    check_limit(n)
}

pub fn factorial_value(n: i64) -> std::result::Result<f64, DomainError> {
    check_limit(n)?;
    Ok((2..=n).fold(1.0, |acc, i| acc * i as f64))
}

pub fn permutation_value(n: i64, r: i64) -> std::result::Result<f64, DomainError> {
    check_selection(n, r)?;
    Ok(((n - r + 1)..=n).fold(1.0, |acc, i| acc * i as f64))
}

/// C(n, r) by the multiplicative recurrence over min(r, n - r) terms, rounded
pub fn combination_value(n: i64, r: i64) -> std::result::Result<f64, DomainError> {
    check_selection(n, r)?;
    let terms = r.min(n - r);
    let raw = (0..terms).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64);
    Ok(raw.round())
}

pub fn fibonacci_value(n: i64) -> std::result::Result<f64, DomainError> {
    if n > FIBONACCI_LIMIT {
        return Err(DomainError::Overflow {
            limit: FIBONACCI_LIMIT as u64,
        });
    }
    let (mut a, mut b) = (0.0_f64, 1.0_f64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    Ok(a)
}

pub fn catalan_value(n: i64) -> f64 {
    let central = (0..n).fold(1.0, |acc, i| acc * (2 * n - i) as f64 / (i + 1) as f64);
    (central / (n + 1) as f64).round()
}

fn factorial(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let v = factorial_value(n)?;
    Ok(Response::success(format!("Factorial result: {}! = {}", n, num(v))))
}

fn permutation(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let r = args.integer("r")?;
    let v = permutation_value(n, r)?;
    Ok(Response::success(format!(
        "Permutation result: P({},{}) = {}",
        n,
        r,
        num(v)
    )))
}

fn combination(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let r = args.integer("r")?;
    let v = combination_value(n, r)?;
    Ok(Response::success(format!(
        "Combination result: C({},{}) = {}",
        n,
        r,
        num(v)
    )))
}

fn fibonacci(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let v = fibonacci_value(n)?;
    Ok(Response::success(format!("Fibonacci number: F({}) = {}", n, num(v))))
}

fn fibonacci_sequence(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let mut sequence: Vec<f64> = Vec::with_capacity(n as usize);
    for i in 0..n as usize {
        let next = match i {
            0 => 0.0,
            1 => 1.0,
            _ => sequence[i - 1] + sequence[i - 2],
        };
        sequence.push(next);
    }
    Ok(Response::success(format!(
        "First {} Fibonacci numbers: [{}]",
        n,
        list(&sequence)
    )))
}

fn catalan(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    Ok(Response::success(format!(
        "Catalan number: C{} = {}",
        n,
        num(catalan_value(n))
    )))
}

fn bell_number(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let v = usize::try_from(n)
        .ok()
        .and_then(|i| BELL_NUMBERS.get(i))
        .ok_or_else(|| DomainError::out_of_domain("Index is outside the precomputed range"))?;
    Ok(Response::success(format!("Bell number: B{} = {}", n, v)))
}

fn binomial_coefficient(args: &Args) -> Result<Response> {
    let n = args.integer("n")?;
    let k = args.integer("k")?;
    let v = combination_value(n, k)?;
    Ok(Response::success(format!(
        "Binomial coefficient: ({} choose {}) = {}",
        n,
        k,
        num(v)
    )))
}
