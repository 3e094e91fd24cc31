// src/ops/number_theory.rs
// Divisibility, primality and arithmetic functions over integers

use crate::error::{DomainError, Result};
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "number_theory";

/// 2^53 - 1, the largest integer an f64 represents exactly
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

const DIVISOR_LIST_LIMIT: f64 = 10000.0;

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("gcd", "Greatest common divisor", "GCD of two or more integers", gcd)
            .param(ParameterSpec::integers("numbers", "Integers (at least 2)").min_items(2)),
        OperationDescriptor::new("lcm", "Least common multiple", "LCM of two or more integers", lcm)
            .param(ParameterSpec::integers("numbers", "Integers (at least 2)").min_items(2)),
        OperationDescriptor::new("isPrime", "Primality test", "Whether a positive integer is prime", is_prime)
            .param(ParameterSpec::integer("n", "Positive integer").min(1.0)),
        OperationDescriptor::new(
            "primeFactorization",
            "Prime factorization",
            "Decompose an integer into prime powers",
            prime_factorization,
        )
        .param(ParameterSpec::integer("n", "Integer greater than 1").min(2.0)),
        OperationDescriptor::new(
            "eulerPhi",
            "Euler's totient",
            "Count of integers in 1..=n coprime to n",
            euler_phi,
        )
        .param(ParameterSpec::integer("n", "Positive integer").min(1.0)),
        OperationDescriptor::new(
            "isPerfectNumber",
            "Perfect number test",
            "Whether n equals the sum of its proper divisors",
            is_perfect_number,
        )
        .param(ParameterSpec::integer("n", "Positive integer").min(1.0)),
        OperationDescriptor::new("divisorCount", "Divisor count", "Number of divisors of n", divisor_count)
            .param(ParameterSpec::integer("n", "Positive integer").min(1.0)),
        OperationDescriptor::new("divisorList", "Divisor list", "All divisors of n in ascending order", divisor_list)
            .param(
                ParameterSpec::integer("n", "Positive integer (1-10000)")
                    .min(1.0)
                    .max(DIVISOR_LIST_LIMIT),
            ),
    ]
}

fn joined(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn gcd_pair(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn gcd_of(numbers: &[i64]) -> u64 {
    let mut iter = numbers.iter().map(|n| n.unsigned_abs());
    let first = iter.next().unwrap_or(0);
    iter.fold(first, gcd_pair)
}

/// LCM of the list; fails once the running value leaves the safe integer range
pub fn lcm_of(numbers: &[i64]) -> std::result::Result<u64, DomainError> {
    let mut iter = numbers.iter().map(|n| n.unsigned_abs());
    let mut result = iter.next().unwrap_or(0);
    for n in iter {
        if result == 0 || n == 0 {
            result = 0;
            continue;
        }
        let wide = result as u128 * n as u128 / gcd_pair(result, n) as u128;
        if wide > MAX_SAFE_INTEGER as u128 {
            return Err(DomainError::UnsafeInteger);
        }
        result = wide as u64;
    }
    Ok(result)
}

/// Smallest odd divisor above 1, if n is odd and composite
fn odd_divisor(n: u64) -> Option<u64> {
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return Some(i);
        }
        i += 2;
    }
    None
}

pub fn prime_factors(mut n: u64) -> Vec<(u64, u32)> {
    fn push(p: u64, factors: &mut Vec<(u64, u32)>) {
        match factors.last_mut() {
            Some((last, count)) if *last == p => *count += 1,
            _ => factors.push((p, 1)),
        }
    }

    let mut factors: Vec<(u64, u32)> = Vec::new();

    while n % 2 == 0 && n > 0 {
        push(2, &mut factors);
        n /= 2;
    }
    let mut i = 3;
    while i <= n / i {
        while n % i == 0 {
            push(i, &mut factors);
            n /= i;
        }
        i += 2;
    }
    if n > 2 {
        push(n, &mut factors);
    }
    factors
}

pub fn euler_phi_value(n: u64) -> u64 {
    prime_factors(n)
        .into_iter()
        .fold(n, |acc, (p, _)| acc / p * (p - 1))
}

pub fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1;
    while i <= n / i {
        if n % i == 0 {
            small.push(i);
            if i != n / i {
                large.push(n / i);
            }
        }
        i += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

fn proper_divisor_sum(n: u64) -> u128 {
    if n == 1 {
        return 0;
    }
    let mut sum: u128 = 1;
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            sum += i as u128;
            if i != n / i {
                sum += (n / i) as u128;
            }
        }
        i += 1;
    }
    sum
}

fn divisor_count_value(n: u64) -> u64 {
    let mut count = 0;
    let mut i = 1;
    while i <= n / i {
        if n % i == 0 {
            count += if i == n / i { 1 } else { 2 };
        }
        i += 1;
    }
    count
}

fn positive(args: &Args) -> Result<u64> {
    Ok(args.integer("n")?.unsigned_abs())
}

fn gcd(args: &Args) -> Result<Response> {
    let numbers = args.integers("numbers")?;
    Ok(Response::success(format!(
        "Greatest common divisor: gcd({}) = {}",
        joined(&numbers),
        gcd_of(&numbers)
    )))
}

fn lcm(args: &Args) -> Result<Response> {
    let numbers = args.integers("numbers")?;
    let v = lcm_of(&numbers)?;
    Ok(Response::success(format!(
        "Least common multiple: lcm({}) = {}",
        joined(&numbers),
        v
    )))
}

fn is_prime(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    let text = match n {
        1 => format!("{} is not prime (1 is neither prime nor composite)", n),
        2 => format!("{} is prime", n),
        _ if n % 2 == 0 => format!("{} is not prime (even)", n),
        _ => match odd_divisor(n) {
            Some(d) => format!("{} is not prime (divisible by {})", n, d),
            None => format!("{} is prime", n),
        },
    };
    Ok(Response::success(text))
}

fn prime_factorization(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    if n > MAX_SAFE_INTEGER {
        return Err(DomainError::UnsafeInteger.into());
    }
    let rendered: Vec<String> = prime_factors(n)
        .into_iter()
        .map(|(p, k)| if k == 1 { p.to_string() } else { format!("{}^{}", p, k) })
        .collect();
    Ok(Response::success(format!(
        "Prime factorization: {} = {}",
        n,
        rendered.join(" × ")
    )))
}

fn euler_phi(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    Ok(Response::success(format!(
        "Euler's totient: φ({}) = {}",
        n,
        euler_phi_value(n)
    )))
}

fn is_perfect_number(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    let sum = proper_divisor_sum(n);
    let text = if n > 1 && sum == n as u128 {
        format!("{} is a perfect number", n)
    } else {
        format!(
            "{} is not a perfect number (sum of proper divisors: {})",
            n, sum
        )
    };
    Ok(Response::success(text))
}

fn divisor_count(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    Ok(Response::success(format!(
        "Divisor count of {} = {}",
        n,
        divisor_count_value(n)
    )))
}

fn divisor_list(args: &Args) -> Result<Response> {
    let n = positive(args)?;
    let list: Vec<String> = divisors(n).iter().map(|d| d.to_string()).collect();
    Ok(Response::success(format!(
        "Divisors of {} = [{}]",
        n,
        list.join(", ")
    )))
}
