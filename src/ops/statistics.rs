// src/ops/statistics.rs
// Descriptive statistics over a list of numbers

use crate::error::{DomainError, Result};
use crate::format::{list, num};
use crate::registry::{Args, Handler, OperationDescriptor, ParameterSpec};
use crate::response::Response;
use std::collections::HashMap;

pub const GROUP: &str = "statistics";

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        over_numbers("mean", "Mean", "Arithmetic mean of a list", mean),
        over_numbers("median", "Median", "Median of a list", median),
        over_numbers(
            "mode",
            "Mode",
            "Most frequent value(s) of a list with their frequency",
            mode,
        ),
        over_numbers("stdDev", "Standard deviation", "Population or sample standard deviation", std_dev)
            .param(sample_flag()),
        over_numbers("variance", "Variance", "Population or sample variance", variance)
            .param(sample_flag()),
        over_numbers("max", "Maximum", "Largest value of a list", max),
        over_numbers("min", "Minimum", "Smallest value of a list", min),
        over_numbers("sum", "Sum", "Sum of a list (0 when empty)", sum),
        over_numbers("product", "Product", "Product of a list (1 when empty)", product),
        over_numbers("range", "Range", "Difference between the largest and smallest value", range),
    ]
}

fn over_numbers(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::numbers("numbers", "List of numbers"))
}

fn sample_flag() -> ParameterSpec {
    ParameterSpec::boolean("sample", "Use the sample (n - 1) form instead of the population form")
        .default(false)
}

fn non_empty(args: &Args) -> Result<Vec<f64>> {
    let numbers = args.numbers("numbers")?;
    if numbers.is_empty() {
        return Err(DomainError::Empty("Number list").into());
    }
    Ok(numbers)
}

pub fn mean_of(numbers: &[f64]) -> f64 {
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

pub fn median_of(numbers: &[f64]) -> f64 {
    let mut sorted = numbers.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Values sharing the highest frequency in first-seen order, and that frequency
pub fn modes_of(numbers: &[f64]) -> (Vec<f64>, usize) {
    let mut order: Vec<f64> = Vec::new();
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &x in numbers {
        // +0.0 folds -0.0 into 0.0
        let key = (x + 0.0).to_bits();
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(x + 0.0);
        }
        *count += 1;
    }

    let max_freq = counts.values().copied().max().unwrap_or(0);
    let modes = order
        .into_iter()
        .filter(|x| counts.get(&x.to_bits()) == Some(&max_freq))
        .collect();
    (modes, max_freq)
}

/// Population (`sample == false`) or sample variance
pub fn variance_of(numbers: &[f64], sample: bool) -> std::result::Result<f64, DomainError> {
    if numbers.is_empty() {
        return Err(DomainError::Empty("Number list"));
    }
    if sample && numbers.len() < 2 {
        return Err(DomainError::out_of_domain(
            "Sample statistics require at least 2 data points",
        ));
    }
    let m = mean_of(numbers);
    let squares: f64 = numbers.iter().map(|x| (x - m).powi(2)).sum();
    let divisor = if sample { numbers.len() - 1 } else { numbers.len() };
    Ok(squares / divisor as f64)
}

fn kind(sample: bool) -> &'static str {
    if sample { "Sample" } else { "Population" }
}

fn mean(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    Ok(Response::success(format!(
        "Mean of [{}] = {}",
        list(&numbers),
        num(mean_of(&numbers))
    )))
}

fn median(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    Ok(Response::success(format!(
        "Median of [{}] = {}",
        list(&numbers),
        num(median_of(&numbers))
    )))
}

fn mode(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    let (modes, freq) = modes_of(&numbers);
    Ok(Response::success(format!(
        "Mode of [{}] = {} (frequency: {})",
        list(&numbers),
        list(&modes),
        freq
    )))
}

fn std_dev(args: &Args) -> Result<Response> {
    let numbers = args.numbers("numbers")?;
    let sample = args.boolean("sample")?;
    let v = variance_of(&numbers, sample)?;
    Ok(Response::success(format!(
        "{} standard deviation of [{}] = {}",
        kind(sample),
        list(&numbers),
        num(v.sqrt())
    )))
}

fn variance(args: &Args) -> Result<Response> {
    let numbers = args.numbers("numbers")?;
    let sample = args.boolean("sample")?;
    let v = variance_of(&numbers, sample)?;
    Ok(Response::success(format!(
        "{} variance of [{}] = {}",
        kind(sample),
        list(&numbers),
        num(v)
    )))
}

fn max(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    let m = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(Response::success(format!(
        "Maximum of [{}] = {}",
        list(&numbers),
        num(m)
    )))
}

fn min(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    let m = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(Response::success(format!(
        "Minimum of [{}] = {}",
        list(&numbers),
        num(m)
    )))
}

fn sum(args: &Args) -> Result<Response> {
    let numbers = args.numbers("numbers")?;
    Ok(Response::success(format!(
        "Sum of [{}] = {}",
        list(&numbers),
        num(numbers.iter().sum())
    )))
}

fn product(args: &Args) -> Result<Response> {
    let numbers = args.numbers("numbers")?;
    Ok(Response::success(format!(
        "Product of [{}] = {}",
        list(&numbers),
        num(numbers.iter().product())
    )))
}

fn range(args: &Args) -> Result<Response> {
    let numbers = non_empty(args)?;
    let hi = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(Response::success(format!(
        "Range of [{}] = {} (max: {}, min: {})",
        list(&numbers),
        num(hi - lo),
        num(hi),
        num(lo)
    )))
}
