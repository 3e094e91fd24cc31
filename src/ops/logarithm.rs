// src/ops/logarithm.rs
// Natural, common and arbitrary-base logarithms

use crate::error::{DomainError, Result};
use crate::format::num;
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "logarithm";

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("ln", "Natural logarithm", "Logarithm base e", ln)
            .param(ParameterSpec::number("value", "Input value (> 0)")),
        OperationDescriptor::new("log10", "Common logarithm", "Logarithm base 10", log10)
            .param(ParameterSpec::number("value", "Input value (> 0)")),
        OperationDescriptor::new("log", "Logarithm", "Logarithm with an arbitrary base", log)
            .param(ParameterSpec::number("value", "Input value (> 0)"))
            .param(ParameterSpec::number("base", "Base (> 0, not 1)")),
    ]
}

fn positive_value(value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(DomainError::out_of_domain("Logarithm input must be greater than 0").into());
    }
    Ok(())
}

fn ln(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    positive_value(v)?;
    Ok(Response::success(format!(
        "Natural logarithm result: ln({}) = {}",
        num(v),
        num(v.ln())
    )))
}

fn log10(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    positive_value(v)?;
    Ok(Response::success(format!(
        "Common logarithm result: log10({}) = {}",
        num(v),
        num(v.log10())
    )))
}

fn log(args: &Args) -> Result<Response> {
    let v = args.number("value")?;
    let base = args.number("base")?;
    positive_value(v)?;
    if base <= 0.0 || base == 1.0 {
        return Err(DomainError::out_of_domain(
            "Logarithm base must be greater than 0 and not equal to 1",
        )
        .into());
    }
    Ok(Response::success(format!(
        "Logarithm result: log{}({}) = {}",
        num(base),
        num(v),
        num(v.ln() / base.ln())
    )))
}
