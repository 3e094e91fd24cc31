// src/ops/financial.rs
// Time-value-of-money formulas with fixed-decimal reports

use super::numerical::Root;
use crate::error::{DomainError, Result};
use crate::format::{fixed, num, percent};
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "financial";

/// IRR iterates never drop below this rate
const IRR_FLOOR: f64 = -0.99;
const STALL_EPSILON: f64 = 1e-15;

type Computed<T> = std::result::Result<T, DomainError>;

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new(
            "compound_interest",
            "Compound interest",
            "Future value of a principal under periodic compounding",
            compound_interest,
        )
        .param(ParameterSpec::number("principal", "Initial principal").positive())
        .param(
            ParameterSpec::number("annual_rate", "Annual rate as a decimal (0.05 = 5%)")
                .min(0.0)
                .max(1.0),
        )
        .param(ParameterSpec::number("periods", "Investment term in years").positive())
        .param(
            ParameterSpec::integer("compounding_frequency", "Compounding periods per year")
                .min(1.0)
                .default(1),
        ),
        OperationDescriptor::new(
            "present_value_annuity",
            "Present value of an annuity",
            "Present value of an ordinary annuity",
            present_value_annuity,
        )
        .param(ParameterSpec::number("payment", "Payment per period").positive())
        .param(ParameterSpec::integer("periods", "Number of payments").min(1.0))
        .param(ParameterSpec::number("interest_rate", "Rate per period as a decimal").min(0.0)),
        OperationDescriptor::new(
            "future_value_annuity",
            "Future value of an annuity",
            "Future value of an ordinary annuity",
            future_value_annuity,
        )
        .param(ParameterSpec::number("payment", "Payment per period").positive())
        .param(ParameterSpec::integer("periods", "Number of payments").min(1.0))
        .param(ParameterSpec::number("interest_rate", "Rate per period as a decimal").min(0.0)),
        OperationDescriptor::new(
            "loan_payment",
            "Loan payment",
            "Monthly payment of an amortized loan",
            loan_payment,
        )
        .param(ParameterSpec::number("loan_amount", "Loan principal").positive())
        .param(ParameterSpec::number("annual_rate", "Annual rate as a decimal").min(0.0))
        .param(ParameterSpec::number("years", "Loan term in years").positive()),
        OperationDescriptor::new(
            "net_present_value",
            "Net present value",
            "NPV of a series of end-of-period cash flows",
            net_present_value,
        )
        .param(ParameterSpec::number("initial_investment", "Initial outlay").positive())
        .param(ParameterSpec::numbers("cash_flows", "Cash flow of each period"))
        .param(ParameterSpec::number("discount_rate", "Discount rate as a decimal").positive()),
        OperationDescriptor::new(
            "internal_rate_of_return",
            "Internal rate of return",
            "Rate at which the NPV of the cash flows is zero",
            internal_rate_of_return,
        )
        .param(ParameterSpec::number("initial_investment", "Initial outlay").positive())
        .param(ParameterSpec::numbers("cash_flows", "Cash flow of each period"))
        .param(ParameterSpec::number("initial_guess", "Starting rate").default(0.1))
        .param(
            ParameterSpec::number("tolerance", "Convergence tolerance")
                .positive()
                .default(1e-6),
        )
        .param(
            ParameterSpec::integer("max_iterations", "Iteration cap")
                .min(1.0)
                .default(100),
        ),
        OperationDescriptor::new(
            "bond_price",
            "Bond price",
            "Theoretical price of a coupon bond",
            bond_price,
        )
        .param(ParameterSpec::number("face_value", "Face value").positive())
        .param(ParameterSpec::number("coupon_rate", "Annual coupon rate as a decimal").min(0.0))
        .param(ParameterSpec::number("market_rate", "Annual market rate as a decimal").positive())
        .param(ParameterSpec::number("years_to_maturity", "Years to maturity").positive())
        .param(
            ParameterSpec::integer("payments_per_year", "Coupon payments per year")
                .min(1.0)
                .default(1),
        ),
    ]
}

pub fn npv_at(initial: f64, flows: &[f64], rate: f64) -> f64 {
    flows
        .iter()
        .enumerate()
        .fold(-initial, |acc, (i, cf)| acc + cf / (1.0 + rate).powi(i as i32 + 1))
}

fn npv_slope(flows: &[f64], rate: f64) -> f64 {
    flows.iter().enumerate().fold(0.0, |acc, (i, cf)| {
        acc - (i as f64 + 1.0) * cf / (1.0 + rate).powi(i as i32 + 2)
    })
}

/// Newton iteration on the NPV, clamped at -99% per step
pub fn irr(
    initial: f64,
    flows: &[f64],
    guess: f64,
    tolerance: f64,
    max_iterations: u32,
) -> Computed<Root> {
    if flows.is_empty() {
        return Err(DomainError::Empty("Cash flow list"));
    }
    let mut rate = guess;
    for i in 0..max_iterations {
        let value = npv_at(initial, flows, rate);
        let slope = npv_slope(flows, rate);
        if slope.abs() < STALL_EPSILON {
            return Err(DomainError::DerivativeStalled { x: num(rate) });
        }
        let next = rate - value / slope;
        if (next - rate).abs() < tolerance {
            return Ok(Root {
                x: next,
                fx: npv_at(initial, flows, next),
                iterations: i + 1,
            });
        }
        rate = next.max(IRR_FLOOR);
    }
    Err(DomainError::NotConverged {
        method: "IRR calculation",
        iterations: max_iterations,
        last: percent(rate, 4),
    })
}

fn compound_interest(args: &Args) -> Result<Response> {
    let principal = args.number("principal")?;
    let rate = args.number("annual_rate")?;
    let years = args.number("periods")?;
    let freq = args.integer("compounding_frequency")? as f64;

    let growth = 1.0 + rate / freq;
    let future = principal * growth.powf(freq * years);
    let effective = growth.powf(freq) - 1.0;

    Ok(Response::success(format!(
        "Compound interest result:\n\
         Principal: {}\n\
         Annual rate: {}\n\
         Term: {} years\n\
         Compounding: {} times per year\n\
         Effective annual rate: {}\n\
         Future value: {}\n\
         Total interest: {}",
        fixed(principal, 2),
        percent(rate, 2),
        num(years),
        freq,
        percent(effective, 4),
        fixed(future, 2),
        fixed(future - principal, 2)
    )))
}

fn present_value_annuity(args: &Args) -> Result<Response> {
    let payment = args.number("payment")?;
    let periods = args.integer("periods")?;
    let rate = args.number("interest_rate")?;
    let total = payment * periods as f64;

    if rate == 0.0 {
        return Ok(Response::success(format!(
            "Present value of annuity (zero rate):\nPayment: {}\nPeriods: {}\nPresent value: {}",
            fixed(payment, 2),
            periods,
            fixed(total, 2)
        )));
    }

    let pv = payment * (1.0 - (1.0 + rate).powf(-(periods as f64))) / rate;
    Ok(Response::success(format!(
        "Present value of annuity:\n\
         Payment: {}\n\
         Periods: {}\n\
         Rate per period: {}\n\
         Present value: {}\n\
         Total payments: {}\n\
         Discount: {}",
        fixed(payment, 2),
        periods,
        percent(rate, 4),
        fixed(pv, 2),
        fixed(total, 2),
        fixed(total - pv, 2)
    )))
}

fn future_value_annuity(args: &Args) -> Result<Response> {
    let payment = args.number("payment")?;
    let periods = args.integer("periods")?;
    let rate = args.number("interest_rate")?;
    let total = payment * periods as f64;

    if rate == 0.0 {
        return Ok(Response::success(format!(
            "Future value of annuity (zero rate):\nPayment: {}\nPeriods: {}\nFuture value: {}",
            fixed(payment, 2),
            periods,
            fixed(total, 2)
        )));
    }

    let fv = payment * ((1.0 + rate).powf(periods as f64) - 1.0) / rate;
    Ok(Response::success(format!(
        "Future value of annuity:\n\
         Payment: {}\n\
         Periods: {}\n\
         Rate per period: {}\n\
         Future value: {}\n\
         Total payments: {}\n\
         Interest earned: {}",
        fixed(payment, 2),
        periods,
        percent(rate, 4),
        fixed(fv, 2),
        fixed(total, 2),
        fixed(fv - total, 2)
    )))
}

pub fn monthly_payment(amount: f64, annual_rate: f64, years: f64) -> f64 {
    let r = annual_rate / 12.0;
    let n = years * 12.0;
    if r == 0.0 {
        return amount / n;
    }
    let g = (1.0 + r).powf(n);
    amount * (r * g) / (g - 1.0)
}

fn loan_payment(args: &Args) -> Result<Response> {
    let amount = args.number("loan_amount")?;
    let rate = args.number("annual_rate")?;
    let years = args.number("years")?;
    let monthly = monthly_payment(amount, rate, years);
    let months = years * 12.0;

    if rate == 0.0 {
        return Ok(Response::success(format!(
            "Loan payment (zero rate):\nLoan amount: {}\nTerm: {} years\nMonthly payment: {}\nTotal repaid: {}",
            fixed(amount, 2),
            num(years),
            fixed(monthly, 2),
            fixed(amount, 2)
        )));
    }

    let total = monthly * months;
    Ok(Response::success(format!(
        "Loan payment:\n\
         Loan amount: {}\n\
         Annual rate: {}\n\
         Term: {} years ({} payments)\n\
         Monthly payment: {}\n\
         Total repaid: {}\n\
         Total interest: {}",
        fixed(amount, 2),
        percent(rate, 4),
        num(years),
        num(months),
        fixed(monthly, 2),
        fixed(total, 2),
        fixed(total - amount, 2)
    )))
}

fn net_present_value(args: &Args) -> Result<Response> {
    let initial = args.number("initial_investment")?;
    let flows = args.numbers("cash_flows")?;
    let rate = args.number("discount_rate")?;
    if flows.is_empty() {
        return Err(DomainError::Empty("Cash flow list").into());
    }

    let mut present = 0.0;
    let mut breakdown = Vec::with_capacity(flows.len());
    for (i, cf) in flows.iter().enumerate() {
        let period = i + 1;
        let pv = cf / (1.0 + rate).powi(period as i32);
        present += pv;
        breakdown.push(format!(
            "Period {}: {} / (1 + {})^{} = {}",
            period,
            fixed(*cf, 2),
            percent(rate, 2),
            period,
            fixed(pv, 2)
        ));
    }
    let npv = present - initial;
    let verdict = if npv > 0.0 {
        "Accept (NPV > 0)"
    } else {
        "Reject (NPV ≤ 0)"
    };

    Ok(Response::success(format!(
        "Net present value:\n\
         Initial investment: {}\n\
         Discount rate: {}\n\
         Discounted cash flows:\n{}\n\
         Present value of cash flows: {}\n\
         NPV: {}\n\
         Profitability index: {}\n\
         Recommendation: {}",
        fixed(initial, 2),
        percent(rate, 2),
        breakdown.join("\n"),
        fixed(present, 2),
        fixed(npv, 2),
        fixed(present / initial, 4),
        verdict
    )))
}

fn internal_rate_of_return(args: &Args) -> Result<Response> {
    let initial = args.number("initial_investment")?;
    let flows = args.numbers("cash_flows")?;
    let cap = u32::try_from(args.integer("max_iterations")?).unwrap_or(u32::MAX);
    let root = irr(
        initial,
        &flows,
        args.number("initial_guess")?,
        args.number("tolerance")?,
        cap,
    )?;
    let verdict = if root.x > 0.0 {
        "Accept (IRR > 0)"
    } else {
        "Reject (IRR ≤ 0)"
    };
    Ok(Response::success(format!(
        "Internal rate of return:\nIRR: {}\nIterations: {}\nNPV check: {}\nRecommendation: {}",
        percent(root.x, 4),
        root.iterations,
        fixed(root.fx, 6),
        verdict
    )))
}

fn bond_price(args: &Args) -> Result<Response> {
    let face = args.number("face_value")?;
    let coupon_rate = args.number("coupon_rate")?;
    let market_rate = args.number("market_rate")?;
    let years = args.number("years_to_maturity")?;
    let per_year = args.integer("payments_per_year")? as f64;

    let periods = years * per_year;
    let period_rate = market_rate / per_year;
    let coupon = face * coupon_rate / per_year;
    let coupon_pv = if coupon > 0.0 {
        coupon * (1.0 - (1.0 + period_rate).powf(-periods)) / period_rate
    } else {
        0.0
    };
    let principal_pv = face / (1.0 + period_rate).powf(periods);
    let price = coupon_pv + principal_pv;
    // Classify on the rounded cents so float noise at par reads as par
    let premium = ((price - face) * 100.0).round() / 100.0;
    let label = if premium > 0.0 {
        "(premium)"
    } else if premium < 0.0 {
        "(discount)"
    } else {
        "(par)"
    };

    Ok(Response::success(format!(
        "Bond price:\n\
         Face value: {}\n\
         Coupon rate: {}\n\
         Market rate: {}\n\
         Years to maturity: {}\n\
         Payments per year: {}\n\
         Coupon per period: {}\n\
         Present value of coupons: {}\n\
         Present value of principal: {}\n\
         Bond price: {}\n\
         Premium/discount: {} {}\n\
         Yield to maturity: {}",
        fixed(face, 2),
        percent(coupon_rate, 4),
        percent(market_rate, 4),
        num(years),
        per_year,
        fixed(coupon, 2),
        fixed(coupon_pv, 2),
        fixed(principal_pv, 2),
        fixed(price, 2),
        fixed(premium, 2),
        label,
        percent(market_rate, 4)
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
    fn test_compound_interest() {
        let r = call(
            "compound_interest",
            json!({"principal": 1000, "annual_rate": 0.05, "periods": 10}),
        )
        .unwrap();
        assert!(r.text().contains("Future value: 1628.89"));
        assert!(r.text().contains("Effective annual rate: 5.0000%"));
    }

    #[test]
    fn test_annuities() {
        let r = call(
            "present_value_annuity",
            json!({"payment": 100, "periods": 10, "interest_rate": 0.05}),
        )
        .unwrap();
        assert!(r.text().contains("Present value: 772.17"));
        let r = call(
            "future_value_annuity",
            json!({"payment": 100, "periods": 10, "interest_rate": 0.05}),
        )
        .unwrap();
        assert!(r.text().contains("Future value: 1257.79"));
        let r = call(
            "present_value_annuity",
            json!({"payment": 100, "periods": 10, "interest_rate": 0}),
        )
        .unwrap();
        assert!(r.text().contains("zero rate"));
    }

    #[test]
    fn test_loan_payment() {
        assert!((monthly_payment(200000.0, 0.06, 30.0) - 1199.10).abs() < 0.01);
        assert_eq!(monthly_payment(1200.0, 0.0, 1.0), 100.0);
    }

    #[test]
    fn test_npv_report() {
        let r = call(
            "net_present_value",
            json!({"initial_investment": 1000, "cash_flows": [500, 500, 500], "discount_rate": 0.1}),
        )
        .unwrap();
        assert!(r.text().contains("NPV: 243.43"));
        assert!(r.text().contains("Accept"));
        assert!(call(
            "net_present_value",
            json!({"initial_investment": 1000, "cash_flows": [], "discount_rate": 0.1}),
        )
        .is_err());
    }

    #[test]
    fn test_irr_zeroes_npv() {
        let root = irr(1000.0, &[500.0, 500.0, 500.0], 0.1, 1e-6, 100).unwrap();
        assert!((root.x - 0.2338).abs() < 1e-3);
        assert!(npv_at(1000.0, &[500.0, 500.0, 500.0], root.x).abs() < 1e-6);
    }

    #[test]
    fn test_irr_empty_flows() {
        assert_eq!(
            irr(1000.0, &[], 0.1, 1e-6, 100),
            Err(DomainError::Empty("Cash flow list"))
        );
    }

    #[test]
    fn test_irr_clamped_guess_stays_finite() {
        match irr(1000.0, &[1.0], -0.5, 1e-6, 100) {
            Ok(root) => assert!(root.x.is_finite()),
            Err(DomainError::NotConverged { last, .. }) => assert_eq!(last, "-99.0000%"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_irr_iteration_cap() {
        assert!(matches!(
            irr(1000.0, &[500.0, 500.0, 500.0], 5.0, 1e-12, 1),
            Err(DomainError::NotConverged { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_irr_zero_flows_stall() {
        assert!(matches!(
            irr(1000.0, &[0.0, 0.0], 0.1, 1e-6, 100),
            Err(DomainError::DerivativeStalled { .. })
        ));
    }

    #[test]
    fn test_bond_at_par() {
        let r = call(
            "bond_price",
            json!({"face_value": 1000, "coupon_rate": 0.05, "market_rate": 0.05, "years_to_maturity": 10}),
        )
        .unwrap();
        assert!(r.text().contains("Bond price: 1000.00"));

        let r = call(
            "bond_price",
            json!({"face_value": 1000, "coupon_rate": 0.07, "market_rate": 0.07,
                   "years_to_maturity": 7, "payments_per_year": 4}),
        )
        .unwrap();
        assert!(r.text().contains("Premium/discount: 0.00 (par)"));
        assert!(!r.text().contains("-0.00"));
    }

    #[test]
    fn test_bond_discount() {
        let r = call(
            "bond_price",
            json!({"face_value": 1000, "coupon_rate": 0.03, "market_rate": 0.05, "years_to_maturity": 10}),
        )
        .unwrap();
        assert!(r.text().contains("(discount)"));
    }
}
