//! EMI (equated monthly installment) affordability math
//!
//! Standard amortization: EMI = P * r * (1+r)^n / ((1+r)^n - 1) with
//! r the monthly rate and n the tenure in months. All functions are
//! pure and total; degenerate inputs produce zeros, never panics.

/// Full cost breakdown for a loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiBreakdown {
    /// Payment due each month
    pub monthly_payment: f64,
    /// Total paid over the full tenure
    pub total_payment: f64,
    /// Interest component of the total
    pub total_interest: f64,
}

/// Compute the monthly payment for a loan.
///
/// `annual_rate_pct` is the nominal annual rate in percent (e.g. 8.5
/// for 8.5%). A zero or negative rate degrades to straight division
/// of the principal; a zero tenure yields 0.0.
pub fn monthly_payment(principal: u64, annual_rate_pct: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }

    let principal = principal as f64;
    let months = f64::from(tenure_months);

    if !annual_rate_pct.is_finite() || annual_rate_pct <= 0.0 {
        return principal / months;
    }

    let monthly_rate = annual_rate_pct / 12.0 / 100.0;
    let growth = (1.0 + monthly_rate).powf(months);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Compute the monthly payment along with totals over the tenure.
pub fn emi_breakdown(principal: u64, annual_rate_pct: f64, tenure_months: u32) -> EmiBreakdown {
    let monthly = monthly_payment(principal, annual_rate_pct, tenure_months);
    let total_payment = monthly * f64::from(tenure_months);
    let total_interest = (total_payment - principal as f64).max(0.0);

    EmiBreakdown {
        monthly_payment: monthly,
        total_payment,
        total_interest,
    }
}
