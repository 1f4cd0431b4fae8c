//! Fixed-rate, level-payment loan math.

const MONTHS_PER_YEAR: u32 = 12;

/// Monthly payment for a fully amortizing fixed-rate loan.
///
/// Returns `0.0` when the principal is not positive or the term is zero, and falls back
/// to straight-line repayment when the rate is zero. Terms long enough that the growth
/// factor overflows `f64` converge to the interest-only payment.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    let payments = scheduled_payments(term_years);
    if rate == 0.0 {
        return principal / payments;
    }

    let factor = (1.0 + rate).powf(payments);
    if !factor.is_finite() {
        return principal * rate;
    }
    principal * rate * factor / (factor - 1.0)
}

/// Outstanding principal after `payments_made` scheduled payments, floored at zero.
pub fn remaining_balance(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    payments_made: u32,
) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    let total_payments = scheduled_payments(term_years);
    let made = f64::from(payments_made);
    if made >= total_payments {
        return 0.0;
    }
    if rate == 0.0 {
        return (principal - (principal / total_payments) * made).max(0.0);
    }

    let factor = (1.0 + rate).powf(total_payments);
    if !factor.is_finite() {
        return principal;
    }
    let balance = principal * (factor - (1.0 + rate).powf(made)) / (factor - 1.0);
    balance.max(0.0)
}

fn scheduled_payments(term_years: u32) -> f64 {
    f64::from(term_years) * f64::from(MONTHS_PER_YEAR)
}

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / f64::from(MONTHS_PER_YEAR)
}

/// Loan terms bundled for repeated balance lookups across a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateLoan {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl FixedRateLoan {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(self.principal, self.annual_rate_percent, self.term_years)
    }

    pub fn balance_after(&self, payments_made: u32) -> f64 {
        remaining_balance(
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            payments_made,
        )
    }

    /// Principal retired between the end of `year - 1` and the end of `year`.
    pub fn principal_paid_in_year(&self, year: u32) -> f64 {
        let start = self.balance_after(year.saturating_sub(1).saturating_mul(MONTHS_PER_YEAR));
        let end = self.balance_after(year.saturating_mul(MONTHS_PER_YEAR));
        (start - end).max(0.0)
    }
}
