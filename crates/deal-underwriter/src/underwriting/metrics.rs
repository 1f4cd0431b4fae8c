use super::amortization::FixedRateLoan;
use super::domain::PropertyInput;

/// Unrounded operating and financing figures for a defaulted property.
///
/// Everything downstream (projection, published metrics) reads from this struct so the
/// rounding to two decimals happens exactly once, at publication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealFigures {
    pub loan: FixedRateLoan,
    pub monthly_mortgage_payment: f64,
    pub vacancy_reserve: f64,
    pub monthly_operating_expenses: f64,
    pub monthly_noi: f64,
    pub monthly_cash_flow: f64,
    pub cap_rate_percent: f64,
    pub total_cash_invested: f64,
    pub cash_on_cash_return_percent: f64,
}

impl DealFigures {
    pub fn loan_amount(&self) -> f64 {
        self.loan.principal
    }

    pub fn annual_cash_flow(&self) -> f64 {
        self.monthly_cash_flow * 12.0
    }
}

/// Computes loan payment, NOI, cash flow, cap rate and cash-on-cash return.
pub fn calculate(property: &PropertyInput) -> DealFigures {
    let loan = FixedRateLoan::new(
        property.loan_amount(),
        property.interest_rate_percent,
        property.loan_term_years,
    );
    let monthly_mortgage_payment = loan.monthly_payment();

    let vacancy_reserve = property.estimated_rent * (property.vacancy_rate_percent / 100.0);
    let monthly_operating_expenses = (property.property_tax_per_year
        + property.insurance_per_year
        + property.hoa_per_year)
        / 12.0
        + property.maintenance_per_month
        + property.utilities_per_month
        + vacancy_reserve;

    let monthly_noi = property.estimated_rent - monthly_operating_expenses;
    let monthly_cash_flow = monthly_noi - monthly_mortgage_payment;

    let cap_rate_percent = ratio_percent(monthly_noi * 12.0, property.list_price);
    let total_cash_invested = property.total_cash_invested();
    let cash_on_cash_return_percent = ratio_percent(monthly_cash_flow * 12.0, total_cash_invested);

    DealFigures {
        loan,
        monthly_mortgage_payment,
        vacancy_reserve,
        monthly_operating_expenses,
        monthly_noi,
        monthly_cash_flow,
        cap_rate_percent,
        total_cash_invested,
        cash_on_cash_return_percent,
    }
}

/// `numerator / denominator` as a percent, `0.0` when the denominator is zero.
pub(crate) fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
