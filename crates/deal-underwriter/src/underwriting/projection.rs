use super::domain::{round2, GlobalAssumptions, PropertyInput, YearProjection};
use super::metrics::{ratio_percent, DealFigures};

pub const PROJECTION_YEARS: u32 = 5;

/// Five-year timeline together with its unrounded closing totals.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveYearProjection {
    pub timeline: Vec<YearProjection>,
    pub total_cash_flow: f64,
    pub equity_built: f64,
    pub total_roi_percent: f64,
}

/// Accumulates cash flow and equity (principal paydown plus an even slice of the
/// five-year appreciation) over [`PROJECTION_YEARS`] years.
///
/// Annual cash flow is held flat; rent growth is not modelled.
pub fn project(
    property: &PropertyInput,
    figures: &DealFigures,
    assumptions: &GlobalAssumptions,
) -> FiveYearProjection {
    let appreciation_rate = assumptions.default_appreciation_rate_percent / 100.0;
    let base_value = property.base_value();
    let annual_cash_flow = figures.annual_cash_flow();

    let mut timeline = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_cash_flow = 0.0;
    let mut cumulative_equity = 0.0;
    let mut cumulative_roi_percent = 0.0;

    for year in 1..=PROJECTION_YEARS {
        let value_this_year = base_value * (1.0 + appreciation_rate).powi(year as i32);
        let appreciation_slice = (value_this_year - base_value) / f64::from(PROJECTION_YEARS);
        let equity_this_year = figures.loan.principal_paid_in_year(year) + appreciation_slice;

        cumulative_cash_flow += annual_cash_flow;
        cumulative_equity += equity_this_year;
        cumulative_roi_percent = ratio_percent(
            cumulative_cash_flow + cumulative_equity,
            figures.total_cash_invested,
        );

        timeline.push(YearProjection {
            year,
            cash_flow_this_year: round2(annual_cash_flow),
            equity_this_year: round2(equity_this_year),
            cumulative_cash_flow: round2(cumulative_cash_flow),
            cumulative_equity: round2(cumulative_equity),
            cumulative_roi_percent: round2(cumulative_roi_percent),
        });
    }

    FiveYearProjection {
        timeline,
        total_cash_flow: cumulative_cash_flow,
        equity_built: cumulative_equity,
        total_roi_percent: cumulative_roi_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::metrics::calculate;

    fn cash_purchase() -> PropertyInput {
        PropertyInput {
            id: "cash".to_string(),
            nickname: "Cash deal".to_string(),
            list_price: 200_000.0,
            estimated_rent: 2_000.0,
            property_tax_per_year: 2_400.0,
            insurance_per_year: 1_200.0,
            maintenance_per_month: 100.0,
            utilities_per_month: 100.0,
            vacancy_rate_percent: 5.0,
            down_payment_percent: 100.0,
            loan_term_years: 30,
            interest_rate_percent: 6.0,
            ..PropertyInput::default()
        }
    }

    #[test]
    fn timeline_has_five_ascending_years() {
        let property = cash_purchase();
        let projection = project(
            &property,
            &calculate(&property),
            &GlobalAssumptions::default(),
        );

        let years: Vec<u32> = projection.timeline.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn cash_flow_stays_flat_and_accumulates() {
        let property = cash_purchase();
        let figures = calculate(&property);
        let projection = project(&property, &figures, &GlobalAssumptions::default());

        let annual = round2(figures.annual_cash_flow());
        for row in &projection.timeline {
            assert_eq!(row.cash_flow_this_year, annual);
        }
        let last = projection.timeline.last().expect("five rows");
        assert_eq!(last.cumulative_cash_flow, round2(figures.annual_cash_flow() * 5.0));
        assert!((projection.total_cash_flow - figures.annual_cash_flow() * 5.0).abs() < 1e-6);
    }

    #[test]
    fn appreciation_is_spread_evenly_without_loan() {
        let property = cash_purchase();
        let figures = calculate(&property);
        let assumptions = GlobalAssumptions {
            default_appreciation_rate_percent: 3.0,
            ..GlobalAssumptions::default()
        };

        let projection = project(&property, &figures, &assumptions);

        // No loan: equity is appreciation only, each year adds a fifth of the gain to date.
        let first = &projection.timeline[0];
        assert_eq!(first.equity_this_year, round2(200_000.0 * 0.03 / 5.0));
        let expected_total: f64 = (1..=5)
            .map(|year| (200_000.0 * 1.03_f64.powi(year) - 200_000.0) / 5.0)
            .sum();
        assert!((projection.equity_built - expected_total).abs() < 1e-6);
    }

    #[test]
    fn principal_paydown_adds_equity() {
        let leveraged = PropertyInput {
            down_payment_percent: 20.0,
            ..cash_purchase()
        };
        let figures = calculate(&leveraged);
        let flat_market = GlobalAssumptions {
            default_appreciation_rate_percent: 0.0,
            ..GlobalAssumptions::default()
        };

        let projection = project(&leveraged, &figures, &flat_market);

        let paid_down = figures.loan.principal - figures.loan.balance_after(60);
        assert!((projection.equity_built - paid_down).abs() < 1e-6);
        assert!(projection.timeline[4].equity_this_year > projection.timeline[0].equity_this_year);
    }

    #[test]
    fn cumulative_roi_matches_final_totals() {
        let property = PropertyInput {
            down_payment_percent: 25.0,
            closing_costs: 6_000.0,
            ..cash_purchase()
        };
        let figures = calculate(&property);
        let projection = project(&property, &figures, &GlobalAssumptions::default());

        let expected = (projection.total_cash_flow + projection.equity_built)
            / figures.total_cash_invested
            * 100.0;
        assert!((projection.total_roi_percent - expected).abs() < 1e-9);
        assert_eq!(
            projection.timeline[4].cumulative_roi_percent,
            round2(projection.total_roi_percent)
        );
    }

    #[test]
    fn zero_cash_invested_reports_zero_roi() {
        let property = PropertyInput {
            down_payment_percent: 0.0,
            ..cash_purchase()
        };
        let figures = calculate(&property);

        let projection = project(&property, &figures, &GlobalAssumptions::default());

        assert_eq!(projection.total_roi_percent, 0.0);
        assert!(projection
            .timeline
            .iter()
            .all(|row| row.cumulative_roi_percent == 0.0));
    }
}
