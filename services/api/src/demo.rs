use crate::infra::InMemoryPropertyCatalog;
use chrono::Utc;
use clap::Args;
use deal_underwriter::config::AppConfig;
use deal_underwriter::error::AppError;
use deal_underwriter::request::{AnalysisRequest, AnalysisResponse, MAX_PROPERTIES};
use deal_underwriter::underwriting::commentary::format_currency;
use deal_underwriter::underwriting::{FinancingDefaults, PropertyAnalysisResult, PropertyCatalog};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON file shaped like the POST /api/v1/analyze payload
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Print the five-year timeline for every property
    #[arg(long)]
    pub(crate) timeline: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// ZIP code whose listings should be underwritten
    #[arg(long, default_value = "02118")]
    pub(crate) zip: String,
    /// Listings CSV export to use instead of the bundled samples
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let reader = BufReader::new(File::open(&args.request)?);
    let request: AnalysisRequest = serde_json::from_reader(reader)?;

    let response = request.execute(&config.underwriting.assumptions, Utc::now())?;
    print!("{}", render_report(&response, args.timeline));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { zip, listings_csv } = args;
    let config = AppConfig::load()?;
    let listings_csv = listings_csv.or(config.underwriting.listings_csv);

    let catalog = InMemoryPropertyCatalog::seeded(listings_csv.as_deref())?;
    let financing = FinancingDefaults::standard();
    let properties = catalog
        .find_by_zip(&zip)?
        .iter()
        .take(MAX_PROPERTIES)
        .map(|listing| listing.to_property_input(&financing))
        .collect();

    println!("Deal underwriting demo for ZIP {zip}");
    let request = AnalysisRequest {
        zip_code: zip,
        global_assumptions: None,
        properties,
    };
    let response = request.execute(&config.underwriting.assumptions, Utc::now())?;
    print!("{}", render_report(&response, true));
    Ok(())
}

pub(crate) fn render_report(response: &AnalysisResponse, include_timeline: bool) -> String {
    let mut lines = vec![response.meta.summary.clone()];

    for (rank, result) in response.results.iter().enumerate() {
        lines.push(String::new());
        lines.extend(render_result(rank + 1, result, include_timeline));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn render_result(rank: usize, result: &PropertyAnalysisResult, include_timeline: bool) -> Vec<String> {
    let property = &result.property;
    let metrics = &result.metrics;
    let mut lines = vec![
        format!(
            "#{rank} {} (score {:.2})",
            property.nickname, result.overall_score
        ),
        format!(
            "  Price {} | Rent {}/mo | Cash flow {}/mo",
            format_currency(property.list_price),
            format_currency(property.estimated_rent),
            format_currency(metrics.monthly_cash_flow)
        ),
        format!(
            "  Cap rate {:.2}% | Cash-on-cash {:.2}% | 5-yr ROI {:.2}%",
            metrics.cap_rate_percent,
            metrics.cash_on_cash_return_percent,
            metrics.five_year_total_roi_percent
        ),
        format!(
            "  Risk {} | Timing {}",
            metrics.risk_level, metrics.timing_recommendation
        ),
        format!("  {}", result.commentary.overall_summary),
        format!("  {}", result.commentary.market_timing_summary),
    ];
    lines.extend(
        result
            .commentary
            .key_bullets
            .iter()
            .map(|bullet| format!("    - {bullet}")),
    );

    if include_timeline {
        lines.push("  Year | Cash flow | Equity | Cumulative cash flow | Cumulative ROI".to_string());
        lines.extend(result.timeline.iter().map(|row| {
            format!(
                "  {:>4} | {} | {} | {} | {:.2}%",
                row.year,
                format_currency(row.cash_flow_this_year),
                format_currency(row.equity_this_year),
                format_currency(row.cumulative_cash_flow),
                row.cumulative_roi_percent
            )
        }));
    }

    lines
}
