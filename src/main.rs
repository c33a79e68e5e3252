use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ugc_chart_data::config::Config;
use ugc_chart_data::dates::parse_date;
use ugc_chart_data::diagnostics::TracingDiagnostics;
use ugc_chart_data::importers::WorkbookLoader;
use ugc_chart_data::services::{ChartQuery, ChartService};

#[derive(Parser, Debug)]
#[command(name = "ugc-chart-data")]
#[command(about = "Extract ranked UGC post data from a chart workbook as JSON", long_about = None)]
struct Cli {
    /// Path to the chart workbook (.xlsx/.xls/.ods)
    #[arg(long, env = "WORKBOOK_PATH")]
    workbook: PathBuf,

    /// Reporting date whose YYYYMMDD sheet to read (default: latest sheet)
    #[arg(long, value_parser = parse_cli_date)]
    date: Option<NaiveDate>,

    /// First post date to include
    #[arg(long, value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    /// Last post date to include
    #[arg(long, value_parser = parse_cli_date)]
    to: Option<NaiveDate>,

    /// Number of accounts to rank (default: TOP_POSTS_LIMIT or 30)
    #[arg(long)]
    limit: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{value}', expected YYYY/MM/DD"))
}

#[instrument]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ugc_chart_data=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    info!("Starting chart extraction with config: {:?}", config);

    let loader = WorkbookLoader::new(cli.workbook.to_string_lossy());
    let service = ChartService::new(loader, config);

    let query = ChartQuery {
        report_date: cli.date,
        from: cli.from,
        to: cli.to,
        limit: cli.limit,
    };

    let chart = service.load_chart(&query, &TracingDiagnostics)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&chart)?
    } else {
        serde_json::to_string(&chart)?
    };
    println!("{json}");

    Ok(())
}
