use analytics::Insights;
use backtester::StrategyMetrics;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ConfigArgs, init_tracing, load_config};
use core_types::{ClassifierId, Period, ReportMode, Ticker};
use engine::{AnalysisResult, AnalysisService, ComparisonResult, StrategyReportResult};
use serde::Serialize;

/// The main entry point for the Lunar Markets application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the key may come from the environment or config.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.config.as_deref())?;
    let _guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(config).await?;
        }
        Commands::Series(args) => {
            let (service, ticker, period) = args.prepare(&mut config)?;
            let result = service.annotated_series(&ticker, &period, today()).await?;
            emit(args.json, &result, render_series)?;
        }
        Commands::Insights(args) => {
            let (service, ticker, period) = args.prepare(&mut config)?;
            let result = service.insights(&ticker, &period, today()).await?;
            emit(args.json, &result, |r| {
                render_insights(&r.ticker, &r.period, r.mock_data, &r.insights)
            })?;
        }
        Commands::Backtest(args) => {
            if let Some(mode) = args.mode {
                config.backtest.mode = mode.into();
            }
            let (service, ticker, period) = args.query.prepare(&mut config)?;
            let result = service.strategy_report(&ticker, &period, today()).await?;
            emit(args.query.json, &result, render_backtest)?;
        }
        Commands::Phase(args) => {
            let service = AnalysisService::new(&config, None);
            let date = args.date.unwrap_or_else(today);
            let phase = service.moon_phase(date, args.classifier);
            let mut table =
                new_table(vec!["Date", "Phase", "Illumination", "Cycle position", "Age (days)"]);
            table.add_row(vec![
                date.to_string(),
                phase.name.to_string(),
                format!("{:.1}%", phase.fraction * 100.0),
                format!("{:.3}", phase.phase_angle),
                format!("{:.1}", phase.age_days),
            ]);
            println!("{table}");
        }
        Commands::Compare(args) => {
            let (service, period) = args.period.prepare(&mut config)?;
            let tickers = args
                .tickers
                .iter()
                .map(|raw| Ticker::parse(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let result = service.compare(&tickers, &period, today()).await?;
            emit(args.json, &result, render_comparison)?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Charts stock prices against the phases of the moon.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Print the windowed daily series with the moon phase of each bar.
    Series(QueryArgs),
    /// Print phase returns and volatility for a ticker.
    Insights(QueryArgs),
    /// Compare the moon-swing strategies against buy-and-hold.
    Backtest(BacktestArgs),
    /// Print the moon phase of a single date.
    Phase(PhaseArgs),
    /// Compare the performance of up to five tickers.
    Compare(CompareArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,
    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args)]
struct PeriodArgs {
    /// One of 1M, 3M, 6M, 1Y, 5Y or CUSTOM.
    #[arg(long, default_value = Period::DEFAULT_TOKEN)]
    period: String,
    /// First day of a CUSTOM period (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of a CUSTOM period (YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Overrides `analysis.classifier` (astronomical or conway).
    #[arg(long)]
    classifier: Option<ClassifierId>,
}

impl PeriodArgs {
    fn prepare(&self, config: &mut Config) -> anyhow::Result<(AnalysisService, Period)> {
        if let Some(classifier) = self.classifier {
            config.analysis.classifier = classifier;
        }
        let period = Period::parse(&self.period, self.start, self.end)?;
        Ok((AnalysisService::from_config(config)?, period))
    }
}

#[derive(Args)]
struct QueryArgs {
    /// The stock symbol, e.g. "AAPL".
    #[arg(long)]
    ticker: String,
    #[command(flatten)]
    period: PeriodArgs,
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl QueryArgs {
    fn prepare(&self, config: &mut Config) -> anyhow::Result<(AnalysisService, Ticker, Period)> {
        let ticker = Ticker::parse(&self.ticker)?;
        let (service, period) = self.period.prepare(config)?;
        Ok((service, ticker, period))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Simulated,
    Illustrative,
}

impl From<ModeArg> for ReportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Simulated => ReportMode::Simulated,
            ModeArg::Illustrative => ReportMode::Illustrative,
        }
    }
}

#[derive(Args)]
struct BacktestArgs {
    #[command(flatten)]
    query: QueryArgs,
    /// Overrides `backtest.mode`.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

#[derive(Args)]
struct PhaseArgs {
    /// Defaults to today (UTC).
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    classifier: Option<ClassifierId>,
}

#[derive(Args)]
struct CompareArgs {
    /// Comma-separated symbols, e.g. "AAPL,TSLA,NVDA".
    #[arg(long, value_delimiter = ',', required = true)]
    tickers: Vec<String>,
    #[command(flatten)]
    period: PeriodArgs,
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Output
// ==============================================================================

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn emit<T: Serialize>(json: bool, value: &T, render: impl Fn(&T) -> Table) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn source_label(mock_data: bool) -> &'static str {
    if mock_data { "synthetic" } else { "alpha-vantage" }
}

fn render_series(result: &AnalysisResult) -> Table {
    println!(
        "{} over {} ({} data, {} classifier)",
        result.ticker,
        result.period,
        source_label(result.mock_data),
        result.classifier
    );
    let mut table = new_table(vec![
        "Date", "Open", "High", "Low", "Close", "Volume", "Phase", "Illumination",
    ]);
    for bar in &result.data {
        table.add_row(vec![
            bar.date().to_string(),
            format!("{:.2}", bar.bar.open),
            format!("{:.2}", bar.bar.high),
            format!("{:.2}", bar.bar.low),
            format!("{:.2}", bar.bar.close),
            bar.bar.volume.to_string(),
            bar.phase().to_string(),
            format!("{:.0}%", bar.moon_phase.fraction * 100.0),
        ]);
    }
    table
}

fn render_insights(
    ticker: &Ticker,
    period: &Period,
    mock_data: bool,
    insights: &Insights,
) -> Table {
    println!(
        "{ticker} over {period} ({} data): {}, {:?} volatility",
        source_label(mock_data),
        insights.correlation.describe(),
        insights.volatility_level
    );
    let mut table = new_table(vec!["Phase", "Days", "Avg return"]);
    for (phase, stats) in &insights.phase_returns {
        table.add_row(vec![
            phase.to_string(),
            stats.days.to_string(),
            format!("{:+.3}%", stats.avg_return),
        ]);
    }
    table.add_row(vec![
        "all".to_string(),
        insights.total_days_analyzed.to_string(),
        format!("volatility {:.3}%", insights.volatility_near_transitions),
    ]);
    table
}

fn render_backtest(result: &StrategyReportResult) -> Table {
    println!(
        "{} over {} ({} data, {} report)",
        result.ticker,
        result.period,
        source_label(result.mock_data),
        result.mode.as_str()
    );
    let mut table = new_table(vec![
        "Strategy", "Total", "Annualized", "Max DD", "Win rate", "Trades", "Sharpe",
    ]);
    for (strategy, metrics) in &result.strategies {
        table.add_row(metrics_row(strategy.as_str(), metrics));
    }
    table
}

fn metrics_row(name: &str, m: &StrategyMetrics) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{:+.2}%", m.total_return * 100.0),
        format!("{:+.2}%", m.annualized_return * 100.0),
        format!("{:.2}%", m.max_drawdown * 100.0),
        format!("{:.1}%", m.win_rate * 100.0),
        m.total_trades.to_string(),
        format!("{:.2}", m.sharpe_ratio),
    ]
}

fn render_comparison(result: &ComparisonResult) -> Table {
    let mut table = new_table(vec!["Ticker", "Total return", "Data"]);
    for performance in &result.performance {
        table.add_row(vec![
            performance.ticker.to_string(),
            format!("{:+.2}%", performance.total_return_pct),
            source_label(performance.mock_data).to_string(),
        ]);
    }
    table
}
