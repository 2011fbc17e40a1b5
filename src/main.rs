use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riskline::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskline")]
#[command(about = "A Rust-based client for the RiskModels factor-risk API", long_about = None)]
struct Cli {
    //api key; falls back to RISKMODELS_API_KEY, then to the config file
    #[arg(long, global = true)]
    api_key: Option<String>,

    //api base url override
    #[arg(long, global = true)]
    base_url: Option<String>,

    //optional json config file with api_key and base_url
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //latest hedge ratios for a single ticker
    Hedge {
        //ticker to hedge (eg nvda, aapl)
        #[arg(long)]
        ticker: String,

        //lookback window in years
        #[arg(long, default_value = "1")]
        years: u32,
    },

    //weighted hedge-ratio rollup for a portfolio
    Portfolio {
        //positions file: csv (ticker,weight) or json ({"AAPL": 0.25})
        #[arg(long)]
        positions: PathBuf,

        //lookback window in years
        #[arg(long, default_value = "1")]
        years: u32,
    },

    //monthly factor risk attribution
    Attribution {
        //single ticker for the monthly table
        #[arg(long)]
        ticker: Option<String>,

        //comma-separated tickers for the portfolio-level summary table
        #[arg(long, value_delimiter = ',')]
        tickers: Vec<String>,

        //market factor etf
        #[arg(long, default_value = "SPY")]
        market_etf: String,

        //months shown in the single-ticker table
        #[arg(long, default_value = "12")]
        months: usize,
    },

    //cumulative compound return series, written as csv
    Chart {
        //ticker to chart
        #[arg(long)]
        ticker: String,

        //lookback window in years (1, 3, 5, or 15)
        #[arg(long, default_value = "3")]
        years: u32,

        //output path for the chart series csv
        #[arg(long)]
        output: PathBuf,
    },

    //live risk metric snapshot per position
    Metrics {
        //positions file: csv (ticker,weight) or json
        #[arg(long)]
        positions: Option<PathBuf>,

        //comma-separated tickers (unweighted)
        #[arg(long, value_delimiter = ',')]
        tickers: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = build_client(cli.api_key, cli.base_url, cli.config)?;

    match cli.command {
        Commands::Hedge { ticker, years } => run_hedge(&client, &ticker, years)?,
        Commands::Portfolio { positions, years } => run_portfolio(&client, &positions, years)?,
        Commands::Attribution {
            ticker,
            tickers,
            market_etf,
            months,
        } => run_attribution(&client, ticker, tickers, &market_etf, months)?,
        Commands::Chart {
            ticker,
            years,
            output,
        } => run_chart(&client, &ticker, years, &output)?,
        Commands::Metrics { positions, tickers } => run_metrics(&client, positions, tickers)?,
    }

    Ok(())
}

//resolution order: flag, environment, config file
fn build_client(
    api_key: Option<String>,
    base_url: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<RiskModelsClient> {
    let config = match &config_path {
        Some(path) => Some(
            ApiConfig::from_json_file(path)
                .context(format!("Failed to load config from {:?}", path))?,
        ),
        None => None,
    };

    let api_key = api_key
        .or_else(|| std::env::var("RISKMODELS_API_KEY").ok())
        .or_else(|| {
            config
                .as_ref()
                .map(|c| c.api_key.clone())
                .filter(|key| !key.is_empty())
        })
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key: pass --api-key, set RISKMODELS_API_KEY, or provide --config"
            )
        })?;

    let base_url = base_url
        .or_else(|| config.map(|c| c.base_url))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(RiskModelsClient::new(base_url, api_key))
}

fn load_portfolio(path: &PathBuf) -> Result<Portfolio> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Portfolio::from_json_file(path)
    } else {
        Portfolio::from_csv_file(path)
    }
}

fn run_hedge(client: &RiskModelsClient, ticker: &str, years: u32) -> Result<()> {
    println!("Riskline — hedge a single stock");
    println!("================================\n");

    let report = riskline::commands::hedge::run(client, ticker, years)
        .context(format!("Failed to fetch returns for {}", ticker))?;
    report.pretty_print();

    Ok(())
}

fn run_portfolio(client: &RiskModelsClient, positions: &PathBuf, years: u32) -> Result<()> {
    println!("Riskline — hedge a portfolio");
    println!("=============================\n");

    let portfolio = load_portfolio(positions)?;
    println!("Loaded {} positions from {:?}\n", portfolio.len(), positions);

    let report = riskline::commands::portfolio::run(client, &portfolio, years)
        .context("Batch analysis failed")?;
    report.pretty_print();

    Ok(())
}

fn run_attribution(
    client: &RiskModelsClient,
    ticker: Option<String>,
    tickers: Vec<String>,
    market_etf: &str,
    months: usize,
) -> Result<()> {
    println!("Riskline — factor risk attribution");
    println!("===================================\n");

    match (ticker, tickers.as_slice()) {
        (Some(ticker), []) => {
            let report = riskline::commands::attribution::single(client, &ticker, market_etf)
                .context(format!("Failed to fetch decomposition for {}", ticker))?;
            report.pretty_print(months);
        }
        (None, [_, ..]) => {
            let report = riskline::commands::attribution::multi(client, &tickers, market_etf);
            if report.summaries.is_empty() {
                anyhow::bail!("No ticker returned usable decomposition data");
            }
            report.pretty_print();
        }
        _ => anyhow::bail!("Pass exactly one of --ticker or --tickers"),
    }

    Ok(())
}

fn run_chart(client: &RiskModelsClient, ticker: &str, years: u32, output: &PathBuf) -> Result<()> {
    println!("Riskline — precision hedge chart");
    println!("=================================\n");

    let report = riskline::commands::chart::run(client, ticker, years)?;

    save_chart_csv(&report, output)?;
    println!("Chart series saved to {:?}\n", output);

    report.print_summary();

    Ok(())
}

fn run_metrics(
    client: &RiskModelsClient,
    positions: Option<PathBuf>,
    tickers: Vec<String>,
) -> Result<()> {
    println!("Riskline — live risk metrics");
    println!("=============================\n");

    let entries: Vec<(String, Option<f64>)> = match (positions, tickers.as_slice()) {
        (Some(path), []) => {
            let portfolio = load_portfolio(&path)?;
            portfolio
                .iter()
                .map(|(ticker, weight)| (ticker.clone(), Some(weight)))
                .collect()
        }
        (None, [_, ..]) => tickers.iter().map(|t| (t.clone(), None)).collect(),
        _ => anyhow::bail!("Pass exactly one of --positions or --tickers"),
    };

    let report = riskline::commands::metrics::run(client, &entries);
    if report.rows.is_empty() {
        anyhow::bail!("No ticker returned metrics");
    }
    report.pretty_print();

    Ok(())
}

fn save_chart_csv(report: &ChartReport, path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,cum_stock,cum_market,cum_sector,cum_subsector")?;

    for point in &report.points {
        writeln!(
            file,
            "{},{},{},{},{}",
            point.date, point.stock, point.market, point.sector, point.subsector
        )?;
    }

    Ok(())
}
