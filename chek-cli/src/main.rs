use anyhow::{Context, Result, anyhow};
use chek_core::link::DATE_FORMAT;
use chek_core::{
    ChekError, JsonFileStore, LinkStatus, Outcome, Period, RecordStore, accept_link, parse_receipt_date,
    process_period, select,
};
use chek_scrape::{ReceiptClient, ScrapeProcessor, SpreadsheetExport};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

mod config;
mod state;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(name = "chek", version, about = "Keep receipt links and scrape their items into a spreadsheet")]
struct Cli {
    /// Log batch progress (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a receipt link (cabinet.tax.gov.ua, Silpo or Fora)
    Add {
        url: String,
    },

    /// Scrape stored receipts dated within a period and export their items
    Process {
        /// today, yesterday, last-week or last-month (default: today)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        period: Option<Period>,

        /// First day, DD.MM.YYYY or YYYY-MM-DD
        #[arg(long, value_parser = parse_day)]
        from: Option<NaiveDate>,

        /// Last day (inclusive), DD.MM.YYYY or YYYY-MM-DD
        #[arg(long, value_parser = parse_day)]
        to: Option<NaiveDate>,

        /// Only list the links that would be processed
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// List stored links
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Manage ~/.chek/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum StatusArg {
    Pending,
    Done,
}

impl From<StatusArg> for LinkStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Pending => LinkStatus::Pending,
            StatusArg::Done => LinkStatus::Done,
        }
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_receipt_date(s)
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| format!("invalid date '{s}' (expected DD.MM.YYYY)"))
}

/// Inclusive range from either a named period or explicit bounds.
/// `--from` alone runs up to today; `--to` alone selects that single day.
fn resolve_range(
    period: Option<Period>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    match (from, to) {
        (Some(start), end) => (start, end.unwrap_or(today)),
        (None, Some(end)) => (end, end),
        (None, None) => period.unwrap_or(Period::Today).bounds(today),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Add { url } => {
            let cfg = load_config()?;
            add_link(&cfg, &url).await?;
        }

        Command::Process {
            period,
            from,
            to,
            dry_run,
        } => {
            let cfg = load_config()?;
            let (start, end) = resolve_range(period, from, to, cfg.today()?);
            if dry_run {
                preview(&cfg, start, end)?;
            } else {
                process(&cfg, start, end).await?;
            }
        }

        Command::List { status } => {
            let cfg = load_config()?;
            list(&cfg, status.map(LinkStatus::from))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn open_store(cfg: &Config) -> Result<JsonFileStore> {
    Ok(JsonFileStore::new(cfg.links_path()?))
}

async fn add_link(cfg: &Config, url: &str) -> Result<()> {
    let store = open_store(cfg)?;
    let client = ReceiptClient::new(&cfg.client_options())?;

    let record = accept_link(&store, &client, url)
        .await
        .map_err(|e| add_error(e, url))?;

    println!("Link added");
    println!("Type: {} ({})", record.link_type.label(), record.link_type.code());
    println!("Date: {}", record.date_str);
    Ok(())
}

/// Rejections are reported as-is; date and storage failures keep their cause chain.
fn add_error(e: ChekError, url: &str) -> anyhow::Error {
    if e.is_rejection() {
        anyhow!("{e}")
    } else {
        anyhow::Error::new(e).context(format!("could not add {}", url.trim()))
    }
}

fn preview(cfg: &Config, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let store = open_store(cfg)?;
    let records = store.load_all()?;
    let selection = select(start, end, &records);

    println!("# Links dated {} ..= {}\n", start.format(DATE_FORMAT), end.format(DATE_FORMAT));
    for url in &selection.urls {
        println!("- {url}");
    }
    for url in &selection.unparseable {
        println!("- (skipped, unreadable date) {url}");
    }
    println!("\n{} selected", selection.urls.len());
    Ok(())
}

async fn process(cfg: &Config, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let store = open_store(cfg)?;
    let client = ReceiptClient::new(&cfg.client_options())?;
    let export = SpreadsheetExport::new(cfg.export_path()?);
    let mut processor = ScrapeProcessor::new(client, export);

    println!(
        "Processing receipts dated {} ..= {}",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    );

    let report = process_period(&store, &mut processor, start, end)
        .await
        .with_context(|| format!("updating {}", store.path().display()))?;

    for (url, outcome) in &report.entries {
        match outcome {
            Outcome::Success => {}
            Outcome::NotReady => println!("Not formed yet, kept pending: {url}"),
            Outcome::Failed(reason) => println!("Failed, kept pending: {url}\n  {reason}"),
        }
    }
    for url in &report.unparseable {
        println!("Skipped (unreadable date): {url}");
    }

    println!(
        "\nProcessed: {} | Pending: {} | Total for period: {}",
        report.done(),
        report.pending(),
        report.total()
    );

    let out = processor.export().path();
    if out.exists() {
        println!("Spreadsheet: {}", out.display());
    }
    Ok(())
}

fn list(cfg: &Config, status: Option<LinkStatus>) -> Result<()> {
    let store = open_store(cfg)?;
    let records = store.load_all()?;

    let mut shown = 0;
    for (i, r) in records.iter().enumerate() {
        if status.is_some_and(|s| s != r.status) {
            continue;
        }
        let status_label = if r.is_done() { "done" } else { "pending" };
        println!(
            "{:>4}  {:<7}  {:<10}  {:<20}  {}",
            i + 1,
            status_label,
            r.link_type.label(),
            r.date_str,
            r.url
        );
        shown += 1;
    }

    let pending = records.iter().filter(|r| !r.is_done()).count();
    println!(
        "\n{} shown | {} stored ({} pending) in {}",
        shown,
        records.len(),
        pending,
        store.path().display()
    );
    Ok(())
}
