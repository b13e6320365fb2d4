use anyhow::{Context, Result};
use bracescan::{build, BracketPair, Config, Document, Pass};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bracescan",
    version,
    about = "Locate brace imbalance in a text file"
)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lines of context on each side of a reported line
    #[arg(short, long)]
    radius: Option<usize>,

    /// Lines shown from the end when there is nothing to centre on
    #[arg(long)]
    tail: Option<usize>,

    /// How many leftover openers to list
    #[arg(long)]
    max_openers: Option<usize>,

    /// Bracket pair to check, e.g. "{}" or "()"
    #[arg(long, value_parser = parse_pair)]
    pair: Option<BracketPair>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Analysis to run
    #[arg(value_enum)]
    command: Command,

    /// File to analyse, or `-` for stdin
    path: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    /// Most negative running balance
    Min,
    /// Deepest running balance
    Max,
    /// First negative balance scanning from the end
    FromEnd,
    /// Exact positions of unmatched braces
    Unmatched,
    /// Running balance per line
    Trace,
    /// min, max, from-end and unmatched together
    All,
}

impl From<Command> for Pass {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Min => Pass::Min,
            Command::Max => Pass::Max,
            Command::FromEnd => Pass::FromEnd,
            Command::Unmatched => Pass::Unmatched,
            Command::Trace => Pass::Trace,
            Command::All => Pass::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_pair(s: &str) -> Result<BracketPair, String> {
    BracketPair::parse(s).ok_or_else(|| format!("expected two distinct characters, got {:?}", s))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            info!("Configuration loaded from {}", path.display());
            config
        }
        None => Config::default(),
    };

    if let Some(radius) = cli.radius {
        config.report.context_radius = radius;
    }
    if let Some(tail) = cli.tail {
        config.report.tail_lines = tail;
    }
    if let Some(max) = cli.max_openers {
        config.report.max_reported_openers = max;
    }
    if let Some(pair) = cli.pair {
        config.brackets = pair;
    }

    config.validate()?;
    Ok(config)
}

fn load_document(path: &Path) -> Result<Document> {
    if path.as_os_str() == "-" {
        let stdin = std::io::stdin();
        return Document::from_reader("<stdin>", stdin.lock()).context("Failed to read stdin");
    }
    Document::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!("Effective config: {:?}", config);

    let doc = load_document(&cli.path)?;
    info!("Scanning {} ({} lines) for {}", doc.source(), doc.len(), config.brackets);

    let report = build(&doc, cli.command.into(), &config);
    if report.has_findings() {
        info!("{}: imbalance detected", doc.source());
    }

    match cli.format {
        Format::Text => print!("{}", report),
        Format::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
