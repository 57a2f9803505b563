use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use passbook_finance::{StatementReport, write_csv};
use passbook_ingest::{StatementLayout, StatementParser, segment};
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod ocr;
mod state;

use config::{init_config, load_config, resolve_config_path};

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")"),
    about = "Turn OCR'd bank and wallet statements into categorized transactions"
)]
struct Cli {
    /// Config file (default: ~/.passbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement (.pdf, image, or OCR .txt) into transactions
    Parse {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Report)]
        format: OutputFormat,

        /// Statement layout (default: detect from the date shapes)
        #[arg(long, value_enum, default_value_t = LayoutArg::Auto)]
        layout: LayoutArg,

        /// Year for "14 Dec"-style dates in CSV iso_date (overrides config)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Print the raw OCR text of a statement
    Ocr { file: PathBuf },

    /// Show the detected layout and number of date anchors
    Detect { file: PathBuf },

    /// Manage ~/.passbook/config.toml
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Report,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Auto,
    Anchor,
    Semantic,
}

impl LayoutArg {
    fn layout(self) -> Option<StatementLayout> {
        match self {
            LayoutArg::Auto => None,
            LayoutArg::Anchor => Some(StatementLayout::AnchorStyle),
            LayoutArg::Semantic => Some(StatementLayout::SemanticStyle),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Parse {
            file,
            format,
            layout,
            year,
        } => parse_statement(config_path, &file, format, layout, year)?,

        Command::Ocr { file } => {
            let cfg = load_config(config_path)?;
            let text = ocr::extract_text(&file, &cfg.ocr)
                .with_context(|| format!("reading {}", file.display()))?;
            print!("{text}");
        }

        Command::Detect { file } => {
            let cfg = load_config(config_path)?;
            let text = ocr::extract_text(&file, &cfg.ocr)
                .with_context(|| format!("reading {}", file.display()))?;
            let text = text.replace('\r', "\n");
            let layout = StatementLayout::detect(&text);
            println!("layout:       {layout}");
            println!("date order:   {}", layout.date_order());
            println!("date anchors: {}", segment(&text).len());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(config_path)?,
            ConfigCommand::Show => {
                let cfg = load_config(config_path)?;
                println!("# {}", resolve_config_path(config_path)?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_statement(
    config_path: Option<&Path>,
    file: &Path,
    format: OutputFormat,
    layout: LayoutArg,
    year: Option<i32>,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let text = ocr::extract_text(file, &cfg.ocr)
        .with_context(|| format!("reading {}", file.display()))?;

    let mut parser = StatementParser::new(cfg.category_resolver());
    if let Some(layout) = layout.layout() {
        parser = parser.with_layout(layout);
    }

    let resolver = parser.resolver();
    if resolver.keywords().is_empty() {
        warn!(
            "no business keywords configured; every 2-3 word transfer is {:?}",
            resolver.personal_label()
        );
    } else {
        info!(
            "{} business keywords, transfers labelled {:?}",
            resolver.keywords().len(),
            resolver.personal_label()
        );
    }

    let report = StatementReport::build(&parser, &text);
    info!(
        "{}: {} transactions, {} layout",
        file.display(),
        report.transaction_count,
        report.layout
    );

    let unclassified = report.unclassified().count();
    if unclassified > 0 {
        warn!("{unclassified} transactions have no debit/credit cue");
    }
    let missing = report.missing_amounts().count();
    if missing > 0 {
        warn!("{missing} transactions have no readable amount");
    }

    match format {
        OutputFormat::Report => println!("{}", report.formatted_output),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        ),
        OutputFormat::Csv => write_csv(
            io::stdout().lock(),
            &report.transactions,
            year.or(cfg.report.default_year),
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "passbook", "-vv", "parse", "stmt.pdf", "--format", "csv", "--layout", "semantic", "--year", "2025",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Parse {
                file,
                format,
                layout,
                year,
            } => {
                assert_eq!(file, PathBuf::from("stmt.pdf"));
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(layout.layout(), Some(StatementLayout::SemanticStyle));
                assert_eq!(year, Some(2025));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["passbook", "parse", "ocr.txt"]).unwrap();
        match cli.command {
            Command::Parse { format, layout, .. } => {
                assert_eq!(format, OutputFormat::Report);
                assert_eq!(layout.layout(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
