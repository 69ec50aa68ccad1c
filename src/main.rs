use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use proser::config::AppConfig;
use proser::ingest;
use proser::models::DefaultTheme;
use proser::report::with_error_reporting;
use proser::store::{default_state_path, JsonFileState, SourceCache};
use proser::utils::strings;
use proser::ProserError;

#[derive(Parser, Debug)]
#[command(name = "proser")]
#[command(version)]
#[command(about = "Random paragraphs and sentences for your editor", long_about = None)]
struct Cli {
    /// Directory of paragraph JSON files, overriding the configured one
    #[arg(long, global = true, value_name = "DIR")]
    data_root: Option<PathBuf>,

    /// Session state file (defaults to the user data directory)
    #[arg(long, global = true, value_name = "FILE")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one or more random paragraphs
    Paragraph {
        /// How many paragraphs
        #[arg(short, long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: usize,
    },
    /// Print a random sentence
    Sentence,
    /// Convert plain text files into a single paragraph JSON file
    Parse {
        /// Plain text files, blank lines separate paragraphs
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Where to write the JSON output
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the bundled themes, or switch to one (e.g. "Alice in Wonderland")
    Theme { name: Option<String> },
    /// Regenerate the cached paragraphs from the current settings
    Refresh,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()
        .ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when a command failed and has already been reported.
fn run(cli: Cli) -> Result<bool> {
    let mut app_config = AppConfig::load().context("Failed to load config")?;
    if let Some(root) = cli.data_root {
        app_config.generator.custom_data_root = Some(root);
    }

    let state = cli.state;
    let open_cache = || {
        with_error_reporting("Initialize", || -> Result<SourceCache<JsonFileState>> {
            let state_path = state
                .clone()
                .or_else(default_state_path)
                .context("Could not determine a location for the session state")?;
            Ok(SourceCache::open(
                JsonFileState::new(state_path),
                app_config.state_prefix.as_str(),
                app_config.generator.clone(),
            )?)
        })
    };

    let printed = match cli.command {
        Command::Parse { inputs, output } => return Ok(parse_paragraphs(&inputs, &output)),
        Command::Paragraph { count: 1 } => open_cache().and_then(|mut cache| {
            with_error_reporting("InsertParagraph", || cache.random_paragraph())
        }),
        Command::Paragraph { count } => open_cache().and_then(|mut cache| {
            with_error_reporting("InsertParagraphs", || {
                cache
                    .random_paragraphs(count)
                    .map(|paragraphs| strings::join_paragraphs(paragraphs.as_slice()))
            })
        }),
        Command::Sentence => open_cache().and_then(|mut cache| {
            with_error_reporting("InsertSentence", || cache.random_sentence())
        }),
        Command::Theme { name: None } => open_cache().map(|cache| theme_listing(cache.theme())),
        Command::Theme { name: Some(name) } => open_cache().and_then(|mut cache| {
            with_error_reporting("ChangeTheme", || {
                let theme: DefaultTheme = name.parse()?;
                cache.change_theme(theme)?;
                Ok::<_, ProserError>(format!("Default theme updated to {}", theme))
            })
        }),
        Command::Refresh => open_cache().and_then(|mut cache| {
            with_error_reporting("Refresh", || {
                cache
                    .refresh()
                    .map(|paragraphs| format!("{} paragraphs cached", paragraphs.len()))
            })
        }),
    };

    match printed {
        Some(text) => {
            println!("{}", text);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn parse_paragraphs(inputs: &[PathBuf], output: &Path) -> bool {
    let never_cancelled = AtomicBool::new(false);
    with_error_reporting("ParseParagraphs", || -> proser::Result<()> {
        match ingest::parse_files(inputs, &never_cancelled)? {
            Some(paragraphs) => ingest::save_paragraphs(output, &paragraphs),
            None => Ok(()),
        }
    })
    .is_some()
}

fn theme_listing(active: DefaultTheme) -> String {
    DefaultTheme::ALL
        .iter()
        .map(|theme| {
            let marker = if *theme == active { "*" } else { " " };
            format!("{} {}", marker, theme)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
