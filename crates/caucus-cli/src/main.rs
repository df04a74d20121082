#![forbid(unsafe_code)]

mod cmd;
mod output;
mod progress;

use caucus_core::api::FetchError;
use caucus_core::{CoreError, ErrorCode};
use caucus_graph::GraphError;
use clap::Parser;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "caucus: legislator co-sponsorship networks",
    long_about = "Download the bills of one congress and chamber, build the network of \
                  legislators who co-sponsor them, and rank members by centrality.",
    after_help = "EXAMPLES:\n    # Senate of the 113th congress, cached after the first run\n    caucus 113 senate\n\n    # Keep only repeat collaborations and export for a browser layout\n    caucus 113 lower --trim 1 --resize betweenness --output network.json\n\n    # Quick look at the first 50 bills\n    caucus 113 representatives --limit 50 --ignore-cache"
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Summary format (default: pretty on a terminal, text when piped).
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Suppress the progress bar and summary.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    network: cmd::network::NetworkArgs,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CAUCUS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "caucus=debug,info"
        } else {
            "caucus=info,warn"
        })
    });

    let format = env::var("CAUCUS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Stable code for the first typed error in `err`'s cause chain.
fn error_code(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<GraphError>() {
            return err.code();
        }
        if let Some(err) = cause.downcast_ref::<CoreError>() {
            return err.code();
        }
        if let Some(err) = cause.downcast_ref::<FetchError>() {
            return err.code();
        }
        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorCode::ConfigParseError;
        }
    }
    ErrorCode::InternalUnexpected
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mode = resolve_output_mode(cli.format, cli.json);

    match cmd::network::run_network(&cli.network, mode, cli.quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = error_code(&err);
            if render_error(mode, &CliError::from_code(code, &err)).is_err() {
                eprintln!("error[{}]: {err:#}", code.code());
            }
            ExitCode::FAILURE
        }
    }
}
