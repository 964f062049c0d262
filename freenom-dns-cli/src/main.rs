//! Freenom DNS command-line client
//!
//! Lists and edits the DNS records of domains in a Freenom client area.
//! Results are written to stdout as JSON, logs go to stderr.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use freenom_dns_provider::Record;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Outcome;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (camelCase keys). Without it, FREENOM_USERNAME and
    /// FREENOM_PASSWORD are read from the environment.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Client-area address override
    #[arg(long, env = "FREENOM_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the domains of the account
    Zones,
    /// List the records of a zone in page order
    List {
        zone: String,
    },
    /// Add records as new rows
    Add {
        zone: String,
        /// Record as `TYPE NAME TTL VALUE [PRIORITY]`, `@` for the apex; repeatable
        #[arg(long = "record", short, required = true)]
        records: Vec<Record>,
    },
    /// Converge same type+name rows toward the given records, keeping all others
    Set {
        zone: String,
        /// Record as `TYPE NAME TTL VALUE [PRIORITY]`, `@` for the apex; repeatable
        #[arg(long = "record", short, required = true)]
        records: Vec<Record>,
    },
    /// Delete rows equal to the given records
    Delete {
        zone: String,
        /// Record as `TYPE NAME TTL VALUE [PRIORITY]`, `@` for the apex; repeatable
        #[arg(long = "record", short, required = true)]
        records: Vec<Record>,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "freenom_dns={level},freenom_dns_provider={level},reqwest=warn,html5ever=warn"
        ))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match commands::run(cli).await {
        Ok(Outcome::Complete) => ExitCode::SUCCESS,
        Ok(Outcome::Partial) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
