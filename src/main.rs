//! CLI entry point for the council statistics service.
//!
//! Provides subcommands for running the HTTP API server and for
//! printing the member leaderboard directly.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use legco_stats::analyzers::sort::{SortKey, SortOrder};
use legco_stats::config::Config;
use legco_stats::infra::hasura::HasuraClient;
use legco_stats::output::print_json;
use legco_stats::server::{self, AppState};
use legco_stats::services::LegcoService;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "legco_stats")]
#[command(about = "Legislative council statistics API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8000 (overrides BIND_ADDR)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the member leaderboard as JSON
    Leaderboard {
        /// Sort key: id, name_zh, vote_rate or attendance_rate
        #[arg(short = 'k', long, default_value = "id")]
        sort_key: String,

        /// Sort order: asc or desc
        #[arg(short = 'o', long, default_value = "asc")]
        sort_order: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/legco_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("legco_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = Arc::new(HasuraClient::new(
        config.graphql_endpoint.clone(),
        config.admin_secret.as_deref(),
    )?);
    let service = Arc::new(LegcoService::new(store, config.clone()));

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            server::serve(&addr, AppState { service }).await?;
        }
        Commands::Leaderboard {
            sort_key,
            sort_order,
        } => {
            let key: SortKey = sort_key
                .parse()
                .with_context(|| format!("invalid --sort-key '{sort_key}'"))?;
            let order: SortOrder = sort_order
                .parse()
                .with_context(|| format!("invalid --sort-order '{sort_order}'"))?;

            let rows = service.member_leaderboard(key, order).await?;
            print_json(&rows)?;
        }
    }

    Ok(())
}
