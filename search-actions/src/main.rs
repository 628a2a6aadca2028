//! Search Actions Main Entry Point
//!
//! Hosts the `role:search` actions over stdin/stdout: one JSON action message
//! per input line, one JSON reply per output line. Logs go to stderr.

use dotenv::dotenv;
use search_actions::host::serve_lines;
use search_actions::{Dependencies, PluginError, PluginOptions};
use search_actions_repository::LogLevel;
use std::env;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins when set. Otherwise the client crates log at the configured
/// connection log level.
fn init_tracing(client_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "search_actions=info,search_actions_repository={level},opensearch={level}",
            level = client_level.as_directive()
        ))
    });

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .pretty(),
            )
            .init();
    }

    info!(
        service_name = "search-actions",
        service_version = env!("CARGO_PKG_VERSION"),
        json_output,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), PluginError> {
    dotenv().ok();

    let options = PluginOptions::from_env()?;
    init_tracing(options.connection.log.unwrap_or_default());

    info!("Starting search actions host");

    let deps = match Dependencies::new(options).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let reader = BufReader::new(stdin());
    let writer = stdout();

    tokio::select! {
        result = serve_lines(&deps.registry, reader, writer) => match result {
            Ok(summary) => {
                info!(
                    handled = summary.handled,
                    failed = summary.failed,
                    "Search actions host completed successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Search actions host failed");
                Err(e)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down");
            Ok(())
        }
    }
}
