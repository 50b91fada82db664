use std::io::{self, BufRead, Write};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pvedash::config::AppConfig;
use pvedash::ui::worker::PollWorker;
use pvedash::{connect_with_retry, ApiClient, NodeName, PveConnection, MAX_ATTEMPTS, RETRY_DELAY};

const LOG_FILE: &str = "pvedash.log";

/// Logs go to a file because the terminal belongs to the dashboard.
/// The returned guard must stay alive until exit or buffered lines
/// are lost.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pvedash=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

/// Connects with the standard retry schedule; on exhaustion, offers the
/// operator one more round before giving up.
async fn connect_or_exit(connection: &PveConnection) -> anyhow::Result<ApiClient> {
    match connect_with_retry(connection, MAX_ATTEMPTS, RETRY_DELAY).await {
        Ok(client) => Ok(client),
        Err(error) => {
            eprintln!(
                "Failed to connect to {} after {} attempts: {}",
                connection.host().as_str(),
                MAX_ATTEMPTS,
                error
            );
            if !prompt_retry()? {
                std::process::exit(1);
            }
            match connect_with_retry(connection, MAX_ATTEMPTS, RETRY_DELAY).await {
                Ok(client) => Ok(client),
                Err(error) => {
                    eprintln!("Still unable to connect: {}", error);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn prompt_retry() -> anyhow::Result<bool> {
    eprint!("Retry connection? [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();

    let config = AppConfig::from_env();
    let connection = PveConnection::builder()
        .host(&config.host)
        .port(config.port)
        .credentials(&config.username, &config.password, &config.realm)
        .verify_ssl(config.verify_ssl)
        .build()
        .context("invalid connection settings")?;
    let node = NodeName::new(&config.node).context("invalid node name")?;

    let client = connect_or_exit(&connection).await?;
    tracing::info!(host = connection.host().as_str(), node = node.as_str(), "connected");

    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(32);

    let worker = PollWorker::new(Some(client), node, config.poll_interval);
    tokio::spawn(worker.run(command_tx.clone(), command_rx, event_tx));

    pvedash::ui::run(command_tx, event_rx).await
}
