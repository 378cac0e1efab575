//! `review-verifier` entrypoint: HTTP server, one-off verification and batch runs.

use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use verifier::batch::{BatchDriver, BatchFilter, JsonReviewStore};
use verifier::config::Config;
use verifier::gateway::{HandlerState, create_router_with_state};
use verifier::models::ModelConfig;
use verifier::service::ReviewVerifier;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "review-verifier", version, about)]
struct Cli {
    /// Probe `/healthz` of a local server and exit with its status.
    #[arg(long)]
    health_check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Verify one text and print the verdict as JSON. Reads stdin when TEXT is omitted.
    Verify { text: Option<String> },

    /// Verify the reviews stored in a JSON file and write the verdicts back.
    Batch {
        /// JSON array of reviews.
        #[arg(long)]
        reviews: PathBuf,

        /// Re-verify reviews that already have a verdict.
        #[arg(long)]
        force: bool,

        /// Only verify reviews of this company.
        #[arg(long)]
        company_id: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.health_check {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "Lexicon file unusable, built-in lexicon will be used");
    }

    let verifier = build_verifier(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, verifier).await,
        Command::Verify { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read text from stdin")?;
                    buf
                }
            };
            let verdict = verifier.verify(&text);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            Ok(())
        }
        Command::Batch {
            reviews,
            force,
            company_id,
        } => {
            let filter = BatchFilter { force, company_id };
            tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
                let mut store = JsonReviewStore::open(&reviews)?;
                let mut out = io::stdout().lock();
                BatchDriver::new(&verifier).run(&mut store, &filter, &mut out)?;
                Ok(())
            })
            .await?
        }
    }
}

async fn build_verifier(config: &Config) -> anyhow::Result<Arc<ReviewVerifier>> {
    let lexicon_path = config.lexicon_path.clone();
    let model_config = ModelConfig::from_env();

    let verifier = tokio::task::spawn_blocking(move || {
        ReviewVerifier::new(lexicon_path.as_deref(), &model_config)
    })
    .await
    .context("verifier initialization panicked")?;

    Ok(Arc::new(verifier))
}

async fn serve(config: Config, verifier: Arc<ReviewVerifier>) -> anyhow::Result<()> {
    let addr: SocketAddr = config.socket_addr().parse()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        models_loaded = verifier.models_loaded(),
        "Review verifier starting"
    );

    let app = create_router_with_state(HandlerState::new(verifier));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Review verifier shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
