//! topic-pulse command-line entrypoint.
//! Runs a single topic analysis, a one-off dashboard, or the periodic
//! dashboard refresher, printing results as JSON.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use topic_pulse::dashboard::spawn_refresher;
use topic_pulse::mood::MoodReply;
use topic_pulse::{build_pipeline, config, mood, query, PulseConfig, TopicResult};

#[derive(Parser, Debug)]
#[command(name = "topic-pulse", version, about = "Public sentiment on a topic, from several web sources")]
struct Cli {
    /// Config file (TOML or JSON). Defaults to $PULSE_CONFIG_PATH, then config/pulse.{toml,json}.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one topic.
    Topic { topic: String },
    /// Chat-style input: a topic question ("how do people feel about X?") is
    /// analyzed from the web; anything else gets a personal mood reply.
    Ask { text: String },
    /// Build one dashboard snapshot.
    Dashboard {
        /// Override the configured categories (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Rebuild the dashboard periodically until Ctrl-C.
    Watch {
        /// Refresh interval in seconds (defaults to the configured value).
        #[arg(long)]
        every: Option<u64>,
    },
}

/// RUST_LOG controls the filter; PULSE_LOG_JSON=1 switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("topic_pulse=info,warn"));

    let json = std::env::var("PULSE_LOG_JSON").is_ok_and(|v| v == "1");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PulseConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_default(),
    }
}

fn log_topic_summary(result: &TopicResult) {
    match (result.mood(), result.confidence_band()) {
        (Some(m), Some(band)) => info!(
            topic = %result.topic,
            mood = m.label(),
            confidence = band.label(),
            analyzed = result.items_analyzed,
            insight = mood::insight(result),
            "{} {}",
            m.label(),
            m.emoji()
        ),
        _ => warn!(topic = %result.topic, "not enough data to analyze this topic"),
    }
}

/// Resolves when `signal` fires. A signal that cannot be listened for never
/// resolves, so it cannot masquerade as a cancellation.
async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "signal handler unavailable");
        std::future::pending::<()>().await;
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("serializing output")?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;
    let (analyzer, dashboard) = build_pipeline(&cfg)?;
    info!(
        sources = ?analyzer.collector().source_names(),
        classifier = analyzer.scorer().classifier_name(),
        "pipeline ready"
    );

    match cli.command {
        Command::Topic { topic } => {
            let result = analyzer.analyze(&topic).await?;
            log_topic_summary(&result);
            print_json(&result)?;
        }
        Command::Ask { text } => {
            if query::is_topic_request(&text) {
                let topic = query::topic_or_text(&text);
                info!(topic = %topic, "searching the web");
                let result = analyzer.analyze(&topic).await?;
                log_topic_summary(&result);
                print_json(&result)?;
            } else {
                let polarity = analyzer
                    .scorer()
                    .classify(&text)
                    .await
                    .context("classifying message")?;
                let reply = MoodReply::from(polarity);
                info!(
                    positive = reply.positive,
                    negative = reply.negative,
                    "{}",
                    reply.reply
                );
                print_json(&reply)?;
            }
        }
        Command::Dashboard { categories } => {
            let categories = if categories.is_empty() {
                cfg.dashboard.categories.clone()
            } else {
                categories
            };
            let snapshot = dashboard
                .build_dashboard_cancellable(&categories, until_signal(tokio::signal::ctrl_c()))
                .await?;
            print_json(&snapshot)?;
        }
        Command::Watch { every } => {
            let every = Duration::from_secs(every.unwrap_or(cfg.dashboard.refresh_secs).max(1));
            let (stop_tx, stop_rx) = watch::channel(false);
            let (handle, mut snapshots) = spawn_refresher(Arc::new(dashboard), every, stop_rx);

            loop {
                tokio::select! {
                    _ = until_signal(tokio::signal::ctrl_c()) => break,
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = snapshots.borrow_and_update().clone();
                        if let Some(snap) = latest {
                            print_json(snap.as_ref())?;
                        }
                    }
                }
            }

            let _ = stop_tx.send(true);
            handle.await.context("joining dashboard refresher")?;
        }
    }

    Ok(())
}
