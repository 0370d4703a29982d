//! Command-line front end for the todo list.
//!
//! Reads commands from stdin (`add <text>`, `delete <id>`, `toggle <id>`,
//! `list`, `help`, `quit`), or runs a short scripted session with `--demo`.

use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use todo::cli::{self, SessionOptions};
use todo::{shared_store_with_config, SharedTodoStore};
use todo_store_runtime::StoreConfig;
use tokio::io::BufReader;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// In-memory todo list
#[derive(Parser, Debug)]
#[command(name = "todo", version, about)]
struct Args {
    /// Run a scripted session instead of reading stdin
    #[arg(long)]
    demo: bool,

    /// Print listings as JSON
    #[arg(long)]
    json: bool,

    /// Tracing filter, overrides RUST_LOG (e.g. "todo=trace")
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Capacity of the store's action broadcast channel
    #[arg(long, value_name = "N", default_value_t = 16)]
    broadcast_capacity: usize,

    /// Seconds to wait for in-flight effects on exit
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    shutdown_timeout: u64,
}

fn init_tracing(filter: Option<&str>) {
    let filter = filter.map_or_else(
        || {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info".into())
        },
        tracing_subscriber::EnvFilter::new,
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Log every action the store processes
fn spawn_action_logger(store: &SharedTodoStore) {
    let mut actions = store.subscribe_actions();

    tokio::spawn(async move {
        loop {
            match actions.recv().await {
                Ok(action) => tracing::debug!(?action, "Action processed"),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Action logger fell behind");
                },
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let config = StoreConfig::default()
        .with_broadcast_capacity(args.broadcast_capacity)
        .with_shutdown_timeout(Duration::from_secs(args.shutdown_timeout));
    tracing::debug!(?config, "Creating todo store");

    let store = shared_store_with_config(config);
    spawn_action_logger(&store);

    let options = SessionOptions {
        json: args.json,
        echo: args.demo,
    };
    let mut stdout = std::io::stdout().lock();

    if args.demo {
        cli::run_session(&store, cli::DEMO_SCRIPT.as_bytes(), &mut stdout, options)
            .await
            .context("demo session failed")?;
    } else {
        let stdin = BufReader::new(tokio::io::stdin());
        cli::run_session(&store, stdin, &mut stdout, options)
            .await
            .context("session failed")?;
    }

    let (total, completed) = store
        .state(|s| (s.count(), s.completed_count()))
        .await;
    tracing::info!(total, completed, "Session finished");

    store
        .shutdown_with_default_timeout()
        .await
        .context("store did not shut down cleanly")?;

    Ok(())
}
