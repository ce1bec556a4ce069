use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod marks;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use config::Config;
use events::ControlEvent;
use marks::{MarkStorage, MarkStore, Resolver};
use services::{
    create_hotkey_listener, create_window_registry, spawn_sink, DesktopSink, DryRunRegistry,
    LogSink, ModeController, ModeSettings, Notifier, TokioTicker,
};
use utils::autostart;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AutostartAction {
    Enable,
    Disable,
    Status,
}

#[derive(Parser, Debug)]
#[command(name = "harpoon", version)]
#[command(about = "Mark up to nine windows and jump between them with global hotkeys")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "harpoon.toml")]
    config: String,

    /// Fake windows and a scripted hotkey session, no device access
    #[arg(long)]
    dry_run: bool,

    /// Log level, overrides logging.level
    #[arg(long)]
    log_level: Option<String>,

    /// Manage the login autostart entry and exit
    #[arg(long, value_enum)]
    autostart: Option<AutostartAction>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Starting Harpoon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from {}", args.config);

    if let Some(action) = args.autostart {
        return run_autostart(action);
    }

    if args.dry_run {
        warn!("Dry-run mode: fake windows, no keyboard access");
    } else {
        utils::permissions::check_permissions(config.input.grab)?;
    }

    let dry_run = args.dry_run.then(|| Arc::new(DryRunRegistry::new()));
    let registry = create_window_registry(&config, dry_run.clone())?;

    let notifier = Notifier::new();
    let mut sinks = vec![spawn_sink(Box::new(LogSink), notifier.subscribe())];
    if config.notifications.desktop && !args.dry_run {
        match DesktopSink::connect(config.notifications.timeout_ms).await {
            Ok(sink) => sinks.push(spawn_sink(Box::new(sink), notifier.subscribe())),
            Err(e) => warn!("Desktop notifications disabled: {}", e),
        }
    }

    let store = MarkStore::load(MarkStorage::new(config.storage_path()), notifier.clone());
    info!(
        "Loaded {} marks from {}",
        store.count(),
        store.storage().path().display()
    );

    let (tx, mut rx) = mpsc::channel::<ControlEvent>(EVENT_CHANNEL_CAPACITY);

    let mut controller = ModeController::new(
        store,
        Resolver::new(registry),
        Box::new(TokioTicker::new(tx.clone())),
        notifier.clone(),
        ModeSettings::from(&config.marks),
    );

    let listener = create_hotkey_listener(&config, tx, dry_run)?;
    let mut listener_handle = tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            error!("Hotkey listener failed: {}", e);
        }
    });

    info!("Harpoon is running, press Ctrl+C to stop");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => controller.handle_event(event, Instant::now()),
                None => break,
            },
            _ = &mut listener_handle => {
                warn!("Hotkey listener stopped");
                break;
            }
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Received Ctrl+C"),
                    Err(e) => error!("Failed to wait for Ctrl+C: {}", e),
                }
                break;
            }
        }
    }

    info!("Shutting down...");

    controller.shutdown();
    drop(controller);
    drop(rx);

    listener_handle.abort();
    // Dropping the notifier closes the channel so sinks drain and exit.
    drop(notifier);

    let shutdown_timeout = std::time::Duration::from_secs(2);
    let drained = tokio::time::timeout(shutdown_timeout, async {
        for sink in sinks {
            let _ = sink.await;
        }
    })
    .await;

    if drained.is_err() {
        warn!("Timed out waiting for services to stop");
    }

    info!("Harpoon stopped");
    Ok(())
}

fn run_autostart(action: AutostartAction) -> Result<()> {
    match action {
        AutostartAction::Enable => {
            let path = autostart::enable().context("Failed to enable autostart")?;
            println!("Autostart enabled: {}", path.display());
        }
        AutostartAction::Disable => {
            if autostart::disable().context("Failed to disable autostart")? {
                println!("Autostart disabled");
            } else {
                println!("Autostart was not enabled");
            }
        }
        AutostartAction::Status => {
            let enabled = autostart::is_enabled().context("Failed to read autostart state")?;
            println!("Autostart is {}", if enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(filter);

    if format == "compact" {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }

    Ok(())
}
