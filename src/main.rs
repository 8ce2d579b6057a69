//! clipslots: Background daemon providing eight clipboard slots
//!
//! The daemon polls the keyboard and reacts to three chord families:
//! - Ctrl+Shift+F1..F8 saves the current clipboard text into slots 0..7
//! - Ctrl+Shift+1..8 copies slot 0..7 back into the clipboard
//! - Ctrl+Shift+F9 lists every occupied slot
//!
//! Slots live in memory only and are discarded on exit.

mod clipboard;
mod config;
mod dispatch;
mod events;
mod hotkey;
mod lifecycle;
mod slots;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::clipboard::{ArboardClipboard, Clipboard};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::events::DispatchEvent;
use crate::lifecycle::ShutdownSignal;
use crate::slots::{preview, SlotStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "clipslots starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(?config, "configuration loaded");

    // Create shutdown signal handler
    let shutdown = ShutdownSignal::new();

    // Dispatcher -> reporter
    let (event_tx, mut report_rx) = broadcast::channel::<DispatchEvent>(64);

    let store = Arc::new(SlotStore::new(config.preview_chars));

    let mut clipboard = ArboardClipboard::new();
    check_clipboard(&mut clipboard);

    let keys = match hotkey::default_key_state() {
        Ok(keys) => {
            info!("key state backend ready");
            Some(keys)
        }
        Err(e) => {
            error!(?e, "failed to set up key state polling");
            warn!("continuing without hotkey support");
            None
        }
    };

    log_usage();
    info!("daemon initialized, entering main loop");

    tokio::select! {
        // Sample keys until a shutdown signal arrives
        _ = async {
            match keys {
                Some(keys) => {
                    let mut dispatcher = Dispatcher::new(
                        &config,
                        Arc::clone(&store),
                        keys,
                        Box::new(clipboard),
                        event_tx.clone(),
                    );
                    dispatcher.run_until(shutdown.wait()).await;
                }
                None => shutdown.wait().await,
            }
        } => {
            info!("shutdown signal received");
        }

        // Turn dispatcher outcomes into user-facing messages
        _ = report_events(&mut report_rx) => {
            info!("event reporter exited");
        }
    }

    // Cleanup
    info!("shutting down...");

    let remaining = store.show_all().await;
    if !remaining.is_empty() {
        info!(occupied = remaining.slots.len(), "discarding stored slots");
    }

    info!("clipslots stopped");

    Ok(())
}

/// Log the chord vocabulary once at startup
fn log_usage() {
    info!("save:  Ctrl+Shift+F1..F8 stores the clipboard into slots 0..7");
    info!("load:  Ctrl+Shift+1..8 copies slots 0..7 into the clipboard");
    info!("list:  Ctrl+Shift+F9 shows every occupied slot");
    info!("quit:  Ctrl+C");
}

/// Check once, without modifying it, that the clipboard can be read
fn check_clipboard(clipboard: &mut dyn Clipboard) {
    match clipboard.read() {
        Ok(text) if text.is_empty() => {
            info!("clipboard is empty; copy some text before saving a slot");
        }
        Ok(text) => {
            info!(preview = %preview(&text, 30), "clipboard readable");
        }
        Err(e) => {
            warn!(error = %e, "startup clipboard read failed");
        }
    }
}

/// Log every dispatcher outcome until the channel closes
async fn report_events(rx: &mut broadcast::Receiver<DispatchEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match &event {
                DispatchEvent::Listed { slots } => {
                    info!("\n{slots}");
                }
                DispatchEvent::Saved { slot, preview } => {
                    info!(%slot, %preview, "saved clipboard to slot");
                }
                DispatchEvent::Loaded { slot, preview } => {
                    info!(%slot, %preview, "loaded slot into clipboard");
                }
                DispatchEvent::ClipboardEmpty { slot } => {
                    warn!(%slot, "clipboard is empty; copy some text and try again");
                }
                DispatchEvent::SlotEmpty { slot } => {
                    warn!(%slot, "slot is empty");
                }
                DispatchEvent::ReadFailed { .. } | DispatchEvent::WriteFailed { .. } => {
                    warn!(%event, "clipboard unavailable; try again");
                }
            },
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "event reporter lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                break;
            }
        }
    }
}
