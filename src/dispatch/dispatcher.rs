//! Debounced chord dispatcher
//!
//! Samples key state on a fixed timer and turns recognized chords into
//! slot store operations plus clipboard I/O.
//!
//! The debounce window is a single global cooldown, not a per-chord one:
//! after any accepted action (show-all, save, load) every chord is ignored
//! until the window has elapsed.
//! Outcomes that change nothing (empty clipboard, empty slot, exhausted
//! retries) leave the window untouched so the user can retry at once.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::clipboard::Clipboard;
use crate::config::{Config, RetryPolicy};
use crate::events::DispatchEvent;
use crate::hotkey::{Chord, KeySnapshot, KeyState};
use crate::slots::{preview, SlotIndex, SlotStore};

use super::retry::with_retry;

/// Preview length used when reporting a load
const LOAD_PREVIEW_CHARS: usize = 30;

/// Per-tick phase of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Cooldown still running; chords are ignored
    Idle,
    /// Cooldown expired; key state is inspected
    Scanning,
    /// A chord was recognized and its action is running
    Acting,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Scanning => write!(f, "Scanning"),
            Phase::Acting => write!(f, "Acting"),
        }
    }
}

/// Polls key state and dispatches chord actions
pub struct Dispatcher {
    store: Arc<SlotStore>,
    keys: Box<dyn KeyState>,
    clipboard: Box<dyn Clipboard>,
    tick_interval: Duration,
    cooldown: Duration,
    retry: RetryPolicy,
    /// Time of the last accepted action
    last_action: Option<Instant>,
    event_tx: broadcast::Sender<DispatchEvent>,
}

impl Dispatcher {
    /// Create a dispatcher over the given store and platform services
    pub fn new(
        config: &Config,
        store: Arc<SlotStore>,
        keys: Box<dyn KeyState>,
        clipboard: Box<dyn Clipboard>,
        event_tx: broadcast::Sender<DispatchEvent>,
    ) -> Self {
        Self {
            store,
            keys,
            clipboard,
            tick_interval: config.tick_interval,
            cooldown: config.cooldown,
            retry: config.retry,
            last_action: None,
            event_tx,
        }
    }

    /// Phase a tick at `now` would start in
    pub fn phase_at(&self, now: Instant) -> Phase {
        match self.last_action {
            Some(last) if now.saturating_duration_since(last) < self.cooldown => Phase::Idle,
            _ => Phase::Scanning,
        }
    }

    /// Sample key state until `shutdown` resolves.
    ///
    /// Ticks that overrun the period are skipped rather than queued, and
    /// shutdown interrupts a tick that is waiting between retries.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut ticker = time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            cooldown_ms = self.cooldown.as_millis() as u64,
            "dispatcher started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = async {
                    let now = ticker.tick().await;
                    self.tick(now).await
                } => {}
            }
        }

        info!("dispatcher stopped");
    }

    /// Run a single sampling cycle at `now`.
    ///
    /// Returns the outcome if a chord was acted on.
    pub async fn tick(&mut self, now: Instant) -> Option<DispatchEvent> {
        let snapshot = KeySnapshot::capture(&*self.keys);

        if self.phase_at(now) == Phase::Idle {
            trace!(phase = %Phase::Idle, "cooldown active");
            return None;
        }

        let chord = snapshot.recognize()?;
        debug!(phase = %Phase::Acting, %chord, "chord recognized");

        let event = self.act(chord).await;
        if event.is_accepted() {
            self.last_action = Some(now);
        }

        let _ = self.event_tx.send(event.clone());
        Some(event)
    }

    async fn act(&mut self, chord: Chord) -> DispatchEvent {
        match chord {
            Chord::ShowAll => DispatchEvent::Listed {
                slots: self.store.show_all().await,
            },
            Chord::Save(slot) => self.save_from_clipboard(slot).await,
            Chord::Load(slot) => self.load_into_clipboard(slot).await,
        }
    }

    async fn save_from_clipboard(&mut self, slot: SlotIndex) -> DispatchEvent {
        let clipboard = &mut self.clipboard;
        match with_retry(self.retry, || clipboard.read()).await {
            Ok(content) if content.is_empty() => {
                debug!(%slot, "clipboard empty, nothing to save");
                DispatchEvent::ClipboardEmpty { slot }
            }
            Ok(content) => {
                let shown = preview(&content, self.store.preview_chars());
                self.store.save(slot, content).await;
                DispatchEvent::Saved {
                    slot,
                    preview: shown,
                }
            }
            Err(e) => {
                warn!(%slot, attempts = e.attempts, error = %e.last, "clipboard read failed");
                DispatchEvent::ReadFailed {
                    slot,
                    attempts: e.attempts,
                    error: e.last.to_string(),
                }
            }
        }
    }

    async fn load_into_clipboard(&mut self, slot: SlotIndex) -> DispatchEvent {
        let Some(content) = self.store.load(slot).await else {
            debug!(%slot, "slot empty, nothing to load");
            return DispatchEvent::SlotEmpty { slot };
        };

        let clipboard = &mut self.clipboard;
        match with_retry(self.retry, || clipboard.write(&content)).await {
            Ok(()) => {
                debug!(%slot, "slot written to clipboard");
                DispatchEvent::Loaded {
                    slot,
                    preview: preview(&content, LOAD_PREVIEW_CHARS),
                }
            }
            Err(e) => {
                warn!(%slot, attempts = e.attempts, error = %e.last, "clipboard write failed");
                DispatchEvent::WriteFailed {
                    slot,
                    attempts: e.attempts,
                    error: e.last.to_string(),
                }
            }
        }
    }
}
