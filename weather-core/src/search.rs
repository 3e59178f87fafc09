//! Debounced city search where a newer lookup always supersedes an older one.
//!
//! The controller owns a single lookup slot: a generation number and the
//! cancellation token of the lookup in flight. Issuing a lookup cancels the
//! previous token and bumps the generation, and [`SearchController::next_event`]
//! drops anything that still arrives for an older generation. Debounce timers
//! report back through the same channel, so all state changes happen on the
//! task that drives the controller.

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    model::WeatherSnapshot,
    provider::{LookupError, WeatherProvider},
};

/// A finished lookup belonging to the current generation.
#[derive(Debug)]
pub struct SearchEvent {
    pub generation: u64,
    pub query: String,
    pub outcome: Result<WeatherSnapshot, LookupError>,
}

#[derive(Debug)]
enum Message {
    /// Quiet period for debounce timer `seq` elapsed.
    Due { seq: u64, query: String },
    Finished(SearchEvent),
}

#[derive(Debug, Default)]
struct LookupSlot {
    generation: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug, Default)]
struct DebounceTimer {
    seq: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct SearchController {
    provider: Arc<dyn WeatherProvider>,
    quiet_period: Duration,
    slot: LookupSlot,
    debounce: DebounceTimer,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn WeatherProvider>, quiet_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            quiet_period,
            slot: LookupSlot::default(),
            debounce: DebounceTimer::default(),
            tx,
            rx,
        }
    }

    /// Text changed. Restart the quiet period; empty text only cancels the timer.
    pub fn on_input(&mut self, text: &str) {
        self.cancel_debounce();

        let query = text.trim();
        if query.is_empty() {
            return;
        }

        self.debounce.seq += 1;
        let seq = self.debounce.seq;
        let token = CancellationToken::new();
        self.debounce.token = Some(token.clone());

        let tx = self.tx.clone();
        let quiet_period = self.quiet_period;
        let query = query.to_string();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet_period) => {
                    let _ = tx.send(Message::Due { seq, query });
                }
            }
        });
    }

    /// Enter pressed: skip the quiet period. Returns the generation issued, if any.
    pub fn on_enter(&mut self, text: &str) -> Option<u64> {
        self.cancel_debounce();

        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.issue(query.to_string()))
    }

    /// Generation of the most recently issued lookup (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.slot.generation
    }

    /// True while a lookup is in flight or a debounce timer is running.
    pub fn is_busy(&self) -> bool {
        self.slot.token.is_some() || self.debounce.token.is_some()
    }

    /// Wait for the next result of the current generation.
    ///
    /// Also fires due debounce timers, so callers must keep polling this while
    /// they want searches to run. Cancel safe.
    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        loop {
            match self.rx.recv().await? {
                Message::Due { seq, query } => {
                    if seq == self.debounce.seq && self.debounce.token.take().is_some() {
                        self.issue(query);
                    }
                }
                Message::Finished(event) if event.generation == self.slot.generation => {
                    self.slot.token = None;
                    return Some(event);
                }
                Message::Finished(event) => {
                    tracing::debug!(
                        generation = event.generation,
                        current = self.slot.generation,
                        query = %event.query,
                        "discarding superseded lookup result"
                    );
                }
            }
        }
    }

    /// Drop the pending timer and the lookup in flight.
    pub fn cancel(&mut self) {
        self.cancel_debounce();
        if let Some(token) = self.slot.token.take() {
            token.cancel();
        }
        // Anything already queued for the old generation is now stale.
        self.slot.generation += 1;
    }

    fn cancel_debounce(&mut self) {
        if let Some(token) = self.debounce.token.take() {
            token.cancel();
        }
    }

    fn issue(&mut self, query: String) -> u64 {
        if let Some(previous) = self.slot.token.take() {
            previous.cancel();
            tracing::debug!(
                generation = self.slot.generation,
                "superseding lookup in flight"
            );
        }

        self.slot.generation += 1;
        let generation = self.slot.generation;
        let token = CancellationToken::new();
        self.slot.token = Some(token.clone());

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();

        tracing::info!(generation, query = %query, "issuing weather lookup");

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(generation, query = %query, "lookup aborted");
                }
                outcome = provider.current(&query) => {
                    let _ = tx.send(Message::Finished(SearchEvent { generation, query, outcome }));
                }
            }
        });

        generation
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_debounce();
        if let Some(token) = self.slot.token.take() {
            token.cancel();
        }
    }
}
