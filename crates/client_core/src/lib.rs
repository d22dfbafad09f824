use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, info};

pub mod config;
pub mod controller;
pub mod error;
pub mod report_view;
pub mod transport;

pub use config::{load_settings, AuditorSettings, SettingsError};
pub use controller::{AuditController, AuditDiagnostic, AuditTicket, RequestState, Resolution};
pub use error::{AuditFailure, FailureKind};
pub use report_view::{project, render_text, DisplayModel};
pub use transport::{AuditTransport, HttpAuditTransport};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum AuditEvent {
    StateChanged(RequestState),
    Failed(AuditDiagnostic),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before any request went out: already working or blank text.
    Ignored,
    Completed,
    Failed(FailureKind),
    /// `clear` ran while the request was in flight; the request was dropped.
    Cancelled,
    /// The response arrived but a newer generation had already taken over.
    Stale,
}

/// Async driver around [`AuditController`]: owns the transport and is the only
/// writer of the request state. Readers get clones via [`AuditClient::snapshot`]
/// or the event stream.
pub struct AuditClient {
    transport: Arc<dyn AuditTransport>,
    inner: Mutex<AuditController>,
    generation_tx: watch::Sender<u64>,
    events: broadcast::Sender<AuditEvent>,
}

impl AuditClient {
    pub fn new(transport: Arc<dyn AuditTransport>) -> Self {
        let (generation_tx, _) = watch::channel(0);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            inner: Mutex::new(AuditController::new()),
            generation_tx,
            events,
        }
    }

    pub fn from_settings(settings: &AuditorSettings) -> Result<Self> {
        let transport = HttpAuditTransport::from_settings(settings)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<AuditEvent> {
        self.events.subscribe()
    }

    pub async fn set_input_text(&self, text: impl Into<String>) {
        self.inner.lock().await.set_input_text(text);
    }

    pub async fn input_text(&self) -> String {
        self.inner.lock().await.input_text().to_string()
    }

    pub async fn snapshot(&self) -> RequestState {
        self.inner.lock().await.state().clone()
    }

    pub async fn last_failure(&self) -> Option<AuditDiagnostic> {
        self.inner.lock().await.last_failure().cloned()
    }

    pub async fn requests_issued(&self) -> u64 {
        self.inner.lock().await.requests_issued()
    }

    pub async fn display_model(&self) -> DisplayModel {
        project(self.inner.lock().await.state())
    }

    pub async fn submit(&self, text: impl Into<String>) -> SubmitOutcome {
        let (ticket, mut generation_rx) = {
            let mut inner = self.inner.lock().await;
            let Some(ticket) = inner.submit(text) else {
                return SubmitOutcome::Ignored;
            };
            self.generation_tx.send_replace(ticket.generation());
            let generation_rx = self.generation_tx.subscribe();
            self.emit(AuditEvent::StateChanged(RequestState::Working));
            (ticket, generation_rx)
        };
        let generation = ticket.generation();

        let outcome = tokio::select! {
            outcome = self.transport.post_audit(ticket.request()) => outcome,
            _ = generation_rx.wait_for(|current| *current != generation) => {
                info!(generation, "audit request cancelled");
                return SubmitOutcome::Cancelled;
            }
        };

        let mut inner = self.inner.lock().await;
        match inner.resolve(generation, outcome) {
            Resolution::Applied => {
                self.emit(AuditEvent::StateChanged(inner.state().clone()));
                SubmitOutcome::Completed
            }
            Resolution::Failed(kind) => {
                if let Some(diagnostic) = inner.last_failure() {
                    self.emit(AuditEvent::Failed(diagnostic.clone()));
                }
                self.emit(AuditEvent::StateChanged(RequestState::Idle));
                SubmitOutcome::Failed(kind)
            }
            Resolution::Stale => SubmitOutcome::Stale,
        }
    }

    pub async fn submit_input(&self) -> SubmitOutcome {
        let text = self.input_text().await;
        self.submit(text).await
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.clear();
        self.generation_tx.send_replace(inner.generation());
        self.emit(AuditEvent::StateChanged(RequestState::Idle));
    }

    fn emit(&self, event: AuditEvent) {
        if self.events.send(event).is_err() {
            debug!("no audit event subscribers");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
