//! Request lifecycle for a single audit at a time.
//!
//! The controller is a plain state container: it never performs I/O. `submit`
//! hands out an [`AuditTicket`] that the caller executes, and the outcome is fed
//! back through [`AuditController::resolve`]. Every ticket carries the
//! generation it was issued under; `clear` and later submits advance the
//! generation so a late response can no longer overwrite state.

use chrono::{DateTime, Utc};
use shared::protocol::{is_submittable_text, AuditReport, AuditRequest};
use tracing::{debug, info, warn};

use crate::error::{AuditFailure, FailureKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Working,
    Done(AuditReport),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }

    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            Self::Done(report) => Some(report),
            Self::Idle | Self::Working => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Done(_) => "done",
        }
    }
}

/// One accepted submission, to be executed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTicket {
    generation: u64,
    request: AuditRequest,
}

impl AuditTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &AuditRequest {
        &self.request
    }

    pub fn into_request(self) -> AuditRequest {
        self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDiagnostic {
    pub generation: u64,
    pub kind: FailureKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Failed(FailureKind),
    /// The ticket was invalidated by `clear` or a newer submit.
    Stale,
}

#[derive(Debug, Default)]
pub struct AuditController {
    input_text: String,
    state: RequestState,
    generation: u64,
    last_failure: Option<AuditDiagnostic>,
    requests_issued: u64,
}

impl AuditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn last_failure(&self) -> Option<&AuditDiagnostic> {
        self.last_failure.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    pub fn is_working(&self) -> bool {
        self.state.is_working()
    }

    /// Mirrors the enabled state of the submit button.
    pub fn can_submit(&self) -> bool {
        !self.is_working() && is_submittable_text(&self.input_text)
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Accepts `text` and moves to `Working`.
    ///
    /// Returns `None` without touching any state while a request is in flight
    /// or when the text is blank.
    pub fn submit(&mut self, text: impl Into<String>) -> Option<AuditTicket> {
        if self.is_working() {
            debug!(generation = self.generation, "submit ignored: audit already in flight");
            return None;
        }
        let text = text.into();
        if !is_submittable_text(&text) {
            debug!("submit ignored: empty input text");
            return None;
        }

        self.input_text = text.clone();
        self.state = RequestState::Working;
        self.last_failure = None;
        self.generation += 1;
        self.requests_issued += 1;
        info!(
            generation = self.generation,
            text_bytes = text.len(),
            "audit submitted"
        );

        Some(AuditTicket {
            generation: self.generation,
            request: AuditRequest::new(text),
        })
    }

    pub fn submit_input(&mut self) -> Option<AuditTicket> {
        let text = self.input_text.clone();
        self.submit(text)
    }

    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<AuditReport, AuditFailure>,
    ) -> Resolution {
        if generation != self.generation || !self.is_working() {
            debug!(
                generation,
                current = self.generation,
                state = self.state.label(),
                "dropping stale audit outcome"
            );
            return Resolution::Stale;
        }

        match outcome {
            Ok(report) => {
                info!(
                    generation,
                    has_final = report.final_report.is_some(),
                    "audit completed"
                );
                self.state = RequestState::Done(report);
                Resolution::Applied
            }
            Err(err) => {
                let kind = err.kind();
                warn!(generation, kind = kind.label(), "audit failed: {err}");
                self.state = RequestState::Idle;
                self.last_failure = Some(AuditDiagnostic {
                    generation,
                    kind,
                    message: err.to_string(),
                    at: Utc::now(),
                });
                Resolution::Failed(kind)
            }
        }
    }

    /// Resets to `Idle` and invalidates any ticket still in flight.
    pub fn clear(&mut self) {
        if self.is_working() {
            info!(generation = self.generation, "clearing while audit in flight");
        }
        self.input_text.clear();
        self.state = RequestState::Idle;
        self.last_failure = None;
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
