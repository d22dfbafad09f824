//! UI/backend events and error modeling for the desktop auditor.

use client_core::{AuditDiagnostic, AuditFailure, FailureKind};
use shared::protocol::AuditReport;

pub enum UiEvent {
    Info(String),
    AuditFinished {
        generation: u64,
        outcome: Result<AuditReport, AuditFailure>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "Network",
            Self::Validation => "Response",
            Self::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Audit,
    General,
}

/// Short status-bar line for a failed audit.
pub fn describe_audit_failure(diagnostic: &AuditDiagnostic) -> String {
    let local_time = diagnostic.at.with_timezone(&chrono::Local).format("%H:%M:%S");
    let hint = match diagnostic.kind {
        FailureKind::Transport => "audit service unreachable; check the endpoint and retry",
        FailureKind::Shape => "audit service returned an unexpected response",
    };
    format!(
        "Audit failed ({}) at {local_time}: {hint}",
        diagnostic.kind.label()
    )
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("shape")
            || message_lower.contains("rejected")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("dispatch")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_diagnostic(context: UiErrorContext, diagnostic: &AuditDiagnostic) -> Self {
        let category = match diagnostic.kind {
            FailureKind::Transport => UiErrorCategory::Transport,
            FailureKind::Shape => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: diagnostic.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
