//! Failure taxonomy for outbound audit requests.

use serde::{Deserialize, Serialize};
use shared::error::ServiceRejection;
use thiserror::Error;

/// Coarse failure bucket kept for diagnostics; the report area treats both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Shape,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Shape => "shape",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditFailure {
    #[error("audit request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("audit service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Rejected(#[from] ServiceRejection),
    #[error("audit response did not match the report shape: {0}")]
    Shape(#[from] serde_json::Error),
    /// The request never left the process, e.g. the worker queue was gone.
    #[error("audit request could not be dispatched: {0}")]
    Unsent(String),
}

impl AuditFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Status { .. } | Self::Unsent(_) => FailureKind::Transport,
            Self::Rejected(_) | Self::Shape(_) => FailureKind::Shape,
        }
    }
}
