use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error envelope the audit service answers with instead of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

impl ServiceErrorBody {
    /// Recognises both the bare envelope and the `[envelope, status]` pair
    /// some service builds emit with a 2xx status.
    pub fn from_body(body: &str) -> Option<Self> {
        match serde_json::from_str::<EnvelopeForms>(body).ok()? {
            EnvelopeForms::Bare(envelope) => Some(envelope),
            EnvelopeForms::WithStatus((envelope, _status)) => Some(envelope),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvelopeForms {
    Bare(ServiceErrorBody),
    WithStatus((ServiceErrorBody, u16)),
}

#[derive(Debug, Error)]
#[error("audit service rejected request: {message}")]
pub struct ServiceRejection {
    pub message: String,
}

impl From<ServiceErrorBody> for ServiceRejection {
    fn from(value: ServiceErrorBody) -> Self {
        Self {
            message: value.error,
        }
    }
}
