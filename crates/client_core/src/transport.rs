//! Outbound audit call: the trait seam plus the reqwest-backed implementation.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ServiceErrorBody,
    protocol::{AuditReport, AuditRequest},
};
use tracing::{info, warn};
use url::Url;

use crate::{config::AuditorSettings, error::AuditFailure};

const MAX_ERROR_BODY_CHARS: usize = 512;

#[async_trait]
pub trait AuditTransport: Send + Sync {
    async fn post_audit(&self, request: &AuditRequest) -> Result<AuditReport, AuditFailure>;
}

pub struct HttpAuditTransport {
    http: Client,
    endpoint: Url,
}

impl HttpAuditTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, AuditFailure> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_settings(settings: &AuditorSettings) -> anyhow::Result<Self> {
        let endpoint = settings.endpoint()?;
        Self::new(endpoint, settings.request_timeout())
            .context("failed to build audit http client")
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AuditTransport for HttpAuditTransport {
    async fn post_audit(&self, request: &AuditRequest) -> Result<AuditReport, AuditFailure> {
        info!(
            endpoint = %self.endpoint,
            text_bytes = request.text.len(),
            "posting audit request"
        );
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = res.status().as_u16();
        let body = res.text().await?;
        decode_report(status, &body)
    }
}

/// Validates a response body against the report shape.
///
/// Error envelopes win over the status code, since the service can wrap them
/// in a 2xx response.
pub fn decode_report(status: u16, body: &str) -> Result<AuditReport, AuditFailure> {
    if let Some(envelope) = ServiceErrorBody::from_body(body) {
        warn!(status, error = %envelope.error, "audit service returned error envelope");
        return Err(AuditFailure::Rejected(envelope.into()));
    }
    if !(200..300).contains(&status) {
        return Err(AuditFailure::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }
    serde_json::from_str(body).map_err(AuditFailure::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn decodes_report_with_ok_status() {
        let report = decode_report(200, r#"{"draft": "D", "critique": "C", "final": null}"#)
            .expect("report");
        assert_eq!(report.draft, "D");
        assert!(report.final_report.is_none());
    }

    #[test]
    fn envelope_is_rejected_even_with_ok_status() {
        let err = decode_report(200, r#"{"error": "Input text cannot be empty"}"#)
            .expect_err("envelope");
        assert!(matches!(err, AuditFailure::Rejected(_)));
        assert_eq!(err.kind(), FailureKind::Shape);
    }

    #[test]
    fn non_success_status_keeps_truncated_body() {
        let long_body = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        match decode_report(404, &long_body) {
            Err(AuditFailure::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body.len(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_shape_failure() {
        let err = decode_report(200, r#"{"draft": 1}"#).expect_err("shape");
        assert_eq!(err.kind(), FailureKind::Shape);
    }
}
