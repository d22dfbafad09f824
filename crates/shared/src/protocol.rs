use serde::{Deserialize, Serialize};

use crate::domain::{ComplianceStatus, SeverityLevel};

/// Body posted to the audit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub text: String,
}

impl AuditRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Returns true when `text` carries something other than whitespace.
pub fn is_submittable_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Full result of one draft -> critique -> synthesis audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub draft: String,
    pub critique: String,
    #[serde(
        rename = "final",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub final_report: Option<FinalReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub summary: String,
    pub obligations: Vec<String>,
    pub key_risks: Vec<RiskItem>,
    pub recommended_actions: Vec<String>,
    pub missing_info: String,
}

impl FinalReport {
    pub fn compliance_status(&self) -> ComplianceStatus {
        ComplianceStatus::of(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub description: String,
    /// Label exactly as the service sent it.
    pub severity: String,
}

impl RiskItem {
    pub fn severity_level(&self) -> SeverityLevel {
        SeverityLevel::parse(&self.severity)
    }
}
