use serde::{Deserialize, Serialize};

use crate::protocol::FinalReport;

/// Severity assigned to a risk item by the synthesis pass.
///
/// The wire label is free text; anything outside the four known levels lands in
/// `Unrecognized` so rendering never fails on an unexpected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
    Unrecognized,
}

impl SeverityLevel {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Unrecognized,
        }
    }

    pub fn is_critical(self) -> bool {
        self == Self::Critical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    NoComplianceData,
    HasComplianceData,
}

impl ComplianceStatus {
    pub fn of(report: &FinalReport) -> Self {
        if report.obligations.is_empty() && report.key_risks.is_empty() {
            Self::NoComplianceData
        } else {
            Self::HasComplianceData
        }
    }
}
