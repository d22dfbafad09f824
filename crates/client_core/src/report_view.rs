//! Pure projection from request state to what the trace area shows.

use std::fmt::Write as _;

use shared::{
    domain::{ComplianceStatus, SeverityLevel},
    protocol::{AuditReport, FinalReport, RiskItem},
};

use crate::controller::RequestState;

pub const DRAFT_TITLE: &str = "Step 1: Initial Draft";
pub const CRITIQUE_TITLE: &str = "Step 2: Internal Audit";
pub const FINAL_TITLE: &str = "Step 3: Verified Compliance Report";

pub const GENERATING_PLACEHOLDER: &str = "Generating...";
pub const WAITING_PLACEHOLDER: &str = "Waiting...";
pub const SYNTHESIS_PLACEHOLDER: &str = "Waiting for final synthesis...";

pub const NO_COMPLIANCE_NOTICE: &str =
    "Notice: This document does not appear to contain regulatory compliance data.";
pub const DISCLAIMER_PREFIX: &str =
    "Safety Disclaimer: AI-generated content. If missing info is detected:";

pub const SUBMIT_LABEL: &str = "Generate Summary";
pub const SUBMIT_LABEL_WORKING: &str = "Auditing (3-Pass Reflection)...";
pub const CLEAR_LABEL: &str = "Clear All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisColor {
    pub hex: &'static str,
    pub rgb: [u8; 3],
}

pub const CRITICAL_EMPHASIS: EmphasisColor = EmphasisColor {
    hex: "#dc2626",
    rgb: [0xdc, 0x26, 0x26],
};
pub const HIGH_EMPHASIS: EmphasisColor = EmphasisColor {
    hex: "#ea580c",
    rgb: [0xea, 0x58, 0x0c],
};
pub const MEDIUM_EMPHASIS: EmphasisColor = EmphasisColor {
    hex: "#ca8a04",
    rgb: [0xca, 0x8a, 0x04],
};
pub const LOW_EMPHASIS: EmphasisColor = EmphasisColor {
    hex: "#0284c7",
    rgb: [0x02, 0x84, 0xc7],
};
pub const DEFAULT_EMPHASIS: EmphasisColor = EmphasisColor {
    hex: "#9ca3af",
    rgb: [0x9c, 0xa3, 0xaf],
};

pub fn emphasis_for(level: SeverityLevel) -> EmphasisColor {
    match level {
        SeverityLevel::Critical => CRITICAL_EMPHASIS,
        SeverityLevel::High => HIGH_EMPHASIS,
        SeverityLevel::Medium => MEDIUM_EMPHASIS,
        SeverityLevel::Low => LOW_EMPHASIS,
        SeverityLevel::Unrecognized => DEFAULT_EMPHASIS,
    }
}

pub fn emphasis_for_label(label: &str) -> EmphasisColor {
    emphasis_for(SeverityLevel::parse(label))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayModel {
    /// Nothing submitted yet, or the last attempt was cleared or failed.
    Hidden,
    Trace(TraceView),
}

impl DisplayModel {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub fn trace(&self) -> Option<&TraceView> {
        match self {
            Self::Trace(trace) => Some(trace),
            Self::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceView {
    pub draft: PanelBody,
    pub critique: PanelBody,
    pub final_panel: FinalPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Placeholder(&'static str),
    Text(String),
}

impl PanelBody {
    pub fn text(&self) -> &str {
        match self {
            Self::Placeholder(text) => text,
            Self::Text(text) => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalPanel {
    InProgress,
    AwaitingSynthesis,
    NoComplianceData,
    Report(ReportBody),
}

impl FinalPanel {
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn report(&self) -> Option<&ReportBody> {
        match self {
            Self::Report(body) => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBody {
    pub summary: String,
    pub obligations: Vec<String>,
    pub risks: Vec<RiskCard>,
    pub actions: Vec<String>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskCard {
    pub description: String,
    pub severity_label: String,
    pub level: SeverityLevel,
    pub emphasis: EmphasisColor,
    pub pulse: bool,
}

impl RiskCard {
    fn from_item(item: &RiskItem) -> Self {
        let level = item.severity_level();
        Self {
            description: item.description.clone(),
            severity_label: item.severity.clone(),
            level,
            emphasis: emphasis_for(level),
            pulse: level.is_critical(),
        }
    }
}

pub fn project(state: &RequestState) -> DisplayModel {
    match state {
        RequestState::Idle => DisplayModel::Hidden,
        RequestState::Working => DisplayModel::Trace(TraceView {
            draft: PanelBody::Placeholder(GENERATING_PLACEHOLDER),
            critique: PanelBody::Placeholder(WAITING_PLACEHOLDER),
            final_panel: FinalPanel::InProgress,
        }),
        RequestState::Done(report) => DisplayModel::Trace(project_report(report)),
    }
}

fn project_report(report: &AuditReport) -> TraceView {
    let final_panel = match &report.final_report {
        None => FinalPanel::AwaitingSynthesis,
        Some(final_report) => match final_report.compliance_status() {
            ComplianceStatus::NoComplianceData => FinalPanel::NoComplianceData,
            ComplianceStatus::HasComplianceData => {
                FinalPanel::Report(project_final(final_report))
            }
        },
    };

    TraceView {
        draft: PanelBody::Text(report.draft.clone()),
        critique: PanelBody::Text(report.critique.clone()),
        final_panel,
    }
}

fn project_final(report: &FinalReport) -> ReportBody {
    ReportBody {
        summary: report.summary.clone(),
        obligations: report.obligations.clone(),
        risks: report.key_risks.iter().map(RiskCard::from_item).collect(),
        actions: report.recommended_actions.clone(),
        disclaimer: disclaimer_line(&report.missing_info),
    }
}

/// Always rendered; an empty `missing_info` leaves the line with nothing after the colon.
pub fn disclaimer_line(missing_info: &str) -> String {
    if missing_info.is_empty() {
        DISCLAIMER_PREFIX.to_string()
    } else {
        format!("{DISCLAIMER_PREFIX} {missing_info}")
    }
}

pub fn submit_label(state: &RequestState) -> &'static str {
    if state.is_working() {
        SUBMIT_LABEL_WORKING
    } else {
        SUBMIT_LABEL
    }
}

/// Plain-text rendering of the trace area; empty for a hidden model.
pub fn render_text(model: &DisplayModel) -> String {
    let Some(trace) = model.trace() else {
        return String::new();
    };

    let mut out = String::new();
    push_heading(&mut out, DRAFT_TITLE);
    push_line(&mut out, trace.draft.text());
    out.push('\n');
    push_heading(&mut out, CRITIQUE_TITLE);
    push_line(&mut out, trace.critique.text());
    out.push('\n');
    push_heading(&mut out, FINAL_TITLE);

    match &trace.final_panel {
        FinalPanel::InProgress => push_line(&mut out, "[in progress]"),
        FinalPanel::AwaitingSynthesis => push_line(&mut out, SYNTHESIS_PLACEHOLDER),
        FinalPanel::NoComplianceData => push_line(&mut out, NO_COMPLIANCE_NOTICE),
        FinalPanel::Report(body) => render_report_body(&mut out, body),
    }
    out
}

fn render_report_body(out: &mut String, body: &ReportBody) {
    push_line(out, "Executive Summary");
    push_line(out, &format!("  {}", body.summary));

    push_line(out, "Legal Obligations");
    for obligation in &body.obligations {
        push_line(out, &format!("  \u{2713} {obligation}"));
    }

    push_line(out, "Key Risks");
    for risk in &body.risks {
        let marker = if risk.pulse { "!! " } else { "" };
        push_line(
            out,
            &format!(
                "  {marker}[{}] {} ({})",
                risk.severity_label, risk.description, risk.emphasis.hex
            ),
        );
    }

    push_line(out, "Recommended Actions");
    for (index, action) in body.actions.iter().enumerate() {
        push_line(out, &format!("  {}. {action}", index + 1));
    }

    push_line(out, &body.disclaimer);
}

fn push_heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "== {title} ==");
}

fn push_line(out: &mut String, line: &str) {
    let _ = writeln!(out, "{line}");
}

#[cfg(test)]
#[path = "tests/report_view_tests.rs"]
mod tests;
