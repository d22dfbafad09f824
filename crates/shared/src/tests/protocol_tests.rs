use crate::{
    domain::{ComplianceStatus, SeverityLevel},
    error::{ServiceErrorBody, ServiceRejection},
    protocol::{is_submittable_text, AuditReport, AuditRequest, FinalReport, RiskItem},
};

fn empty_final() -> FinalReport {
    FinalReport {
        summary: "S".to_string(),
        obligations: Vec::new(),
        key_risks: Vec::new(),
        recommended_actions: Vec::new(),
        missing_info: String::new(),
    }
}

#[test]
fn parses_complete_report_body() {
    let body = r#"{
        "draft": "D",
        "critique": "C",
        "final": {
            "summary": "S",
            "obligations": ["O1"],
            "key_risks": [{"description": "R1", "severity": "High"}],
            "recommended_actions": ["A1"],
            "missing_info": ""
        }
    }"#;

    let report: AuditReport = serde_json::from_str(body).expect("report");
    assert_eq!(report.draft, "D");
    assert_eq!(report.critique, "C");
    let final_report = report.final_report.expect("final present");
    assert_eq!(final_report.obligations, vec!["O1".to_string()]);
    assert_eq!(final_report.key_risks[0].severity, "High");
    assert_eq!(
        final_report.key_risks[0].severity_level(),
        SeverityLevel::High
    );
}

#[test]
fn missing_or_null_final_is_tolerated() {
    let absent: AuditReport =
        serde_json::from_str(r#"{"draft": "D", "critique": "C"}"#).expect("absent final");
    assert!(absent.final_report.is_none());

    let null: AuditReport =
        serde_json::from_str(r#"{"draft": "D", "critique": "C", "final": null}"#)
            .expect("null final");
    assert!(null.final_report.is_none());
}

#[test]
fn report_missing_draft_is_rejected() {
    let result = serde_json::from_str::<AuditReport>(r#"{"critique": "C"}"#);
    assert!(result.is_err());
}

#[test]
fn final_key_is_serialized_as_final() {
    let report = AuditReport {
        draft: "D".to_string(),
        critique: "C".to_string(),
        final_report: Some(empty_final()),
    };
    let value = serde_json::to_value(&report).expect("serialize");
    assert!(value.get("final").is_some());
    assert!(value.get("final_report").is_none());
}

#[test]
fn unknown_severity_deserializes_and_degrades() {
    let item: RiskItem =
        serde_json::from_str(r#"{"description": "R", "severity": "unknown"}"#).expect("item");
    assert_eq!(item.severity, "unknown");
    assert_eq!(item.severity_level(), SeverityLevel::Unrecognized);
}

#[test]
fn severity_parsing_ignores_case_and_padding() {
    assert_eq!(SeverityLevel::parse("CRITICAL"), SeverityLevel::Critical);
    assert_eq!(SeverityLevel::parse("high"), SeverityLevel::High);
    assert_eq!(SeverityLevel::parse(" Medium "), SeverityLevel::Medium);
    assert_eq!(SeverityLevel::parse("lOw"), SeverityLevel::Low);
    assert_eq!(SeverityLevel::parse(""), SeverityLevel::Unrecognized);
    assert_eq!(SeverityLevel::parse("severe"), SeverityLevel::Unrecognized);
    assert!(SeverityLevel::parse("Critical").is_critical());
    assert!(!SeverityLevel::parse("High").is_critical());
}

#[test]
fn compliance_status_requires_both_lists_empty() {
    let mut report = empty_final();
    assert_eq!(report.compliance_status(), ComplianceStatus::NoComplianceData);

    report.recommended_actions.push("A1".to_string());
    assert_eq!(report.compliance_status(), ComplianceStatus::NoComplianceData);

    report.obligations.push("O1".to_string());
    assert_eq!(report.compliance_status(), ComplianceStatus::HasComplianceData);

    report.obligations.clear();
    report.key_risks.push(RiskItem {
        description: "R1".to_string(),
        severity: "Low".to_string(),
    });
    assert_eq!(report.compliance_status(), ComplianceStatus::HasComplianceData);
}

#[test]
fn request_serializes_text_only() {
    let value = serde_json::to_value(AuditRequest::new("Sample clause...")).expect("serialize");
    assert_eq!(value, serde_json::json!({"text": "Sample clause..."}));
}

#[test]
fn whitespace_only_text_is_not_submittable() {
    assert!(!is_submittable_text(""));
    assert!(!is_submittable_text("  \n\t"));
    assert!(is_submittable_text("Hello"));
}

#[test]
fn recognises_service_error_envelopes() {
    let bare = ServiceErrorBody::from_body(r#"{"error": "Input text cannot be empty"}"#)
        .expect("bare envelope");
    assert_eq!(bare.error, "Input text cannot be empty");

    let paired = ServiceErrorBody::from_body(r#"[{"error": "unavailable"}, 500]"#)
        .expect("paired envelope");
    assert_eq!(paired.error, "unavailable");

    assert!(ServiceErrorBody::from_body(r#"{"draft": "D", "critique": "C"}"#).is_none());
    assert!(ServiceErrorBody::from_body("not json").is_none());

    let rejection = ServiceRejection::from(paired);
    assert_eq!(
        rejection.to_string(),
        "audit service rejected request: unavailable"
    );
}
