use super::*;
use shared::{error::ServiceRejection, protocol::FinalReport};

fn sample_report() -> AuditReport {
    AuditReport {
        draft: "D".to_string(),
        critique: "C".to_string(),
        final_report: Some(FinalReport {
            summary: "S".to_string(),
            obligations: vec!["O1".to_string()],
            key_risks: Vec::new(),
            recommended_actions: vec!["A1".to_string()],
            missing_info: String::new(),
        }),
    }
}

fn status_failure() -> AuditFailure {
    AuditFailure::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

#[test]
fn starts_idle_with_empty_input() {
    let controller = AuditController::new();
    assert_eq!(controller.state(), &RequestState::Idle);
    assert_eq!(controller.input_text(), "");
    assert!(controller.last_failure().is_none());
    assert!(!controller.can_submit());
    assert_eq!(controller.requests_issued(), 0);
}

#[test]
fn submit_moves_to_working_and_issues_ticket() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("Sample clause...").expect("ticket");

    assert_eq!(controller.state(), &RequestState::Working);
    assert_eq!(ticket.request().text, "Sample clause...");
    assert_eq!(ticket.generation(), controller.generation());
    assert_eq!(controller.input_text(), "Sample clause...");
    assert_eq!(controller.requests_issued(), 1);
}

#[test]
fn submit_with_blank_text_is_a_no_op() {
    let mut controller = AuditController::new();
    assert!(controller.submit("").is_none());
    assert!(controller.submit("   \n").is_none());
    assert_eq!(controller.state(), &RequestState::Idle);
    assert_eq!(controller.requests_issued(), 0);
    assert_eq!(controller.generation(), 0);
}

#[test]
fn submits_while_working_are_ignored() {
    let mut controller = AuditController::new();
    let first = controller.submit("first").expect("first ticket");

    for attempt in ["second", "third", "fourth"] {
        assert!(controller.submit(attempt).is_none());
    }

    assert_eq!(controller.requests_issued(), 1);
    assert_eq!(controller.input_text(), "first");
    assert_eq!(
        controller.resolve(first.generation(), Ok(sample_report())),
        Resolution::Applied
    );
}

#[test]
fn successful_outcome_stores_report() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("text").expect("ticket");

    let resolution = controller.resolve(ticket.generation(), Ok(sample_report()));

    assert_eq!(resolution, Resolution::Applied);
    assert_eq!(controller.state(), &RequestState::Done(sample_report()));
    assert_eq!(controller.state().report(), Some(&sample_report()));
}

#[test]
fn failure_reverts_to_idle_and_records_diagnostic() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("text").expect("ticket");

    let resolution = controller.resolve(ticket.generation(), Err(status_failure()));

    assert_eq!(resolution, Resolution::Failed(FailureKind::Transport));
    assert_eq!(controller.state(), &RequestState::Idle);
    let diagnostic = controller.last_failure().expect("diagnostic");
    assert_eq!(diagnostic.kind, FailureKind::Transport);
    assert_eq!(diagnostic.generation, ticket.generation());
    assert!(diagnostic.message.contains("503"));
    assert_eq!(controller.input_text(), "text");
}

#[test]
fn shape_failures_are_distinguished_from_transport() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("text").expect("ticket");
    let shape_err = serde_json::from_str::<AuditReport>("{}").expect_err("invalid shape");

    let resolution = controller.resolve(ticket.generation(), Err(AuditFailure::Shape(shape_err)));
    assert_eq!(resolution, Resolution::Failed(FailureKind::Shape));

    let ticket = controller.submit("text").expect("retry ticket");
    let rejection = AuditFailure::Rejected(ServiceRejection {
        message: "Input text cannot be empty".to_string(),
    });
    assert_eq!(
        controller.resolve(ticket.generation(), Err(rejection)),
        Resolution::Failed(FailureKind::Shape)
    );
}

#[test]
fn resubmit_after_failure_succeeds() {
    let mut controller = AuditController::new();
    let failed = controller.submit("text").expect("ticket");
    controller.resolve(failed.generation(), Err(status_failure()));

    let retry = controller.submit("text").expect("retry ticket");
    assert!(controller.last_failure().is_none());
    assert_eq!(
        controller.resolve(retry.generation(), Ok(sample_report())),
        Resolution::Applied
    );
    assert_eq!(controller.requests_issued(), 2);
}

#[test]
fn submit_from_done_starts_new_audit_and_drops_old_report() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("first").expect("ticket");
    controller.resolve(ticket.generation(), Ok(sample_report()));

    let next = controller.submit("second").expect("ticket from done");
    assert_eq!(controller.state(), &RequestState::Working);
    assert!(controller.state().report().is_none());
    assert!(next.generation() > ticket.generation());
}

#[test]
fn clear_resets_everything_from_any_state() {
    let mut controller = AuditController::new();
    controller.set_input_text("draft text");
    controller.clear();
    assert_eq!(controller.state(), &RequestState::Idle);
    assert_eq!(controller.input_text(), "");

    let ticket = controller.submit("text").expect("ticket");
    controller.resolve(ticket.generation(), Ok(sample_report()));
    controller.clear();
    assert_eq!(controller.state(), &RequestState::Idle);
    assert_eq!(controller.input_text(), "");
    assert!(controller.state().report().is_none());
}

#[test]
fn clear_twice_matches_clear_once() {
    let mut once = AuditController::new();
    let ticket = once.submit("text").expect("ticket");
    once.resolve(ticket.generation(), Ok(sample_report()));
    once.clear();

    let mut twice = AuditController::new();
    let ticket = twice.submit("text").expect("ticket");
    twice.resolve(ticket.generation(), Ok(sample_report()));
    twice.clear();
    twice.clear();

    assert_eq!(once.state(), twice.state());
    assert_eq!(once.input_text(), twice.input_text());
    assert_eq!(once.last_failure(), twice.last_failure());
    assert_eq!(twice.state(), &RequestState::Idle);
}

#[test]
fn late_response_after_clear_is_dropped() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("text").expect("ticket");
    controller.clear();

    let resolution = controller.resolve(ticket.generation(), Ok(sample_report()));

    assert_eq!(resolution, Resolution::Stale);
    assert_eq!(controller.state(), &RequestState::Idle);
}

#[test]
fn late_response_from_superseded_ticket_does_not_touch_new_audit() {
    let mut controller = AuditController::new();
    let stale = controller.submit("first").expect("ticket");
    controller.clear();
    let current = controller.submit("second").expect("ticket");

    assert_eq!(
        controller.resolve(stale.generation(), Ok(sample_report())),
        Resolution::Stale
    );
    assert_eq!(controller.state(), &RequestState::Working);

    assert_eq!(
        controller.resolve(current.generation(), Err(status_failure())),
        Resolution::Failed(FailureKind::Transport)
    );
}

#[test]
fn duplicate_resolution_is_stale() {
    let mut controller = AuditController::new();
    let ticket = controller.submit("text").expect("ticket");
    controller.resolve(ticket.generation(), Ok(sample_report()));

    assert_eq!(
        controller.resolve(ticket.generation(), Err(status_failure())),
        Resolution::Stale
    );
    assert_eq!(controller.state(), &RequestState::Done(sample_report()));
}

#[test]
fn set_input_text_never_changes_status() {
    let mut controller = AuditController::new();
    controller.set_input_text("hello");
    assert_eq!(controller.state(), &RequestState::Idle);
    assert!(controller.can_submit());

    let ticket = controller.submit_input().expect("ticket from input");
    assert_eq!(ticket.into_request().text, "hello");

    controller.set_input_text("edited while working");
    assert_eq!(controller.state(), &RequestState::Working);
    assert!(!controller.can_submit());
}
