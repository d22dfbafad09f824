use client_core::{AuditController, AuditFailure, Resolution};
use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::AuditReport;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::describe_audit_failure;

/// Queues `cmd` for the backend worker; on failure writes the reason into `status`.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
            false
        }
    }
}

pub fn submit_audit(
    controller: &mut AuditController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let Some(ticket) = controller.submit_input() else {
        return;
    };
    let generation = ticket.generation();
    *status = "Auditing...".to_string();
    if !dispatch_backend_command(cmd_tx, BackendCommand::RunAudit { ticket }, status) {
        let reason = status.clone();
        controller.resolve(generation, Err(AuditFailure::Unsent(reason)));
    }
}

/// Resets the controller and aborts the backend request it was waiting on, if any.
pub fn clear_audit(
    controller: &mut AuditController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let in_flight = controller.is_working().then(|| controller.generation());
    controller.clear();
    *status = "Cleared".to_string();
    if let Some(generation) = in_flight {
        dispatch_backend_command(cmd_tx, BackendCommand::CancelAudit { generation }, status);
    }
}

pub fn apply_audit_outcome(
    controller: &mut AuditController,
    generation: u64,
    outcome: Result<AuditReport, AuditFailure>,
    status: &mut String,
) -> Resolution {
    let resolution = controller.resolve(generation, outcome);
    match resolution {
        Resolution::Applied => *status = "Audit complete".to_string(),
        Resolution::Failed(_) => {
            if let Some(diagnostic) = controller.last_failure() {
                *status = describe_audit_failure(diagnostic);
            }
        }
        Resolution::Stale => {}
    }
    resolution
}
