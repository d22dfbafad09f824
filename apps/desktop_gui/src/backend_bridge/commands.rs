//! Backend commands queued from UI to backend worker.

use client_core::AuditTicket;

pub enum BackendCommand {
    RunAudit { ticket: AuditTicket },
    CancelAudit { generation: u64 },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::RunAudit { .. } => "run_audit",
            BackendCommand::CancelAudit { .. } => "cancel_audit",
        }
    }
}
