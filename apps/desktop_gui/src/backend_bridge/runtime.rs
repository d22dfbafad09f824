//! Backend worker thread: owns the tokio runtime and executes audit tickets.

use std::{sync::Arc, thread};

use client_core::{AuditTransport, AuditorSettings, HttpAuditTransport};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

struct InFlightAudit {
    generation: u64,
    task: JoinHandle<()>,
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: AuditorSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport: Arc<dyn AuditTransport> = match HttpAuditTransport::from_settings(&settings)
        {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("invalid audit endpoint configuration: {err:#}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready - auditing via {}",
                settings.endpoint_url
            )));

            let mut in_flight: Option<InFlightAudit> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RunAudit { ticket } => {
                        if let Some(previous) = in_flight.take() {
                            previous.task.abort();
                        }
                        let generation = ticket.generation();
                        let transport = transport.clone();
                        let ui_tx = ui_tx.clone();
                        let task = tokio::spawn(async move {
                            let outcome = transport.post_audit(ticket.request()).await;
                            if ui_tx
                                .send(UiEvent::AuditFinished {
                                    generation,
                                    outcome,
                                })
                                .is_err()
                            {
                                tracing::warn!(generation, "ui closed before audit outcome arrived");
                            }
                        });
                        in_flight = Some(InFlightAudit { generation, task });
                    }
                    BackendCommand::CancelAudit { generation } => match in_flight.take() {
                        Some(audit) if audit.generation == generation => {
                            audit.task.abort();
                            tracing::info!(generation, "aborted in-flight audit");
                        }
                        other => in_flight = other,
                    },
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}
