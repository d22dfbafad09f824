use std::collections::BTreeMap;

use client_core::report_view::{project, submit_label, CLEAR_LABEL};
use client_core::{AuditController, Resolution};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{apply_audit_outcome, clear_audit, submit_audit};
use crate::ui::report_panel;

pub const SETTINGS_STORAGE_KEY: &str = "auditor_gui.settings";

const INPUT_HINT: &str = "Paste document text here.....";

pub struct StartupConfig {
    pub endpoint_url: String,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

impl StatusBanner {
    fn from_error(err: &UiError) -> Self {
        Self {
            message: format!("{} error: {}", err.category().label(), err.message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub dark_mode: bool,
    pub text_scale: f32,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            text_scale: 1.0,
        }
    }
}

impl PersistedDesktopSettings {
    pub fn sanitized(self) -> Self {
        let text_scale = if self.text_scale.is_finite() {
            self.text_scale.clamp(0.8, 1.4)
        } else {
            1.0
        };
        Self {
            dark_mode: self.dark_mode,
            text_scale,
        }
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: AuditController,
    endpoint_url: String,
    focus_input: bool,
    status: String,
    status_banner: Option<StatusBanner>,
    settings: PersistedDesktopSettings,
    applied_settings: Option<PersistedDesktopSettings>,
    settings_open: bool,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: AuditController::new(),
            endpoint_url: startup.endpoint_url,
            focus_input: true,
            status: "Starting...".to_string(),
            status_banner: None,
            settings: persisted_settings.unwrap_or_default().sanitized(),
            applied_settings: None,
            settings_open: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::AuditFinished {
                    generation,
                    outcome,
                } => match apply_audit_outcome(
                    &mut self.controller,
                    generation,
                    outcome,
                    &mut self.status,
                ) {
                    Resolution::Applied => self.status_banner = None,
                    Resolution::Failed(_) => {
                        self.status_banner = self.controller.last_failure().map(|diagnostic| {
                            StatusBanner::from_error(&UiError::from_diagnostic(
                                UiErrorContext::Audit,
                                diagnostic,
                            ))
                        });
                    }
                    Resolution::Stale => {}
                },
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = format!("{} error", err.category().label());
                    self.status_banner = Some(StatusBanner::from_error(&err));
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_settings == Some(self.settings) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        style.text_styles = scaled_text_styles(self.settings.text_scale);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);
        self.applied_settings = Some(self.settings);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading("Compliance Auditor");
                    ui.label(egui::RichText::new("AI-Powered 3-Pass Reflection Pipeline").weak());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut settings_open = self.settings_open;
        egui::Window::new("Settings")
            .open(&mut settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.checkbox(&mut self.settings.dark_mode, "Dark mode");
                ui.add(egui::Slider::new(&mut self.settings.text_scale, 0.8..=1.4).text("Text scale"));
                ui.separator();
                ui.label(egui::RichText::new(format!("Endpoint: {}", self.endpoint_url)).small());
            });
        self.settings_open = settings_open;
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "requests: {}",
                            self.controller.requests_issued()
                        ))
                        .small()
                        .weak(),
                    );
                });
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_input_section(&mut self, ui: &mut egui::Ui) {
        let mut draft = self.controller.input_text().to_string();
        let response = ui.add(
            egui::TextEdit::multiline(&mut draft)
                .hint_text(INPUT_HINT)
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );
        if self.focus_input {
            response.request_focus();
            self.focus_input = false;
        }
        if response.changed() {
            self.controller.set_input_text(draft);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let label = submit_label(self.controller.state());
            let submit = ui.add_enabled(self.controller.can_submit(), egui::Button::new(label));
            if submit.clicked() {
                self.status_banner = None;
                submit_audit(&mut self.controller, &self.cmd_tx, &mut self.status);
                if let Some(diagnostic) = self.controller.last_failure() {
                    self.status_banner = Some(StatusBanner::from_error(&UiError::from_diagnostic(
                        UiErrorContext::Audit,
                        diagnostic,
                    )));
                }
            }
            if self.controller.is_working() {
                ui.spinner();
            }
            if ui.button(CLEAR_LABEL).clicked() {
                clear_audit(&mut self.controller, &self.cmd_tx, &mut self.status);
                self.status_banner = None;
                self.focus_input = true;
            }
        });
    }
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_settings_window(ctx);

        let mut animating = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_status_banner(ui);
                    self.show_input_section(ui);
                    ui.add_space(12.0);
                    let model = project(self.controller.state());
                    animating = report_panel::show_trace(ui, &model);
                });
        });

        if animating {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
