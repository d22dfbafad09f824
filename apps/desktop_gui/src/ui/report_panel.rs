//! Renders a [`DisplayModel`] as the three-step trace.

use client_core::report_view::{
    EmphasisColor, FinalPanel, PanelBody, ReportBody, RiskCard, CRITIQUE_TITLE, DRAFT_TITLE,
    FINAL_TITLE, NO_COMPLIANCE_NOTICE, SYNTHESIS_PLACEHOLDER,
};
use client_core::DisplayModel;
use eframe::egui;

const PULSE_PERIOD_SECS: f64 = 1.6;

pub fn emphasis_color32(emphasis: EmphasisColor) -> egui::Color32 {
    let [r, g, b] = emphasis.rgb;
    egui::Color32::from_rgb(r, g, b)
}

/// Oscillates in `0.0..=1.0` with a period of [`PULSE_PERIOD_SECS`].
pub fn pulse_phase(time: f64) -> f32 {
    let angle = time * std::f64::consts::TAU / PULSE_PERIOD_SECS;
    (angle.sin() * 0.5 + 0.5) as f32
}

/// Returns `true` when something on screen is animating.
pub fn show_trace(ui: &mut egui::Ui, model: &DisplayModel) -> bool {
    let Some(trace) = model.trace() else {
        return false;
    };

    step_card(ui, DRAFT_TITLE, false, |ui| panel_body(ui, &trace.draft, false));
    ui.add_space(8.0);
    step_card(ui, CRITIQUE_TITLE, false, |ui| {
        panel_body(ui, &trace.critique, true)
    });
    ui.add_space(8.0);

    let mut animating = trace.final_panel.shows_progress();
    step_card(ui, FINAL_TITLE, trace.final_panel.shows_progress(), |ui| {
        match &trace.final_panel {
            FinalPanel::InProgress => {}
            FinalPanel::AwaitingSynthesis => {
                ui.label(egui::RichText::new(SYNTHESIS_PLACEHOLDER).italics().weak());
            }
            FinalPanel::NoComplianceData => no_compliance_notice(ui),
            FinalPanel::Report(body) => animating |= report_body(ui, body),
        }
    });
    animating
}

fn step_card(ui: &mut egui::Ui, title: &str, busy: bool, add_body: impl FnOnce(&mut egui::Ui)) {
    let visuals = ui.visuals().clone();
    egui::Frame::NONE
        .fill(visuals.faint_bg_color)
        .stroke(egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(title).strong());
                if busy {
                    ui.spinner();
                }
            });
            ui.separator();
            add_body(ui);
        });
}

fn panel_body(ui: &mut egui::Ui, body: &PanelBody, italic: bool) {
    let mut text = egui::RichText::new(body.text());
    if body.is_placeholder() {
        text = text.weak();
    }
    if italic {
        text = text.italics();
    }
    ui.label(text);
}

fn no_compliance_notice(ui: &mut egui::Ui) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(66, 56, 24))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(202, 138, 4)))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(NO_COMPLIANCE_NOTICE).color(egui::Color32::WHITE));
        });
}

fn report_body(ui: &mut egui::Ui, body: &ReportBody) -> bool {
    section_heading(ui, "Executive Summary");
    ui.label(&body.summary);

    section_heading(ui, "Legal Obligations");
    for obligation in &body.obligations {
        ui.label(format!("\u{2713} {obligation}"));
    }

    section_heading(ui, "Key Risks");
    let time = ui.input(|i| i.time);
    let mut animating = false;
    for card in &body.risks {
        risk_card(ui, card, time);
        animating |= card.pulse;
        ui.add_space(4.0);
    }

    section_heading(ui, "Recommended Actions");
    for (index, action) in body.actions.iter().enumerate() {
        ui.label(format!("{}. {action}", index + 1));
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(egui::RichText::new(&body.disclaimer).small().weak());
    animating
}

fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(egui::RichText::new(title).strong().size(15.0));
}

fn risk_card(ui: &mut egui::Ui, card: &RiskCard, time: f64) {
    let color = emphasis_color32(card.emphasis);
    let stroke_width = if card.pulse {
        1.0 + pulse_phase(time) * 1.5
    } else {
        1.0
    };

    egui::Frame::NONE
        .stroke(egui::Stroke::new(stroke_width, color))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                severity_badge(ui, &card.severity_label, color);
                ui.label(&card.description);
            });
        });
}

fn severity_badge(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.gamma_multiply(0.85))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(label)
                    .small()
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });
}
