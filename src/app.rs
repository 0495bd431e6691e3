use eframe::egui;

use crate::config::{DashboardConfig, Layout};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EnergyDashboardApp {
    pub state: AppState,
    /// Theme currently installed in the egui style.
    applied_theme: Option<&'static str>,
}

impl EnergyDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
            applied_theme: None,
        }
    }
}

impl eframe::App for EnergyDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.state.theme.name) {
            self.state.theme.apply(ctx);
            self.applied_theme = Some(self.state.theme.name);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs (sidebar layout only) ----
        if self.state.config.layout == Layout::Sidebar {
            egui::SidePanel::left("input_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        panels::side_inputs(ui, &mut self.state);
                    });
                });
        }

        // ---- Central panel: header, inputs (form layout), predictions ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::header(ui, &self.state);
                if self.state.config.layout == Layout::Form {
                    panels::form_inputs(ui, &mut self.state);
                }

                self.state.refresh_prediction();
                plot::predictions(ui, &self.state);
                panels::disclaimer(ui);
            });
        });
    }
}
