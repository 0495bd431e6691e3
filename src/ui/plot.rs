use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::prediction::predictor::{ModelPrediction, Outcome, UNIT};
use crate::state::AppState;
use crate::theme::generate_palette;

// ---------------------------------------------------------------------------
// Predictions card (central panel)
// ---------------------------------------------------------------------------

/// Render the latest outcome: one line per model, or the request error.
pub fn predictions(ui: &mut Ui, state: &AppState) {
    let accent = state.theme.accent();
    egui::Frame::group(ui.style())
        .fill(Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, accent))
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.heading("🔮 Predictions");
            ui.add_space(4.0);

            match &state.outcome {
                None => {
                    ui.label("Waiting for input…");
                }
                Some(Outcome::Failed(e)) => {
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
                Some(Outcome::Predicted(preds)) => {
                    for p in preds {
                        prediction_row(ui, p, accent);
                    }
                    if preds.len() > 1 {
                        ui.add_space(8.0);
                        comparison_chart(ui, preds);
                    }
                }
            }
        });
}

fn prediction_row(ui: &mut Ui, p: &ModelPrediction, accent: Color32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{}:", p.label)).strong());
        match &p.result {
            Ok(_) => {
                ui.label(RichText::new(p.display()).size(22.0).color(accent));
            }
            Err(_) => {
                ui.label(RichText::new(p.display()).color(Color32::RED));
            }
        }
    });
}

/// Bar per model that produced a value; failed models are skipped.
fn comparison_chart(ui: &mut Ui, preds: &[ModelPrediction]) {
    let colors = generate_palette(preds.len());
    let bars: Vec<(String, Bar)> = preds
        .iter()
        .zip(colors)
        .enumerate()
        .filter_map(|(i, (p, color))| {
            let value = *p.result.as_ref().ok()?;
            let bar = Bar::new(i as f64, value)
                .name(&p.label)
                .fill(color)
                .width(0.6);
            Some((p.label.clone(), bar))
        })
        .collect();

    if bars.is_empty() {
        return;
    }

    Plot::new("prediction_chart")
        .height(220.0)
        .legend(egui_plot::Legend::default())
        .y_axis_label(format!("Predicted energy ({UNIT})"))
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (label, bar) in bars {
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label));
            }
        });
}
