use eframe::egui::{self, Color32, DragValue, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::config::FieldSpec;
use crate::prediction::inputs::{Daylight, Holiday};
use crate::prediction::predictor::DISCLAIMER;
use crate::state::{AppState, LoadStatus};
use crate::theme::THEMES;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload resources").clicked() {
                state.reload_resources();
                ui.close_menu();
            }
            if ui.button("Open artifacts folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let current = state.theme.name;
        egui::ComboBox::from_id_salt("background")
            .selected_text(format!("Background: {current}"))
            .show_ui(ui, |ui: &mut Ui| {
                for theme in THEMES {
                    let selected = current == theme.name;
                    if ui.selectable_label(selected, theme.name).clicked() {
                        state.set_theme(theme.name);
                    }
                }
            });

        ui.separator();

        if let Some(ctx) = &state.context {
            ui.label(ctx.summary()).on_hover_text(ctx.model_descriptions().join("\n"));
        }
    });
}

// ---------------------------------------------------------------------------
// Header and load banner
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    let accent = state.theme.accent();
    egui::Frame::new()
        .fill(accent)
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new("⚡ Energy Consumption Prediction")
                        .size(28.0)
                        .strong()
                        .color(Color32::WHITE),
                );
            });
        });
    ui.add_space(8.0);

    match &state.load_status {
        LoadStatus::Loaded(msg) => {
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }
        LoadStatus::Failed(msg) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    }
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Input widgets
// ---------------------------------------------------------------------------

fn number_field(
    ui: &mut Ui,
    label: &str,
    unit: &str,
    spec: &FieldSpec,
    value: &mut f64,
) -> bool {
    ui.label(label);
    let response = ui.add(
        DragValue::new(value)
            .range(spec.min..=spec.max)
            .speed(spec.step)
            .fixed_decimals(2)
            .suffix(format!(" {unit}")),
    );
    *value = spec.clamp(*value);
    response.changed()
}

fn clock_field(ui: &mut Ui, label: &str, max: u32, value: &mut u32) -> bool {
    ui.label(label);
    ui.add(DragValue::new(value).range(0..=max)).changed()
}

fn choice_field(
    ui: &mut Ui,
    id: &str,
    label: &str,
    labels: [&str; 2],
    value: &mut String,
) -> bool {
    ui.label(label);
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in labels {
                let selected = value.as_str() == choice;
                if ui.selectable_label(selected, choice).clicked() {
                    *value = choice.to_string();
                    changed = true;
                }
            }
        });
    changed
}

fn date_field(ui: &mut Ui, state: &mut AppState) -> bool {
    ui.label("Select Date");
    let picker = DatePickerButton::new(&mut state.form.date);
    ui.add(picker).changed()
}

/// Inputs stacked vertically, for the side panel.
pub fn side_inputs(ui: &mut Ui, state: &mut AppState) {
    ui.heading("⚙ Feature Input");
    ui.separator();

    let spec = state.config.form.clone();
    let mut changed = false;

    changed |= number_field(ui, "Voltage", "V", &spec.voltage, &mut state.form.voltage);
    changed |= number_field(
        ui,
        "Global Intensity",
        "A",
        &spec.global_intensity,
        &mut state.form.global_intensity,
    );
    for (i, field) in spec.sub_metering.iter().enumerate() {
        changed |= number_field(
            ui,
            &format!("Sub Metering {}", i + 1),
            "Wh",
            field,
            &mut state.form.sub_metering[i],
        );
    }

    ui.separator();
    changed |= date_field(ui, state);
    ui.horizontal(|ui: &mut Ui| {
        changed |= clock_field(ui, "Hour", 23, &mut state.form.hour);
        changed |= clock_field(ui, "Minute", 59, &mut state.form.minute);
    });

    ui.separator();
    if state.config.expose_selectors {
        changed |= selectors(ui, state);
    } else {
        fixed_defaults(ui, state);
    }

    if changed {
        state.mark_dirty();
    }
}

/// Three-column input card, for the central form layout.
pub fn form_inputs(ui: &mut Ui, state: &mut AppState) {
    let accent = state.theme.accent();
    egui::Frame::group(ui.style())
        .fill(Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, accent))
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.heading("🔧 Enter Input Values");
            ui.add_space(4.0);

            let spec = state.config.form.clone();
            let mut changed = false;

            ui.columns(3, |cols: &mut [Ui]| {
                changed |= number_field(
                    &mut cols[0],
                    "Voltage",
                    "V",
                    &spec.voltage,
                    &mut state.form.voltage,
                );
                changed |= number_field(
                    &mut cols[0],
                    "Sub Metering 1",
                    "Wh",
                    &spec.sub_metering[0],
                    &mut state.form.sub_metering[0],
                );
                changed |= date_field(&mut cols[0], state);

                changed |= number_field(
                    &mut cols[1],
                    "Global Intensity",
                    "A",
                    &spec.global_intensity,
                    &mut state.form.global_intensity,
                );
                changed |= number_field(
                    &mut cols[1],
                    "Sub Metering 2",
                    "Wh",
                    &spec.sub_metering[1],
                    &mut state.form.sub_metering[1],
                );
                changed |= clock_field(&mut cols[1], "Hour", 23, &mut state.form.hour);

                changed |= number_field(
                    &mut cols[2],
                    "Sub Metering 3",
                    "Wh",
                    &spec.sub_metering[2],
                    &mut state.form.sub_metering[2],
                );
                changed |= clock_field(&mut cols[2], "Minute", 59, &mut state.form.minute);
                if state.config.expose_selectors {
                    changed |= choice_field(
                        &mut cols[2],
                        "holiday",
                        "Is it a Holiday?",
                        Holiday::LABELS,
                        &mut state.form.holiday,
                    );
                }
            });

            if state.config.expose_selectors {
                changed |= choice_field(
                    ui,
                    "daylight",
                    "Daylight?",
                    Daylight::LABELS,
                    &mut state.form.daylight,
                );
            }

            if changed {
                state.mark_dirty();
            }
        });
    ui.add_space(8.0);
}

fn selectors(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut changed = choice_field(
        ui,
        "holiday",
        "Is it a Holiday?",
        Holiday::LABELS,
        &mut state.form.holiday,
    );
    changed |= choice_field(
        ui,
        "daylight",
        "Daylight?",
        Daylight::LABELS,
        &mut state.form.daylight,
    );
    changed
}

/// Read-only summary of the values used for fields the layout hides.
fn fixed_defaults(ui: &mut Ui, state: &AppState) {
    let defaults = match &state.context {
        Some(ctx) => *ctx.defaults(),
        None => state.config.hidden_defaults,
    };
    ui.weak(format!(
        "Reactive power: {:.2} kW (fixed)",
        defaults.global_reactive_power
    ));
    ui.weak(format!("Holiday: {} (fixed)", defaults.holiday));
    ui.weak(format!("Daylight: {} (fixed)", defaults.daylight));
}

// ---------------------------------------------------------------------------
// Disclaimer
// ---------------------------------------------------------------------------

/// Static notice, shown after every prediction attempt.
pub fn disclaimer(ui: &mut Ui) {
    ui.separator();
    ui.heading("📜 Disclaimer");
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(0xFF, 0xF8, 0xE1))
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("Important Notice:").strong());
            for line in DISCLAIMER {
                ui.label(format!("• {line}"));
            }
        });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open model artifacts folder")
        .set_directory(&state.config.artifacts_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Reloading artifacts from {}", dir.display());
        state.reload_from(dir);
    }
}
