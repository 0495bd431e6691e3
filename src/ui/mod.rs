//! egui rendering. Widgets read and write [`crate::state::AppState`] only.

pub mod panels;
pub mod plot;
