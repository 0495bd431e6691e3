mod app;
mod config;
mod prediction;
mod state;
mod theme;
mod ui;

use app::EnergyDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Falling back to default configuration: {e:#}");
            DashboardConfig::default()
        }
    };
    log::info!(
        "Starting {:?} layout with artifacts in {}",
        config.layout,
        config.artifacts_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Energy Consumption Prediction App",
        options,
        Box::new(|_cc| Ok(Box::new(EnergyDashboardApp::new(config)))),
    )
}
