use std::path::Path;

use eframe::egui;
use water_quality_dashboard::app::WaterQualityApp;
use water_quality_dashboard::config::{CONFIG_FILE, DashboardConfig};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(WaterQualityApp::new(config)))),
    )
}
