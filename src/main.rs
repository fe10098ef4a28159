use anyhow::{Context, Result};
use eframe::egui;

use taxi_dashboard::app::TaxiDashboardApp;
use taxi_dashboard::config::DashboardConfig;
use taxi_dashboard::data::loader::load_file;
use taxi_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve(std::env::args())?;

    let mut state = AppState::new(config.theme);
    if let Some(path) = &config.data_path {
        // A configured data file that cannot be loaded aborts startup.
        let dataset = load_file(path).with_context(|| format!("loading {}", path.display()))?;
        state.set_dataset(dataset, path.clone());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NYC Taxi Analysis Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(TaxiDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
