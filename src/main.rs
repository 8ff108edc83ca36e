use anyhow::anyhow;
use eframe::egui;
use kpi_dashboard::app::DashboardApp;
use kpi_dashboard::config;
use kpi_dashboard::data::source::DatasetSource;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The table is read once here and shared read-only for the whole session.
    let source = DatasetSource::new(config::DATA_FILE);
    let dataset = source.get_or_load().inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    if dataset.is_empty() {
        log::warn!(
            "{} has no customer rows; the dashboard will be empty",
            source.path().display()
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
