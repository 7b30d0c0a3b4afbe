mod catalog;
mod installer;
mod probe;
mod style;
mod types;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 620.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Installify",
        native_options,
        Box::new(|_cc| Ok(Box::new(ui::InstallifyApp::default()))),
    )
}
