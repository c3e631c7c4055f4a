//! Pipeflow application entry point

use eframe::egui;
use pipeflow::PipelineEditor;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    log::info!("starting pipeflow");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pipeflow",
        options,
        Box::new(|_cc| Ok(Box::new(PipelineEditor::new()))),
    )
}
