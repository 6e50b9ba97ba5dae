//! Application entry point for the rain-drain viewer.
//!
//! This binary installs the logger, sets up eframe/egui and delegates
//! all interactive logic and rendering to [`Viewer`] from the `viewer`
//! module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log output is controlled through `RUST_LOG`, e.g.
/// `RUST_LOG=drain_core=debug` to trace every sweep step.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Rain Drains",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
