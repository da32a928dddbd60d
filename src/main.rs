#![deny(missing_docs)]

//! Entry point for the roster editor.
use dragdeck::logging;
use dragdeck::roster;
use dragdeck::ui::{MIN_VIEWPORT_SIZE, RosterApp};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let save_path = match roster::roster_path() {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!("Roster changes will not be saved: {err}");
            None
        }
    };
    let roster = roster::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Falling back to default roster: {err}");
        roster::Roster::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_min_inner_size(MIN_VIEWPORT_SIZE)
            .with_inner_size([960.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dragdeck",
        native_options,
        Box::new(move |_cc| Ok(Box::new(RosterApp::new(roster, save_path)))),
    )?;
    Ok(())
}
