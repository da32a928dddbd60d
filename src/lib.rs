//! Library exports for reuse in benchmarks and tests.
/// Application directory resolution.
pub mod app_dirs;
/// Multi-list drag-and-drop engine.
pub mod engine;
/// Items and identifiers.
pub mod items;
/// Tracing setup.
pub mod logging;
/// Roster data and persistence.
pub mod roster;
/// egui rendering of drag lists.
pub mod ui;
