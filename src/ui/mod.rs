//! egui host for the drag engine.

mod drag_overlay;
mod list_widget;
mod roster_app;
mod style;

pub use drag_overlay::{render_drag_preview, settle_abandoned_drag};
pub use list_widget::{DragListResponse, clamp_label, show_drag_list};
pub use roster_app::{MIN_VIEWPORT_SIZE, RosterApp};
