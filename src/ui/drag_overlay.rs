use super::style;
use crate::engine::SharedDragState;
use eframe::egui::{self, Align2, Area, Color32, Frame, Order, RichText, Vec2};
use tracing::debug;

/// Paint the carried item next to the pointer.
pub fn render_drag_preview(ctx: &egui::Context, state: &SharedDragState) {
    let Some(label) = state.with(|state| state.drag().map(|drag| drag.item.label.clone())) else {
        return;
    };
    let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) else {
        return;
    };
    Area::new("drag_preview".into())
        .order(Order::Tooltip)
        .pivot(Align2::CENTER_CENTER)
        .current_pos(pos + Vec2::new(16.0, 16.0))
        .interactable(false)
        .show(ctx, |ui| {
            Frame::new()
                .fill(style::palette().preview_fill)
                .stroke(style::drag_source_stroke())
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(label).color(Color32::WHITE));
                });
        });
}

/// End a drag the pointer released outside every list.
///
/// Must run after all lists had their chance to handle the drop this frame.
pub fn settle_abandoned_drag(ctx: &egui::Context, state: &SharedDragState) -> bool {
    if !state.is_dragging() {
        return false;
    }
    let (released, down) = ctx.input(|i| (i.pointer.any_released(), i.pointer.primary_down()));
    if released || !down {
        debug!("Drag released outside any list; cancelling");
        return state.end_drag();
    }
    false
}
