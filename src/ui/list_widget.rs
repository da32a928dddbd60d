use super::style;
use crate::engine::{ContainerHandle, DropOutcome, FlowAxis, FlowLayout};
use eframe::egui::{self, Align2, CursorIcon, FontId, Rect, Sense, StrokeKind, Ui, vec2};
use tracing::debug;

/// Rough glyph width used to decide when a label needs an ellipsis.
const APPROX_CHAR_WIDTH: f32 = 7.0;

/// Result of drawing one list for a frame.
#[derive(Clone, Debug)]
pub struct DragListResponse {
    pub rect: Rect,
    /// Part of `rect` inside the current clip; only this part accepts hover and drops.
    pub visible: Rect,
    /// Set on the frame a drop landed on this list.
    pub outcome: Option<DropOutcome>,
}

/// Draw `container` with its placeholder and feed this frame's pointer
/// input into the engine.
pub fn show_drag_list(
    ui: &mut Ui,
    container: &ContainerHandle,
    layout: &FlowLayout,
) -> DragListResponse {
    let palette = style::palette();
    container.borrow_mut().refresh();
    let (container_id, reorderable, items, placeholder, state) = {
        let container = container.borrow();
        (
            container.id().clone(),
            container.is_reorderable(),
            container.items().to_vec(),
            container.placeholder(),
            container.shared_state().clone(),
        )
    };
    let dragged_id = state.with(|state| {
        state
            .drag()
            .filter(|drag| drag.from_container == container_id)
            .map(|drag| drag.item.id.clone())
    });

    let slots = items.len() + usize::from(placeholder.is_some());
    let min_size = match layout.axis {
        FlowAxis::Horizontal => vec2(ui.available_width(), layout.content_size(1).y),
        FlowAxis::Vertical => vec2(layout.content_size(1).x, 0.0),
    };
    let size = layout.content_size(slots).max(min_size);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let geometry = layout.arrange(rect.min, size, items.len(), placeholder);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, palette.list_fill);
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, palette.list_outline),
        StrokeKind::Inside,
    );
    if reorderable && items.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Drop items here",
            FontId::proportional(13.0),
            palette.text_muted,
        );
    }

    for (index, (item, item_rect)) in items.iter().zip(&geometry.items).enumerate() {
        let response = ui
            .interact(
                *item_rect,
                ui.id().with((container_id.as_str(), item.id.as_str())),
                Sense::drag(),
            )
            .on_hover_cursor(CursorIcon::Grab);
        let stroke = if dragged_id.as_ref() == Some(&item.id) {
            style::drag_source_stroke()
        } else {
            style::item_stroke()
        };
        painter.rect_filled(*item_rect, 6.0, palette.item_fill);
        painter.rect_stroke(*item_rect, 6.0, stroke, StrokeKind::Inside);
        painter.text(
            item_rect.center(),
            Align2::CENTER_CENTER,
            clamp_label(&item.label, item_rect.width() - 8.0),
            FontId::proportional(13.0),
            palette.text_primary,
        );
        if response.drag_started() {
            container.borrow_mut().start_drag(index);
        }
    }
    if let Some(slot) = geometry.placeholder {
        painter.rect_filled(slot, 4.0, palette.placeholder);
    }

    // Scrolled-away or panel-covered parts of the list never take the pointer.
    let visible = rect.intersect(ui.clip_rect());
    let mut outcome = None;
    if reorderable && state.is_dragging() {
        let (pointer, released) =
            ui.input(|i| (i.pointer.latest_pos(), i.pointer.primary_released()));
        if let Some(pointer) = pointer.filter(|pointer| visible.contains(*pointer)) {
            container.borrow().hover_at(geometry.hit_test(pointer));
            if released {
                let result = container.borrow_mut().drop_here();
                debug!("Drop on {container_id}: {result:?}");
                outcome = Some(result);
            }
        }
    }

    DragListResponse {
        rect,
        visible,
        outcome,
    }
}

/// Truncate `label` with an ellipsis so it fits roughly in `width`.
pub fn clamp_label(label: &str, width: f32) -> String {
    let max_chars = (width / APPROX_CHAR_WIDTH).floor().max(1.0) as usize;
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DragContainer, SharedDragState};
    use crate::items::{ContainerId, Item};
    use eframe::egui::{Context, Event, Modifiers, PointerButton, Pos2, RawInput};

    const ITEM_COUNT: usize = 20;

    fn wide_list(state: &SharedDragState) -> ContainerHandle {
        let items = (0..ITEM_COUNT)
            .map(|n| Item::new(n.to_string(), format!("item {n}")))
            .collect();
        DragContainer::new(state.clone(), ContainerId::from_string("row"), items).mount()
    }

    fn ids(list: &ContainerHandle) -> Vec<String> {
        list.borrow()
            .items()
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }

    /// Draw `list` in a horizontal scroll area much narrower than its content.
    fn run_frame(ctx: &Context, list: &ContainerHandle, events: Vec<Event>) -> DragListResponse {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(640.0, 400.0))),
            events,
            ..Default::default()
        };
        let layout = FlowLayout::default();
        let mut drawn: Option<DragListResponse> = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::horizontal()
                    .max_width(300.0)
                    .show(ui, |ui| {
                        let response = show_drag_list(ui, list, &layout);
                        let earlier = drawn.take().and_then(|previous| previous.outcome);
                        drawn = Some(DragListResponse {
                            outcome: response.outcome.or(earlier),
                            ..response
                        });
                    });
            });
        });
        drawn.expect("list drawn")
    }

    fn release_at(pos: Pos2) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: false,
                modifiers: Modifiers::NONE,
            },
        ]
    }

    fn item_center(response: &DragListResponse, index: usize) -> Pos2 {
        FlowLayout::default()
            .arrange(response.rect.min, response.rect.size(), ITEM_COUNT, None)
            .items[index]
            .center()
    }

    #[test]
    fn release_over_visible_item_reorders() {
        let ctx = Context::default();
        let state = SharedDragState::new();
        let list = wide_list(&state);
        let idle = run_frame(&ctx, &list, Vec::new());
        assert!(idle.visible.width() < idle.rect.width());
        assert_eq!(idle.outcome, None);

        list.borrow_mut().start_drag(0);
        let target = item_center(&idle, 2);
        assert!(idle.visible.contains(target));
        let response = run_frame(&ctx, &list, release_at(target));

        assert_eq!(response.outcome, Some(DropOutcome::Reordered { from: 0, to: 2 }));
        assert_eq!(ids(&list)[..4], ["1", "2", "0", "3"]);
        assert!(!state.is_dragging());
    }

    #[test]
    fn release_over_scrolled_away_items_is_ignored() {
        let ctx = Context::default();
        let state = SharedDragState::new();
        let list = wide_list(&state);
        let idle = run_frame(&ctx, &list, Vec::new());

        list.borrow_mut().start_drag(0);
        let hidden = item_center(&idle, 5);
        assert!(idle.rect.contains(hidden));
        assert!(!idle.visible.contains(hidden));
        let response = run_frame(&ctx, &list, release_at(hidden));

        assert_eq!(response.outcome, None);
        assert_eq!(ids(&list)[..3], ["0", "1", "2"]);
        assert!(state.with(|state| state.hover().is_none()));
        assert!(state.is_dragging());
    }

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(clamp_label("Surdo", 72.0), "Surdo");
    }

    #[test]
    fn long_labels_get_ellipsis() {
        assert_eq!(clamp_label("Repenique grande", 42.0), "Repen…");
        assert_eq!(clamp_label("Tamborí", 1.0), "…");
    }
}
