//! Flow layout and pointer hit-testing for a single list.
//!
//! Items are laid out as fixed-size slots flowing along one axis. When a
//! placeholder is visible it takes a slot of its own and pushes the items
//! at and after its index one slot further along.

use egui::{Pos2, Rect, Vec2, vec2};

/// Direction items flow in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAxis {
    Horizontal,
    Vertical,
}

/// Slot sizes and spacing for one list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowLayout {
    pub axis: FlowAxis,
    pub item_size: Vec2,
    pub gap: f32,
    pub padding: f32,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            axis: FlowAxis::Horizontal,
            item_size: vec2(80.0, 40.0),
            gap: 8.0,
            padding: 2.0,
        }
    }
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Item(usize),
    Placeholder,
    /// Inside the list but not over any child.
    Background,
    Outside,
}

/// Resolved rectangles for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ListGeometry {
    pub container: Rect,
    pub items: Vec<Rect>,
    pub placeholder: Option<Rect>,
}

impl ListGeometry {
    /// Classify `pointer`. Children win over the background so hovering an
    /// item's interior is never read as trailing space.
    pub fn hit_test(&self, pointer: Pos2) -> HitTarget {
        if !self.container.contains(pointer) {
            return HitTarget::Outside;
        }
        if let Some(index) = self.items.iter().position(|rect| rect.contains(pointer)) {
            return HitTarget::Item(index);
        }
        if self.placeholder.is_some_and(|rect| rect.contains(pointer)) {
            return HitTarget::Placeholder;
        }
        HitTarget::Background
    }
}

impl FlowLayout {
    pub fn vertical() -> Self {
        Self {
            axis: FlowAxis::Vertical,
            ..Self::default()
        }
    }

    /// Size needed to hold `slots` slots including padding.
    pub fn content_size(&self, slots: usize) -> Vec2 {
        let main_item = self.main(self.item_size);
        let cross_item = self.cross(self.item_size);
        let main = if slots == 0 {
            0.0
        } else {
            slots as f32 * main_item + (slots - 1) as f32 * self.gap
        };
        self.compose(main + self.padding * 2.0, cross_item + self.padding * 2.0)
    }

    /// Lay out `count` items starting at `origin`, reserving a slot before
    /// item `placeholder` (or after the last item when it equals `count`).
    pub fn arrange(
        &self,
        origin: Pos2,
        min_size: Vec2,
        count: usize,
        placeholder: Option<usize>,
    ) -> ListGeometry {
        let placeholder = placeholder.filter(|index| *index <= count);
        let slots = count + usize::from(placeholder.is_some());
        let size = self.content_size(slots).max(min_size);
        let container = Rect::from_min_size(origin, size);
        let items = (0..count)
            .map(|index| {
                let shifted = placeholder.is_some_and(|slot| slot <= index);
                self.slot_rect(origin, index + usize::from(shifted))
            })
            .collect();
        ListGeometry {
            container,
            items,
            placeholder: placeholder.map(|slot| self.slot_rect(origin, slot)),
        }
    }

    fn slot_rect(&self, origin: Pos2, slot: usize) -> Rect {
        let step = self.main(self.item_size) + self.gap;
        let offset = self.compose(self.padding + slot as f32 * step, self.padding);
        Rect::from_min_size(origin + offset, self.item_size)
    }

    fn main(&self, v: Vec2) -> f32 {
        match self.axis {
            FlowAxis::Horizontal => v.x,
            FlowAxis::Vertical => v.y,
        }
    }

    fn cross(&self, v: Vec2) -> f32 {
        match self.axis {
            FlowAxis::Horizontal => v.y,
            FlowAxis::Vertical => v.x,
        }
    }

    fn compose(&self, main: f32, cross: f32) -> Vec2 {
        match self.axis {
            FlowAxis::Horizontal => vec2(main, cross),
            FlowAxis::Vertical => vec2(cross, main),
        }
    }
}
