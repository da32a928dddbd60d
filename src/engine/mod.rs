//! Multi-list drag-and-drop engine.
//!
//! A single [`SharedDragState`] coordinates any number of [`DragContainer`]s.
//! Containers never reference each other: a cross-list move inserts into the
//! destination and publishes a removal request that the origin consumes.

mod container;
mod drag_state;
mod geometry;
mod reorder;

pub use container::{CommitFn, ContainerHandle, DragContainer, DropOutcome};
pub use drag_state::{
    ActiveDrag, DragPhase, DragState, Hover, RemovalListener, RemovalRequest, RemovalSignal,
    SharedDragState,
};
pub use geometry::{FlowAxis, FlowLayout, HitTarget, ListGeometry};
pub use reorder::{insert_unique, is_noop_move, remove_id, reorder};
