use super::drag_state::{RemovalListener, RemovalRequest, SharedDragState};
use super::geometry::HitTarget;
use super::reorder::{insert_unique, is_noop_move, remove_id, reorder};
use crate::items::{ContainerId, Item, position_of};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Callback receiving every committed ordering of a container's items.
///
/// Runs while the container is mutably borrowed; it must not call back
/// into the same container.
pub type CommitFn = Box<dyn FnMut(&[Item])>;

/// Shared ownership of a mounted container.
pub type ContainerHandle = Rc<RefCell<DragContainer>>;

/// Which terminal branch a drop took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Copy-source containers never accept drops.
    Ignored,
    /// Nothing was being dragged.
    NoActiveDrag,
    /// No insertion point was registered before the drop.
    NoHover,
    /// The drop would leave the order unchanged.
    NoOp,
    /// Same-list reorder committed.
    Reordered { from: usize, to: usize },
    /// Cross-list move. `inserted` is false when the item was already present.
    Moved {
        from_container: ContainerId,
        inserted: bool,
    },
}

/// One rendered list: interprets pointer gestures into shared drag state
/// calls and commits reordered collections.
pub struct DragContainer {
    id: ContainerId,
    reorderable: bool,
    items: Vec<Item>,
    on_change: Option<CommitFn>,
    state: SharedDragState,
}

impl DragContainer {
    /// Create a reorderable container over `items`.
    pub fn new(state: SharedDragState, id: ContainerId, items: Vec<Item>) -> Self {
        Self {
            id,
            reorderable: true,
            items,
            on_change: None,
            state,
        }
    }

    /// Turn this container into a copy-source: drags start with no origin
    /// index, drops are ignored and the collection is never mutated.
    pub fn copy_source(mut self) -> Self {
        self.reorderable = false;
        self.on_change = None;
        self
    }

    /// Set the commit callback. Ignored for copy-source containers.
    pub fn on_change(mut self, commit: impl FnMut(&[Item]) + 'static) -> Self {
        if self.reorderable {
            self.on_change = Some(Box::new(commit));
        }
        self
    }

    /// Wrap the container in a handle and register it for removal requests
    /// addressed to its id.
    pub fn mount(self) -> ContainerHandle {
        let id = self.id.clone();
        let state = self.state.clone();
        let handle = Rc::new(RefCell::new(self));
        let listener: Rc<RefCell<dyn RemovalListener>> = handle.clone();
        state.subscribe(id, Rc::downgrade(&listener));
        handle
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn is_reorderable(&self) -> bool {
        self.reorderable
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn shared_state(&self) -> &SharedDragState {
        &self.state
    }

    /// Replace the collection with one supplied by the owner.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Pick up the item at `index`. Returns false for out-of-range indices.
    pub fn start_drag(&mut self, index: usize) -> bool {
        let Some(item) = self.items.get(index).cloned() else {
            return false;
        };
        let from_index = self.reorderable.then_some(index);
        debug!("start_drag: container={} item={} from={:?}", self.id, item.id, from_index);
        self.state.begin_drag(item, from_index, self.id.clone());
        true
    }

    /// Pointer is over the item at `index`: insert before it.
    pub fn hover_item(&self, index: usize) -> bool {
        if !self.reorderable || index > self.items.len() {
            return false;
        }
        self.state.update_hover(self.id.clone(), index)
    }

    /// Pointer is over the container background: insert at the end.
    pub fn hover_trailing(&self) -> bool {
        if !self.reorderable {
            return false;
        }
        self.state.update_hover(self.id.clone(), self.items.len())
    }

    /// Publish the hover implied by a hit-test result.
    ///
    /// The placeholder and anything outside the list leave the hover as is.
    pub fn hover_at(&self, target: HitTarget) -> bool {
        match target {
            HitTarget::Item(index) => self.hover_item(index),
            HitTarget::Background => self.hover_trailing(),
            HitTarget::Placeholder | HitTarget::Outside => false,
        }
    }

    /// Insertion slot to draw a placeholder at, in `0..=len`.
    ///
    /// `len` means after the last item. Hidden when the hover belongs to
    /// another container or when dropping would be a same-list no-op.
    pub fn placeholder(&self) -> Option<usize> {
        if !self.reorderable {
            return None;
        }
        self.state.with(|state| {
            let drag = state.drag()?;
            let hover = state.hover_index_in(&self.id)?;
            if hover > self.items.len() {
                return None;
            }
            if drag.from_container == self.id && is_noop_move(drag.from_index, hover) {
                return None;
            }
            Some(hover)
        })
    }

    pub fn shows_placeholder_before(&self, index: usize) -> bool {
        index < self.items.len() && self.placeholder() == Some(index)
    }

    pub fn shows_trailing_placeholder(&self) -> bool {
        self.placeholder() == Some(self.items.len())
    }

    /// Complete the drag over this container.
    ///
    /// Always ends the shared drag, except on copy-source containers which
    /// ignore drops entirely.
    pub fn drop_here(&mut self) -> DropOutcome {
        if !self.reorderable {
            return DropOutcome::Ignored;
        }
        let outcome = self.resolve_drop();
        self.state.end_drag();
        outcome
    }

    /// Abandon the drag without mutating anything.
    pub fn cancel(&self) {
        if self.state.end_drag() {
            debug!("Drag cancelled via {}", self.id);
        }
    }

    /// Apply a removal request addressed to this container, if one is
    /// pending. Fallback for requests no listener could take synchronously.
    pub fn refresh(&mut self) -> bool {
        let request = self
            .state
            .with(|state| state.removal_for(&self.id).cloned());
        let Some(request) = request else {
            return false;
        };
        self.apply_removal(&request);
        self.state.clear_removal_request();
        true
    }

    fn resolve_drop(&mut self) -> DropOutcome {
        let snapshot = self.state.snapshot();
        let Some(drag) = snapshot.drag() else {
            return DropOutcome::NoActiveDrag;
        };
        if snapshot.hover().is_none() {
            debug!("Drop on {} without hover; nothing to do", self.id);
            return DropOutcome::NoHover;
        }
        let hover = snapshot.hover_index_in(&self.id);
        if drag.from_container == self.id {
            let (Some(from), Some(to)) = (drag.from_index, hover) else {
                return DropOutcome::NoOp;
            };
            if is_noop_move(Some(from), to) {
                return DropOutcome::NoOp;
            }
            // The collection may have changed under the drag; follow the id.
            let from = match self.items.get(from) {
                Some(item) if item.id == drag.item.id => from,
                _ => match position_of(&self.items, &drag.item.id) {
                    Some(actual) => actual,
                    None => return DropOutcome::NoOp,
                },
            };
            let Some(updated) = reorder(&self.items, from, to) else {
                return DropOutcome::NoOp;
            };
            info!("Reordered {} in {}: {} -> {}", drag.item.id, self.id, from, to);
            self.commit(updated);
            return DropOutcome::Reordered { from, to };
        }

        let at = hover.unwrap_or(self.items.len());
        let inserted = match insert_unique(&self.items, drag.item.clone(), at) {
            Some(updated) => {
                info!(
                    "Moved {} from {} into {} at {}",
                    drag.item.id, drag.from_container, self.id, at
                );
                self.commit(updated);
                true
            }
            None => {
                debug!("{} already holds {}; skipping insert", self.id, drag.item.id);
                false
            }
        };
        self.state
            .request_removal(drag.from_container.clone(), drag.item.id.clone());
        DropOutcome::Moved {
            from_container: drag.from_container.clone(),
            inserted,
        }
    }

    fn apply_removal(&mut self, request: &RemovalRequest) -> bool {
        if request.container != self.id {
            return false;
        }
        if !self.reorderable {
            debug!("Copy-source {} keeps {}", self.id, request.item_id);
            return true;
        }
        match remove_id(&self.items, &request.item_id) {
            Some(updated) => {
                info!("Removed {} from {}", request.item_id, self.id);
                self.commit(updated);
            }
            None => debug!("{} no longer holds {}", self.id, request.item_id),
        }
        true
    }

    fn commit(&mut self, updated: Vec<Item>) {
        self.items = updated;
        if let Some(commit) = self.on_change.as_mut() {
            commit(&self.items);
        }
    }
}

impl RemovalListener for DragContainer {
    fn on_removal(&mut self, request: &RemovalRequest) -> bool {
        self.apply_removal(request)
    }
}

impl std::fmt::Debug for DragContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragContainer")
            .field("id", &self.id)
            .field("reorderable", &self.reorderable)
            .field("items", &self.items)
            .finish()
    }
}
