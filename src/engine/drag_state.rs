use crate::items::{ContainerId, Item, ItemId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// The item currently being carried and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    pub item: Item,
    /// `None` when the drag started in a copy-source container.
    pub from_index: Option<usize>,
    pub from_container: ContainerId,
}

/// Insertion point currently under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hover {
    pub container: ContainerId,
    pub index: usize,
}

/// One-shot request asking `container` to drop `item_id` from its collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalRequest {
    pub container: ContainerId,
    pub item_id: ItemId,
}

/// Removal mailbox. `Absent` once the request has been consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalSignal {
    #[default]
    Absent,
    Pending(RemovalRequest),
}

impl RemovalSignal {
    /// The pending request, if any.
    pub fn pending(&self) -> Option<&RemovalRequest> {
        match self {
            RemovalSignal::Absent => None,
            RemovalSignal::Pending(request) => Some(request),
        }
    }
}

/// Coarse interaction phase derived from the drag fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Hovering,
}

/// Shared drag/hover state for every container on screen.
///
/// Holds at most one in-flight drag. `revision` increases on every
/// observable change so callers can detect redundant updates.
#[derive(Clone, Debug, Default)]
pub struct DragState {
    drag: Option<ActiveDrag>,
    hover: Option<Hover>,
    pending_removal: RemovalSignal,
    revision: u64,
}

impl DragState {
    pub fn drag(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    pub fn hover(&self) -> Option<&Hover> {
        self.hover.as_ref()
    }

    pub fn pending_removal(&self) -> &RemovalSignal {
        &self.pending_removal
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> DragPhase {
        match (&self.drag, &self.hover) {
            (None, _) => DragPhase::Idle,
            (Some(_), None) => DragPhase::Dragging,
            (Some(_), Some(_)) => DragPhase::Hovering,
        }
    }

    /// Hover index, but only when `container` owns the current hover.
    pub fn hover_index_in(&self, container: &ContainerId) -> Option<usize> {
        self.hover
            .as_ref()
            .filter(|hover| &hover.container == container)
            .map(|hover| hover.index)
    }

    /// Start carrying `item`. Replaces any drag already in flight.
    pub fn begin_drag(&mut self, item: Item, from_index: Option<usize>, from_container: ContainerId) {
        if let Some(previous) = &self.drag {
            debug!(
                "begin_drag replacing in-flight drag of {} from {}",
                previous.item.id, previous.from_container
            );
        }
        if let RemovalSignal::Pending(stale) = &self.pending_removal {
            warn!(
                "Discarding unconsumed removal of {} from {}",
                stale.item_id, stale.container
            );
            self.pending_removal = RemovalSignal::Absent;
        }
        self.drag = Some(ActiveDrag {
            item,
            from_index,
            from_container,
        });
        self.hover = None;
        self.bump();
    }

    /// Record the insertion point under the pointer.
    ///
    /// Returns false when nothing changed: repeating the current hover, or
    /// hovering with no drag in flight.
    pub fn update_hover(&mut self, container: ContainerId, index: usize) -> bool {
        if self.drag.is_none() {
            return false;
        }
        let next = Hover { container, index };
        if self.hover.as_ref() == Some(&next) {
            return false;
        }
        self.hover = Some(next);
        self.bump();
        true
    }

    /// Clear drag and hover fields. Safe to call when idle.
    pub fn end_drag(&mut self) -> bool {
        if self.drag.is_none() && self.hover.is_none() {
            return false;
        }
        self.drag = None;
        self.hover = None;
        self.bump();
        true
    }

    pub fn request_removal(&mut self, container: ContainerId, item_id: ItemId) {
        self.pending_removal = RemovalSignal::Pending(RemovalRequest { container, item_id });
        self.bump();
    }

    pub fn clear_removal_request(&mut self) -> bool {
        if self.pending_removal == RemovalSignal::Absent {
            return false;
        }
        self.pending_removal = RemovalSignal::Absent;
        self.bump();
        true
    }

    /// Pending removal addressed to `container`, if any.
    pub fn removal_for(&self, container: &ContainerId) -> Option<&RemovalRequest> {
        self.pending_removal
            .pending()
            .filter(|request| &request.container == container)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Receiver of removal requests addressed to one container id.
pub trait RemovalListener {
    /// Handle `request`. Returning true marks the request consumed.
    fn on_removal(&mut self, request: &RemovalRequest) -> bool;
}

type ListenerMap = HashMap<ContainerId, Weak<RefCell<dyn RemovalListener>>>;

/// Cloneable handle to one [`DragState`], passed to every container.
///
/// Borrows are held only for the duration of each call; listeners run after
/// the state borrow is released so they may read the state again.
#[derive(Clone, Default)]
pub struct SharedDragState {
    state: Rc<RefCell<DragState>>,
    listeners: Rc<RefCell<ListenerMap>>,
}

impl SharedDragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the current state.
    pub fn with<R>(&self, f: impl FnOnce(&DragState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn snapshot(&self) -> DragState {
        self.state.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision()
    }

    pub fn phase(&self) -> DragPhase {
        self.state.borrow().phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag().is_some()
    }

    pub fn begin_drag(&self, item: Item, from_index: Option<usize>, from_container: ContainerId) {
        self.state
            .borrow_mut()
            .begin_drag(item, from_index, from_container);
    }

    pub fn update_hover(&self, container: ContainerId, index: usize) -> bool {
        self.state.borrow_mut().update_hover(container, index)
    }

    pub fn end_drag(&self) -> bool {
        self.state.borrow_mut().end_drag()
    }

    pub fn clear_removal_request(&self) -> bool {
        self.state.borrow_mut().clear_removal_request()
    }

    /// Publish a removal request and hand it to the listener registered
    /// under `container`, if one is alive and not busy.
    ///
    /// A request that no listener consumes stays pending until the target
    /// container's next refresh or until the next drag overwrites it.
    pub fn request_removal(&self, container: ContainerId, item_id: ItemId) {
        let request = RemovalRequest {
            container: container.clone(),
            item_id: item_id.clone(),
        };
        self.state
            .borrow_mut()
            .request_removal(container.clone(), item_id);
        let listener = self
            .listeners
            .borrow()
            .get(&container)
            .and_then(Weak::upgrade);
        let Some(listener) = listener else {
            debug!("No live listener for removal from {container}; leaving pending");
            return;
        };
        let consumed = match listener.try_borrow_mut() {
            Ok(mut listener) => listener.on_removal(&request),
            Err(_) => {
                debug!("Listener for {container} busy; removal deferred to refresh");
                false
            }
        };
        if consumed {
            let mut state = self.state.borrow_mut();
            if state.removal_for(&container) == Some(&request) {
                state.clear_removal_request();
            }
        }
    }

    /// Register `listener` for removal requests addressed to `container`.
    ///
    /// Only a weak reference is kept; dropping the listener unregisters it.
    pub fn subscribe(&self, container: ContainerId, listener: Weak<RefCell<dyn RemovalListener>>) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|_, existing| existing.strong_count() > 0);
        listeners.insert(container, listener);
    }
}

impl std::fmt::Debug for SharedDragState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDragState")
            .field("state", &self.state.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
