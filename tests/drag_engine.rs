use dragdeck::engine::{
    ContainerHandle, DragContainer, DragPhase, DropOutcome, FlowLayout, HitTarget,
    SharedDragState,
};
use dragdeck::items::{ContainerId, Item, ItemId};
use egui::{Pos2, Vec2, pos2};
use std::cell::RefCell;
use std::rc::Rc;

struct Harness {
    state: SharedDragState,
    commits: Rc<RefCell<Vec<(String, Vec<String>)>>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: SharedDragState::new(),
            commits: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn list(&self, id: &str, items: &[&str]) -> ContainerHandle {
        let commits = Rc::clone(&self.commits);
        let name = id.to_string();
        DragContainer::new(
            self.state.clone(),
            ContainerId::from_string(id),
            items.iter().map(|id| Item::new(*id, id.to_uppercase())).collect(),
        )
        .on_change(move |items| {
            let ids = items.iter().map(|item| item.id.to_string()).collect();
            commits.borrow_mut().push((name.clone(), ids));
        })
        .mount()
    }

    fn commit_count(&self) -> usize {
        self.commits.borrow().len()
    }
}

fn ids(list: &ContainerHandle) -> Vec<String> {
    list.borrow()
        .items()
        .iter()
        .map(|item| item.id.to_string())
        .collect()
}

#[test]
fn repeated_hover_is_idempotent() {
    let harness = Harness::new();
    let list = harness.list("x", &["a", "b", "c"]);
    list.borrow_mut().start_drag(0);
    assert!(list.borrow().hover_item(2));
    let revision = harness.state.revision();
    assert!(!list.borrow().hover_item(2));
    assert!(!list.borrow().hover_item(2));
    assert_eq!(harness.state.revision(), revision);
}

#[test]
fn same_list_reorder_moves_forward() {
    let harness = Harness::new();
    let list = harness.list("x", &["a", "b", "c", "d"]);
    list.borrow_mut().start_drag(0);
    list.borrow().hover_item(2);
    assert_eq!(
        list.borrow_mut().drop_here(),
        DropOutcome::Reordered { from: 0, to: 2 }
    );
    assert_eq!(ids(&list), ["b", "c", "a", "d"]);
    assert_eq!(harness.commit_count(), 1);
    assert_eq!(harness.state.phase(), DragPhase::Idle);
}

#[test]
fn same_list_drop_next_to_origin_commits_nothing() {
    for hover in [0, 1] {
        let harness = Harness::new();
        let list = harness.list("x", &["a", "b", "c", "d"]);
        list.borrow_mut().start_drag(0);
        list.borrow().hover_item(hover);
        assert_eq!(list.borrow_mut().drop_here(), DropOutcome::NoOp);
        assert_eq!(ids(&list), ["a", "b", "c", "d"]);
        assert_eq!(harness.commit_count(), 0);
        assert_eq!(harness.state.phase(), DragPhase::Idle);
    }
}

#[test]
fn cross_list_move_updates_both_sides() {
    let harness = Harness::new();
    let x = harness.list("x", &["a", "b"]);
    let y = harness.list("y", &["c"]);
    x.borrow_mut().start_drag(0);
    y.borrow().hover_item(1);
    assert_eq!(
        y.borrow_mut().drop_here(),
        DropOutcome::Moved {
            from_container: ContainerId::from_string("x"),
            inserted: true,
        }
    );
    assert_eq!(ids(&y), ["c", "a"]);
    assert_eq!(ids(&x), ["b"]);
    let commits = harness.commits.borrow();
    assert_eq!(commits[0].0, "y");
    assert_eq!(commits[1].0, "x");
    assert!(harness.state.with(|state| state.pending_removal().pending().is_none()));
}

#[test]
fn duplicate_drop_skips_insert_but_sheds_origin() {
    let harness = Harness::new();
    let x = harness.list("x", &["a", "b"]);
    let y = harness.list("y", &["c", "a"]);
    x.borrow_mut().start_drag(0);
    y.borrow().hover_item(0);
    assert_eq!(
        y.borrow_mut().drop_here(),
        DropOutcome::Moved {
            from_container: ContainerId::from_string("x"),
            inserted: false,
        }
    );
    assert_eq!(ids(&y), ["c", "a"]);
    assert_eq!(ids(&x), ["b"]);
}

#[test]
fn drop_without_hover_is_a_full_noop() {
    let harness = Harness::new();
    let x = harness.list("x", &["a", "b"]);
    let y = harness.list("y", &["c"]);
    x.borrow_mut().start_drag(1);
    assert_eq!(y.borrow_mut().drop_here(), DropOutcome::NoHover);
    assert_eq!(ids(&x), ["a", "b"]);
    assert_eq!(ids(&y), ["c"]);
    assert_eq!(harness.commit_count(), 0);
    assert_eq!(harness.state.phase(), DragPhase::Idle);
}

#[test]
fn drop_with_no_drag_is_ignored() {
    let harness = Harness::new();
    let x = harness.list("x", &["a"]);
    assert_eq!(x.borrow_mut().drop_here(), DropOutcome::NoActiveDrag);
    assert!(!harness.state.end_drag());
}

#[test]
fn hover_in_other_list_appends_on_drop() {
    let harness = Harness::new();
    let x = harness.list("x", &["a"]);
    let y = harness.list("y", &["b", "c"]);
    let z = harness.list("z", &[]);
    x.borrow_mut().start_drag(0);
    z.borrow().hover_trailing();
    y.borrow_mut().drop_here();
    assert_eq!(ids(&y), ["b", "c", "a"]);
    assert!(ids(&x).is_empty());
    assert!(ids(&z).is_empty());
}

#[test]
fn removal_for_unmounted_origin_waits_for_next_drag() {
    let harness = Harness::new();
    let x = harness.list("x", &["a"]);
    let y = harness.list("y", &[]);
    x.borrow_mut().start_drag(0);
    drop(x);
    y.borrow().hover_trailing();
    y.borrow_mut().drop_here();
    assert_eq!(ids(&y), ["a"]);
    assert!(harness.state.with(|state| state.pending_removal().pending().is_some()));

    y.borrow_mut().start_drag(0);
    assert!(harness.state.with(|state| state.pending_removal().pending().is_none()));
}

#[test]
fn removal_for_missing_item_clears_without_commit() {
    let harness = Harness::new();
    let x = harness.list("x", &["a"]);
    harness
        .state
        .request_removal(ContainerId::from_string("x"), ItemId::from_string("zzz"));
    assert_eq!(ids(&x), ["a"]);
    assert_eq!(harness.commit_count(), 0);
    assert!(harness.state.with(|state| state.pending_removal().pending().is_none()));
}

#[test]
fn busy_origin_picks_up_removal_on_refresh() {
    let harness = Harness::new();
    let x = harness.list("x", &["a", "b"]);
    let y = harness.list("y", &[]);
    x.borrow_mut().start_drag(1);
    y.borrow().hover_trailing();
    {
        let _busy = x.borrow();
        y.borrow_mut().drop_here();
    }
    assert_eq!(ids(&x), ["a", "b"]);
    assert!(x.borrow_mut().refresh());
    assert_eq!(ids(&x), ["a"]);
    assert_eq!(ids(&y), ["b"]);
}

#[test]
fn pointer_hits_drive_hover_and_placeholder() {
    let harness = Harness::new();
    let list = harness.list("x", &["a", "b", "c"]);
    let layout = FlowLayout::default();
    list.borrow_mut().start_drag(0);

    let geometry = layout.arrange(Pos2::ZERO, Vec2::new(400.0, 44.0), 3, None);
    let over_c = geometry.hit_test(pos2(200.0, 20.0));
    assert_eq!(over_c, HitTarget::Item(2));
    assert!(list.borrow().hover_at(over_c));
    assert_eq!(list.borrow().placeholder(), Some(2));

    let placeholder = list.borrow().placeholder();
    let geometry = layout.arrange(Pos2::ZERO, Vec2::new(400.0, 44.0), 3, placeholder);
    let slot = geometry.placeholder.unwrap();
    assert_eq!(geometry.hit_test(slot.center()), HitTarget::Placeholder);
    assert!(!list.borrow().hover_at(HitTarget::Placeholder));
    assert_eq!(list.borrow().placeholder(), Some(2));

    assert!(list.borrow().hover_at(geometry.hit_test(pos2(390.0, 20.0))));
    assert!(list.borrow().shows_trailing_placeholder());
}

#[test]
fn extra_fields_survive_a_move() {
    let state = SharedDragState::new();
    let source = DragContainer::new(
        state.clone(),
        ContainerId::from_string("x"),
        vec![Item::new("1", "Surdo").with_field("quantity", 2)],
    )
    .mount();
    let dest = DragContainer::new(state.clone(), ContainerId::from_string("y"), Vec::new()).mount();
    source.borrow_mut().start_drag(0);
    dest.borrow().hover_trailing();
    dest.borrow_mut().drop_here();
    let moved = dest.borrow().items()[0].clone();
    assert_eq!(moved.extra.get("quantity"), Some(&serde_json::Value::from(2)));
    assert!(source.borrow().items().is_empty());
}
