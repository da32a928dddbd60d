use super::drag_overlay::{render_drag_preview, settle_abandoned_drag};
use super::list_widget::show_drag_list;
use crate::engine::{ContainerHandle, DragContainer, DropOutcome, FlowLayout, SharedDragState};
use crate::items::Item;
use crate::roster::{self, Roster};
use eframe::egui::{self, RichText};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};

/// Smallest window size that still fits a member row and the catalog.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [640.0, 360.0];

struct MemberRow {
    member_id: u32,
    name: String,
    list: ContainerHandle,
}

/// Roster editor: a copy-source catalog plus one reorderable list per member.
pub struct RosterApp {
    state: SharedDragState,
    roster: Rc<RefCell<Roster>>,
    catalog: ContainerHandle,
    members: Vec<MemberRow>,
    row_layout: FlowLayout,
    catalog_layout: FlowLayout,
    /// Summary of the last drop that changed a member list.
    status: Option<String>,
}

impl RosterApp {
    /// Build the editor. Every commit is written to `save_path` when set.
    pub fn new(roster: Roster, save_path: Option<PathBuf>) -> Self {
        let state = SharedDragState::new();
        let catalog = DragContainer::new(
            state.clone(),
            Roster::catalog_container_id(),
            roster.catalog.clone(),
        )
        .copy_source()
        .mount();
        let shared_roster = Rc::new(RefCell::new(roster.clone()));
        let members = roster
            .members
            .iter()
            .map(|member| {
                let member_id = member.id;
                let shared = Rc::clone(&shared_roster);
                let save_path = save_path.clone();
                let list =
                    DragContainer::new(state.clone(), member.container_id(), member.items.clone())
                        .on_change(move |items: &[Item]| {
                            let mut roster = shared.borrow_mut();
                            roster.set_member_items(member_id, items);
                            persist(&roster, save_path.as_ref());
                        })
                        .mount();
                MemberRow {
                    member_id,
                    name: member.name.clone(),
                    list,
                }
            })
            .collect();
        Self {
            state,
            roster: shared_roster,
            catalog,
            members,
            row_layout: FlowLayout::default(),
            catalog_layout: FlowLayout::vertical(),
            status: None,
        }
    }

    pub fn drag_state(&self) -> &SharedDragState {
        &self.state
    }

    pub fn catalog(&self) -> &ContainerHandle {
        &self.catalog
    }

    /// Member list handles in display order.
    pub fn member_lists(&self) -> impl Iterator<Item = &ContainerHandle> {
        self.members.iter().map(|row| &row.list)
    }

    /// Copy of the roster as last committed.
    pub fn roster(&self) -> Roster {
        self.roster.borrow().clone()
    }

    /// Summary of the last drop that changed a member list.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn record_drop(&mut self, member: &str, outcome: &DropOutcome) {
        if let Some(status) = describe_drop(member, outcome) {
            info!("{status}");
            self.status = Some(status);
        }
    }

    /// Draw one frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("catalog")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Catalog");
                ui.add_space(6.0);
                egui::ScrollArea::vertical()
                    .id_salt("catalog_scroll")
                    .show(ui, |ui| {
                        show_drag_list(ui, &self.catalog, &self.catalog_layout);
                    });
            });
        let mut drops = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Members");
            ui.add_space(6.0);
            for row in &self.members {
                let scroll_id = row.list.borrow().id().to_string();
                let hint = available_hint(&self.roster.borrow(), row.member_id);
                ui.horizontal(|ui| {
                    let name = egui::Label::new(RichText::new(&row.name).strong()).truncate();
                    ui.add_sized([112.0, 20.0], name).on_hover_text(hint);
                    egui::ScrollArea::horizontal()
                        .id_salt(scroll_id)
                        .show(ui, |ui| {
                            let response = show_drag_list(ui, &row.list, &self.row_layout);
                            if let Some(outcome) = response.outcome {
                                drops.push((row.name.clone(), outcome));
                            }
                        });
                });
                ui.add_space(4.0);
            }
            if let Some(status) = &self.status {
                ui.add_space(6.0);
                ui.label(RichText::new(status).weak());
            }
        });
        for (member, outcome) in drops {
            self.record_drop(&member, &outcome);
        }
        render_drag_preview(ctx, &self.state);
        settle_abandoned_drag(ctx, &self.state);
    }
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

/// Hover text listing the catalog items a member does not hold yet.
fn available_hint(roster: &Roster, member_id: u32) -> String {
    let labels: Vec<&str> = roster
        .available_for(member_id)
        .into_iter()
        .map(|item| item.label.as_str())
        .collect();
    if labels.is_empty() {
        "Holds every catalog item".to_string()
    } else {
        format!("Available: {}", labels.join(", "))
    }
}

fn describe_drop(member: &str, outcome: &DropOutcome) -> Option<String> {
    match outcome {
        DropOutcome::Reordered { .. } => Some(format!("Reordered {member}")),
        DropOutcome::Moved { inserted: true, .. } => Some(format!("Added to {member}")),
        DropOutcome::Moved { inserted: false, .. } => {
            Some(format!("{member} already holds that item"))
        }
        DropOutcome::Ignored
        | DropOutcome::NoActiveDrag
        | DropOutcome::NoHover
        | DropOutcome::NoOp => None,
    }
}

/// Save in the background of the interaction; failures never reach the engine.
fn persist(roster: &Roster, save_path: Option<&PathBuf>) {
    let Some(path) = save_path else {
        return;
    };
    match roster::save_to_path(roster, path) {
        Ok(()) => info!("Roster saved to {}", path.display()),
        Err(err) => warn!("Failed to save roster: {err}"),
    }
}
