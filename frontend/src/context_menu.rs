//! Right-click menu for tree nodes.
//!
//! Menu entries come from [`shared::context_menu_items`]; what an entry does
//! is decided here by [`resolve`] and carried out by [`dispatch`].

use crate::dataflow::Atom;
use crate::dialogs;
use crate::domain::ExplorerDomain;
use crate::mutations::MutationRequest;
use crate::theme::*;
use shared::menu::{MENU_ITEM_HEIGHT, MENU_MIN_WIDTH, MENU_PADDING, clamp_menu_position, estimated_menu_size};
use shared::{MenuAction, MenuItem, TreeNode, context_menu_items};
use zoon::events::KeyDown;
use zoon::*;

/// The node a menu was opened on.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTarget {
    pub path: String,
    pub filename: String,
}

impl MenuTarget {
    pub fn of(node: &TreeNode) -> Self {
        Self {
            path: node.path.clone(),
            filename: node.filename.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenMenu {
    pub target: MenuTarget,
    pub items: Vec<MenuItem>,
    /// Clamped top-left corner in viewport pixels
    pub position: (f64, f64),
}

/// Which request a name prompt completes.
#[derive(Debug, Clone, PartialEq)]
pub enum NameRequest {
    CreateFile { parent: String },
    CreateFolder { parent: String },
    Rename { path: String },
}

impl NameRequest {
    pub fn with_name(self, name: String) -> MutationRequest {
        match self {
            Self::CreateFile { parent } => MutationRequest::CreateFile { parent, name },
            Self::CreateFolder { parent } => MutationRequest::CreateFolder { parent, name },
            Self::Rename { path } => MutationRequest::Rename {
                path,
                new_name: name,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuCommand {
    Copy(String),
    PromptName {
        message: String,
        default_value: String,
        request: NameRequest,
    },
    Confirm {
        message: String,
        request: MutationRequest,
    },
    Mutate(MutationRequest),
    Unavailable(&'static str),
}

/// Decide what a menu action means for `target`.
pub fn resolve(action: MenuAction, target: &MenuTarget, project_id: Option<&str>) -> MenuCommand {
    match action {
        MenuAction::NewFile => MenuCommand::PromptName {
            message: "New file name".to_string(),
            default_value: String::new(),
            request: NameRequest::CreateFile {
                parent: target.path.clone(),
            },
        },
        MenuAction::NewFolder => MenuCommand::PromptName {
            message: "New folder name".to_string(),
            default_value: String::new(),
            request: NameRequest::CreateFolder {
                parent: target.path.clone(),
            },
        },
        MenuAction::CopyName | MenuAction::CopyFilename => MenuCommand::Copy(target.filename.clone()),
        MenuAction::CopyProjectId => match project_id {
            Some(id) => MenuCommand::Copy(id.to_string()),
            None => MenuCommand::Unavailable("No project selected"),
        },
        MenuAction::CopyPath => MenuCommand::Copy(target.path.clone()),
        MenuAction::Rename => MenuCommand::PromptName {
            message: format!("Rename '{}' to", target.filename),
            default_value: target.filename.clone(),
            request: NameRequest::Rename {
                path: target.path.clone(),
            },
        },
        MenuAction::Download => MenuCommand::Mutate(MutationRequest::Download {
            paths: vec![target.path.clone()],
        }),
        MenuAction::Delete => MenuCommand::Confirm {
            message: format!("Delete '{}'? This cannot be undone.", target.filename),
            request: MutationRequest::Delete {
                paths: vec![target.path.clone()],
            },
        },
    }
}

/// Carry out a menu action. Dialogs block until answered.
pub fn dispatch(action: MenuAction, target: &MenuTarget, domain: &ExplorerDomain) {
    let project_id = domain.session.project_id();
    match resolve(action, target, project_id.as_deref()) {
        MenuCommand::Copy(text) => domain.clipboard_copy_requested_relay.send(text),
        MenuCommand::PromptName {
            message,
            default_value,
            request,
        } => {
            // Cancel yields None; an empty answer still goes through validation
            if let Some(name) = dialogs::prompt(&message, &default_value) {
                domain
                    .mutation_requested_relay
                    .send(request.with_name(name));
            }
        }
        MenuCommand::Confirm { message, request } => {
            if dialogs::confirm(&message) {
                domain.mutation_requested_relay.send(request);
            }
        }
        MenuCommand::Mutate(request) => domain.mutation_requested_relay.send(request),
        MenuCommand::Unavailable(reason) => log::info!("{action:?} unavailable: {reason}"),
    }
}

// ===== VIEW =====

/// Open-menu state shared by the tree rows and the overlay.
#[derive(Clone, Default)]
pub struct ContextMenuState {
    pub open_menu: Atom<Option<OpenMenu>>,
}

impl ContextMenuState {
    pub fn open(&self, node: &TreeNode, anchor: (f64, f64)) {
        let items = context_menu_items(node);
        let size = estimated_menu_size(&items);
        let position = clamp_menu_position(anchor, size, viewport_size());
        self.open_menu.set(Some(OpenMenu {
            target: MenuTarget::of(node),
            items,
            position,
        }));
    }

    pub fn close(&self) {
        self.open_menu.set(None);
    }
}

fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1024.0, 768.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(1024.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(768.0);
    (width, height)
}

pub fn context_menu_layer(state: ContextMenuState, domain: ExplorerDomain) -> impl Element {
    El::new().child_signal(state.open_menu.signal().map(move |open_menu| {
        open_menu.map(|open_menu| menu_overlay(open_menu, state.clone(), domain.clone()))
    }))
}

fn menu_overlay(open_menu: OpenMenu, state: ContextMenuState, domain: ExplorerDomain) -> impl Element {
    let (left, top) = open_menu.position;
    let target = open_menu.target.clone();

    let backdrop = El::new()
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "fixed")
                .style("inset", "0")
                .style("z-index", "29999")
                .style("background-color", "rgba(0,0,0,0)")
        })
        .on_pointer_down({
            let state = state.clone();
            move || state.close()
        })
        .update_raw_el({
            let state = state.clone();
            move |raw_el| {
                raw_el.global_event_handler(move |event: KeyDown| {
                    if event.key() == "Escape" {
                        state.close();
                    }
                })
            }
        });

    let menu = Column::new()
        .s(Padding::new().y(MENU_PADDING as u32))
        .s(Background::new().color(surface_raised()))
        .s(Borders::all(Border::new().width(1).color(border())))
        .s(RoundedCorners::all(6))
        .s(Shadows::new([Shadow::new().y(4).blur(12).color(hsluv!(0, 0, 0, 35))]))
        .update_raw_el(move |raw_el| {
            raw_el
                .style("position", "fixed")
                .style("left", &format!("{left}px"))
                .style("top", &format!("{top}px"))
                .style("min-width", &format!("{MENU_MIN_WIDTH}px"))
                .style("z-index", "30000")
        })
        .items(open_menu.items.into_iter().map(move |item| {
            menu_row(item, target.clone(), state.clone(), domain.clone())
        }));

    Stack::new().layer(backdrop).layer(menu)
}

fn menu_row(item: MenuItem, target: MenuTarget, state: ContextMenuState, domain: ExplorerDomain) -> impl Element {
    let hovered = Mutable::new(false);
    let label_color = if item.danger { danger() } else { text() };

    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(SPACING_4))
        .item(item.separator.then(|| {
            El::new()
                .s(Width::fill())
                .s(Height::exact(1))
                .s(Background::new().color(border()))
        }))
        .item(
            Row::new()
                .s(Width::fill())
                .s(Height::exact(MENU_ITEM_HEIGHT as u32))
                .s(Padding::new().x(SPACING_12))
                .s(Gap::new().x(SPACING_8))
                .s(Align::new().center_y())
                .s(Cursor::new(CursorIcon::Pointer))
                .s(Background::new().color_signal(
                    hovered
                        .signal()
                        .map_bool(|| Some(surface()), || None),
                ))
                .on_hovered_change(move |is_hovered| hovered.set_neq(is_hovered))
                .on_click(move || {
                    state.close();
                    dispatch(item.action, &target, &domain);
                })
                .item(
                    El::new()
                        .s(Width::exact(16))
                        .s(Font::new().size(12).color(text_muted()))
                        .child(item.icon.glyph()),
                )
                .item(
                    El::new()
                        .s(Font::new().size(13).color(label_color))
                        .child(item.label),
                ),
        )
}
