use crate::context_menu::ContextMenuState;
use crate::dataflow::Atom;
use crate::domain::ExplorerDomain;
use crate::drag_drop;
use crate::session::ListingState;
use crate::theme::*;
use shared::drag::accepts_hover;
use shared::{TreeNode, format_size};
use zoon::events::{ContextMenu, DragLeave, DragOver, DragStart, Drop as DropEvent};
use zoon::*;

#[derive(Clone)]
struct TreeContext {
    domain: ExplorerDomain,
    menu: ContextMenuState,
    /// Directory currently highlighted as drop target
    hovered_drop_target: Atom<Option<String>>,
}

pub fn tree_view(domain: ExplorerDomain, menu: ContextMenuState) -> impl Element {
    let context = TreeContext {
        domain: domain.clone(),
        menu,
        hovered_drop_target: Atom::new(None),
    };

    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Scrollbars::both())
        .s(Padding::new().y(SPACING_4))
        .update_raw_el(|raw_el| raw_el.style("scrollbar-width", "thin"))
        .child_signal(domain.session.listing_signal().map(move |listing| match listing {
            ListingState::Loading => loading_indicator().unify(),
            ListingState::Failed(message) => listing_error(message, context.domain.clone()).unify(),
            ListingState::Ready(tree) => tree_node(&tree, 0, &context).unify(),
        }))
}

fn loading_indicator() -> impl Element {
    Row::new()
        .s(Padding::all(SPACING_12))
        .s(Gap::new().x(SPACING_8))
        .s(Font::new().size(13).color(text_muted()))
        .update_raw_el(|raw_el| raw_el.attr("aria-busy", "true"))
        .item("⟳")
        .item("Loading files…")
}

fn listing_error(message: String, domain: ExplorerDomain) -> impl Element {
    Column::new()
        .s(Padding::all(SPACING_12))
        .s(Gap::new().y(SPACING_8))
        .item(
            El::new()
                .s(Font::new().size(13).color(danger()).wrap_anywhere())
                .child(Text::new(&message)),
        )
        .item(
            El::new()
                .s(Font::new().size(13).color(accent()))
                .s(Cursor::new(CursorIcon::Pointer))
                .child("Retry")
                .on_click(move || domain.refresh_requested_relay.send(())),
        )
}

// Node without its subtree, for menu and drag-hover decisions
fn shallow(node: &TreeNode) -> TreeNode {
    TreeNode {
        path: node.path.clone(),
        filename: node.filename.clone(),
        kind: node.kind,
        record: node.record.clone(),
        children: Vec::new(),
    }
}

fn tree_node(node: &TreeNode, level: u32, context: &TreeContext) -> impl Element {
    let children = node.children.clone();
    let child_context = context.clone();
    let is_root_without_entries = node.is_root() && node.children.is_empty();

    Column::new()
        .s(Width::fill())
        .item(node_row(node, level, context))
        .item_signal(
            context
                .domain
                .session
                .is_expanded_signal(node.path.clone())
                .map_true(move || {
                    Column::new()
                        .s(Width::fill())
                        .items(
                            children
                                .iter()
                                .map(|child| tree_node(child, level + 1, &child_context).into_element()),
                        )
                        .item(is_root_without_entries.then(empty_hint))
                }),
        )
}

fn empty_hint() -> impl Element {
    El::new()
        .s(Padding::new().left(INDENT_PER_LEVEL + 20).y(SPACING_4))
        .s(Font::new().size(12).color(text_muted()))
        .child("No files yet. Drop files here to upload.")
}

fn node_row(node: &TreeNode, level: u32, context: &TreeContext) -> impl Element {
    let path = node.path.clone();
    let is_directory = node.is_directory();
    let node_for_menu = shallow(node);
    let hover_node = node_for_menu.clone();
    let record = node.to_record();
    let tooltip = node_tooltip(node);
    let domain = context.domain.clone();
    let hovered_drop_target = context.hovered_drop_target.clone();

    let is_drop_target = hovered_drop_target.signal_ref({
        let path = path.clone();
        move |hovered| hovered.as_deref() == Some(path.as_str())
    });

    Row::new()
        .s(Width::fill())
        .s(Height::exact(ROW_HEIGHT))
        .s(Padding::new().left(level * INDENT_PER_LEVEL + SPACING_4).right(SPACING_8))
        .s(Gap::new().x(SPACING_4))
        .s(Align::new().center_y())
        .s(Cursor::new(if is_directory {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        }))
        .s(Font::new().size(13).color(text()).no_wrap())
        .s(Background::new().color_signal(
            is_drop_target.map_bool(|| Some(drop_highlight()), || None),
        ))
        .update_raw_el(move |raw_el| raw_el.attr("title", &tooltip))
        .item(chevron(node, &domain))
        .item(node_icon(node, &domain))
        .item(El::new().child(Text::new(&node.filename)))
        .on_click({
            let path = path.clone();
            let domain = domain.clone();
            move || {
                if is_directory {
                    domain.node_toggled_relay.send(path.clone());
                }
            }
        })
        .update_raw_el({
            let menu = context.menu.clone();
            move |raw_el| {
                raw_el.event_handler(move |event: ContextMenu| {
                    event.prevent_default();
                    event.stop_propagation();
                    menu.open(&node_for_menu, (f64::from(event.x()), f64::from(event.y())));
                })
            }
        })
        .update_raw_el({
            let is_root = node.is_root();
            move |raw_el| {
                if is_root {
                    return raw_el;
                }
                raw_el
                    .attr("draggable", "true")
                    .event_handler(move |event: DragStart| {
                        if let Some(data_transfer) = event.data_transfer() {
                            drag_drop::start_internal_drag(&data_transfer, &record);
                        }
                    })
            }
        })
        .update_raw_el(move |raw_el| {
            if !is_directory {
                return raw_el;
            }
            raw_el
                .event_handler({
                    let path = path.clone();
                    let hovered_drop_target = hovered_drop_target.clone();
                    move |event: DragOver| {
                        let Some(data_transfer) = event.data_transfer() else {
                            return;
                        };
                        if accepts_hover(&hover_node, drag_drop::hovered_kind(&data_transfer)) {
                            event.prevent_default();
                            event.stop_propagation();
                            hovered_drop_target.set_neq(Some(path.clone()));
                        }
                    }
                })
                .event_handler({
                    let path = path.clone();
                    let hovered_drop_target = hovered_drop_target.clone();
                    move |_: DragLeave| {
                        if hovered_drop_target.get_cloned().as_deref() == Some(path.as_str()) {
                            hovered_drop_target.set(None);
                        }
                    }
                })
                .event_handler(move |event: DropEvent| {
                    event.prevent_default();
                    event.stop_propagation();
                    hovered_drop_target.set(None);
                    let Some(payload) = event.data_transfer().and_then(|data_transfer| {
                        drag_drop::read_drop(&data_transfer)
                    }) else {
                        return;
                    };
                    domain.node_dropped_relay.send((payload, path.clone()));
                })
        })
}

fn chevron(node: &TreeNode, domain: &ExplorerDomain) -> impl Element {
    let is_directory = node.is_directory();
    El::new()
        .s(Width::exact(12))
        .s(Font::new().size(10).color(text_muted()))
        .child_signal(
            domain
                .session
                .is_expanded_signal(node.path.clone())
                .map(move |expanded| is_directory.then_some(if expanded { "▾" } else { "▸" })),
        )
}

fn node_icon(node: &TreeNode, domain: &ExplorerDomain) -> impl Element {
    let is_directory = node.is_directory();
    El::new().s(Width::exact(16)).child_signal(
        domain
            .session
            .is_expanded_signal(node.path.clone())
            .map(move |expanded| match (is_directory, expanded) {
                (false, _) => "📄",
                (true, true) => "📂",
                (true, false) => "📁",
            }),
    )
}

fn node_tooltip(node: &TreeNode) -> String {
    if node.is_directory() {
        return node.path.clone();
    }
    let mut tooltip = format!("{}\n{}", node.path, format_size(node.size_bytes()));
    if let Some(content_type) = node.content_type() {
        tooltip.push_str(&format!("\n{content_type}"));
    }
    if let Some(uploaded_at) = node.uploaded_at() {
        tooltip.push_str(&format!("\nUploaded {uploaded_at}"));
    }
    tooltip
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FileRecord, build_tree};

    #[test]
    fn tooltips() {
        let records = vec![FileRecord::new("a/b.txt")
            .with_size(2048)
            .with_uploaded_at("2024-03-01")
            .with_content_type("text/plain")];
        let tree = build_tree(&records, "root").root;
        assert_eq!(
            node_tooltip(tree.find("a/b.txt").unwrap()),
            "a/b.txt\n2.0 KB\ntext/plain\nUploaded 2024-03-01"
        );
        assert_eq!(node_tooltip(tree.find("a").unwrap()), "a");
    }

    #[test]
    fn shallow_copy_drops_children() {
        let records = vec![FileRecord::new("a/b.txt")];
        let tree = build_tree(&records, "root").root;
        let node = shallow(tree.find("a").unwrap());
        assert!(node.children.is_empty());
        assert!(node.is_directory());
    }
}
