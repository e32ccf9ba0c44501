//! ProjectExplorerApp - root of the explorer UI

use crate::context_menu::{ContextMenuState, context_menu_layer};
use crate::domain::ExplorerDomain;
use crate::notifications::toast_container;
use crate::theme::*;
use crate::tree_view::tree_view;
use shared::{ExplorerConfig, Project};
use zoon::*;

pub struct ProjectExplorerApp {
    pub domain: ExplorerDomain,
    pub context_menu: ContextMenuState,
    default_title: String,
}

impl ProjectExplorerApp {
    /// Build the domain and start loading `initial_project`.
    pub fn new(config: &ExplorerConfig, initial_project: Option<Project>) -> Self {
        let domain = ExplorerDomain::new(config);
        domain.project_selected_relay.send(initial_project);
        Self {
            domain,
            context_menu: ContextMenuState::default(),
            default_title: config.ui.root_label.clone(),
        }
    }

    pub fn root(&self) -> impl Element {
        Stack::new()
            .s(Height::screen())
            .s(Width::fill())
            .s(Background::new().color(surface()))
            .s(Font::new().color(text()).family([
                FontFamily::new("Inter"),
                FontFamily::new("system-ui"),
                FontFamily::new("Segoe UI"),
                FontFamily::SansSerif,
            ]))
            .layer(
                Column::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .item(self.header())
                    .item(tree_view(self.domain.clone(), self.context_menu.clone())),
            )
            .layer(toast_container(self.domain.notifications.clone()))
            .layer(context_menu_layer(
                self.context_menu.clone(),
                self.domain.clone(),
            ))
    }

    fn header(&self) -> impl Element {
        let default_title = self.default_title.clone();
        Row::new()
            .s(Width::fill())
            .s(Padding::new().x(SPACING_12).y(SPACING_8))
            .s(Gap::new().x(SPACING_8))
            .s(Align::new().center_y())
            .s(Background::new().color(surface_raised()))
            .s(Borders::new().bottom(Border::new().width(1).color(border())))
            .item(
                El::new()
                    .s(Width::growable())
                    .s(Font::new().size(14).weight(FontWeight::SemiBold).no_wrap())
                    .child_signal(self.domain.session.project.signal_cloned().map(
                        move |project| {
                            project.map_or_else(|| default_title.clone(), |project| project.name)
                        },
                    )),
            )
            .item_signal(map_ref! {
                let uploading = self.domain.session.uploading_signal(),
                let in_flight = self.domain.mutation_in_flight.signal() =>
                busy_label(*uploading, *in_flight)
            }.map(|label| {
                label.map(|label| {
                    El::new()
                        .s(Font::new().size(12).color(accent()))
                        .update_raw_el(|raw_el| raw_el.attr("aria-busy", "true"))
                        .child(label)
                })
            }))
            .item(header_button("Refresh", "Reload the file list", {
                let relay = self.domain.refresh_requested_relay.clone();
                move || relay.send(())
            }))
            .item(header_button("Collapse All", "Collapse every folder", {
                let relay = self.domain.collapse_all_clicked_relay.clone();
                move || relay.send(())
            }))
    }
}

fn busy_label(uploading: bool, mutation_in_flight: bool) -> Option<&'static str> {
    if uploading {
        Some("Uploading…")
    } else if mutation_in_flight {
        Some("Saving…")
    } else {
        None
    }
}

fn header_button(label: &'static str, title: &'static str, on_press: impl FnMut() + 'static) -> impl Element {
    Button::new()
        .s(Padding::new().x(SPACING_8).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Font::new().size(12).color(text_muted()))
        .s(Borders::all(Border::new().width(1).color(border())))
        .update_raw_el(move |raw_el| raw_el.attr("title", title))
        .label(label)
        .on_press(on_press)
}

#[cfg(test)]
mod tests {
    use super::busy_label;

    #[test]
    fn upload_label_wins_over_generic_busy() {
        assert_eq!(busy_label(true, true), Some("Uploading…"));
        assert_eq!(busy_label(false, true), Some("Saving…"));
        assert_eq!(busy_label(false, false), None);
    }
}
