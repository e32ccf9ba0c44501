//! Explorer domain: relays the UI emits into and the actors that serve them.

use crate::clipboard;
use crate::dataflow::{Actor, Relay, relay};
use crate::dialogs;
use crate::drag_drop;
use crate::mutations::{MutationOutcome, MutationRequest};
use crate::notifications::{Notifications, Toast, mutation_failure_message};
use crate::platform::HttpFilesApi;
use crate::platform::web::save_archive;
use crate::session::ExplorerSession;
use futures::StreamExt;
use futures::stream::select;
use shared::{DragPayload, ExplorerConfig, MutationError, Project};

pub type Session = ExplorerSession<HttpFilesApi>;

enum ListingEvent {
    ProjectSelected(Option<Project>),
    RefreshRequested,
}

enum ExpansionEvent {
    Toggled(String),
    CollapseAll,
}

#[derive(Clone)]
pub struct ExplorerDomain {
    pub session: Session,
    pub notifications: Notifications,

    pub project_selected_relay: Relay<Option<Project>>,
    pub refresh_requested_relay: Relay<()>,
    pub mutation_requested_relay: Relay<MutationRequest>,
    /// Payload captured in the drop handler, plus the target directory path
    pub node_dropped_relay: Relay<(DragPayload<web_sys::File>, String)>,
    pub node_toggled_relay: Relay<String>,
    pub collapse_all_clicked_relay: Relay<()>,
    pub clipboard_copy_requested_relay: Relay<String>,

    _listing_actor: Actor<()>,
    /// True while a mutation request is being processed
    pub mutation_in_flight: Actor<bool>,
    _drop_actor: Actor<()>,
    _expansion_actor: Actor<()>,
    _clipboard_actor: Actor<()>,
}

impl ExplorerDomain {
    pub fn new(config: &ExplorerConfig) -> Self {
        let api = HttpFilesApi::from_config(&config.api);
        let session = ExplorerSession::new(api, &config.ui.root_label);
        let notifications = Notifications::new();
        let toast_dismiss_ms = config.ui.toast_dismiss_ms;

        let (project_selected_relay, project_selected_stream) = relay::<Option<Project>>();
        let (refresh_requested_relay, refresh_requested_stream) = relay::<()>();
        let (mutation_requested_relay, mut mutation_requested_stream) = relay::<MutationRequest>();
        let (node_dropped_relay, mut node_dropped_stream) =
            relay::<(DragPayload<web_sys::File>, String)>();
        let (node_toggled_relay, node_toggled_stream) = relay::<String>();
        let (collapse_all_clicked_relay, collapse_all_clicked_stream) = relay::<()>();
        let (clipboard_copy_requested_relay, mut clipboard_copy_requested_stream) = relay::<String>();

        let listing_actor = Actor::new((), {
            let session = session.clone();
            async move |_state| {
                let mut events = select(
                    project_selected_stream.map(ListingEvent::ProjectSelected),
                    refresh_requested_stream.map(|()| ListingEvent::RefreshRequested),
                );
                while let Some(event) = events.next().await {
                    match event {
                        ListingEvent::ProjectSelected(project) => {
                            session.select_project(project).await;
                        }
                        ListingEvent::RefreshRequested => {
                            session.refresh().await;
                        }
                    }
                }
            }
        });

        // One mutation at a time, in request order
        let mutation_in_flight = Actor::new(false, {
            let session = session.clone();
            let notifications = notifications.clone();
            async move |in_flight| {
                while let Some(request) = mutation_requested_stream.next().await {
                    in_flight.set_neq(true);
                    run_mutation(&session, &notifications, request, toast_dismiss_ms).await;
                    in_flight.set_neq(false);
                }
            }
        });

        let drop_actor = Actor::new((), {
            let mutation_requested_relay = mutation_requested_relay.clone();
            async move |_state| {
                while let Some((payload, target_path)) = node_dropped_stream.next().await {
                    match drag_drop::load_files(payload).await {
                        Ok(payload) => mutation_requested_relay.send(MutationRequest::Drop {
                            payload,
                            target_path,
                        }),
                        Err(error) => {
                            log::error!("failed to read dropped files: {error:?}");
                            dialogs::alert("Could not read the dropped files.");
                        }
                    }
                }
            }
        });

        let expansion_actor = Actor::new((), {
            let session = session.clone();
            async move |_state| {
                let mut events = select(
                    node_toggled_stream.map(ExpansionEvent::Toggled),
                    collapse_all_clicked_stream.map(|()| ExpansionEvent::CollapseAll),
                );
                while let Some(event) = events.next().await {
                    match event {
                        ExpansionEvent::Toggled(path) => {
                            let expanded = session.toggle(&path);
                            log::trace!("{path} expanded={expanded}");
                        }
                        ExpansionEvent::CollapseAll => session.collapse_all(),
                    }
                }
            }
        });

        let clipboard_actor = Actor::new((), {
            let notifications = notifications.clone();
            async move |_state| {
                while let Some(text) = clipboard_copy_requested_stream.next().await {
                    match clipboard::copy_text(&text).await {
                        Ok(()) => notifications.push(Toast::info("Copied", text, toast_dismiss_ms)),
                        Err(error) => {
                            log::warn!("clipboard write failed: {}", error.0);
                            notifications.push(Toast::clipboard_error(toast_dismiss_ms));
                        }
                    }
                }
            }
        });

        Self {
            session,
            notifications,
            project_selected_relay,
            refresh_requested_relay,
            mutation_requested_relay,
            node_dropped_relay,
            node_toggled_relay,
            collapse_all_clicked_relay,
            clipboard_copy_requested_relay,
            _listing_actor: listing_actor,
            mutation_in_flight,
            _drop_actor: drop_actor,
            _expansion_actor: expansion_actor,
            _clipboard_actor: clipboard_actor,
        }
    }
}

async fn run_mutation(
    session: &Session,
    notifications: &Notifications,
    request: MutationRequest,
    toast_dismiss_ms: u32,
) {
    let success_message = request.success_message();
    match session.apply(request).await {
        Ok(MutationOutcome::Refreshed) => {
            notifications.push(Toast::success(success_message, toast_dismiss_ms));
        }
        Ok(MutationOutcome::Downloaded(archive)) => match save_archive(&archive) {
            Ok(()) => notifications.push(Toast::success(
                format!("Downloaded '{}'", archive.filename),
                toast_dismiss_ms,
            )),
            Err(error) => {
                log::error!("failed to save {}: {error:?}", archive.filename);
                dialogs::alert("Download finished but the file could not be saved.");
            }
        },
        Ok(MutationOutcome::Unchanged) => log::debug!("mutation was a no-op"),
        // Invalid drops just snap back
        Err(MutationError::DropRejected(reason)) => log::debug!("drop ignored: {reason}"),
        Err(error) => {
            if error.is_local() {
                log::info!("mutation rejected: {error}");
            } else {
                log::error!("mutation failed: {error}");
            }
            dialogs::alert(&mutation_failure_message(&error));
        }
    }
}
