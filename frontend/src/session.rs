//! Explorer session: the active project, its listing and expansion state.
//!
//! All remote reads go through [`ExplorerSession::refresh`], which takes a
//! ticket from the [`FetchSequencer`] so only the newest response lands.

use crate::platform::FilesApi;
use shared::{ExpandedPaths, FilesApiError, Project, TreeNode, build_tree};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use zoon::{Mutable, Signal};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    Ready(Arc<TreeNode>),
    /// Inline error shown instead of the tree until the next good fetch
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied { node_count: usize },
    /// A newer fetch was issued while this one was in flight
    Superseded,
    Failed(FilesApiError),
}

/// Monotonic ticket source for listing fetches.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: Cell<u64>,
}

impl FetchSequencer {
    pub fn issue(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

pub struct ExplorerSession<A> {
    pub(crate) api: Rc<A>,
    default_root_label: Rc<str>,
    pub project: Mutable<Option<Project>>,
    pub listing: Mutable<ListingState>,
    pub expanded: Mutable<ExpandedPaths>,
    pub uploading: Mutable<bool>,
    sequencer: Rc<FetchSequencer>,
}

// Manual impl: sessions share state and must not require `A: Clone`
impl<A> Clone for ExplorerSession<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            default_root_label: self.default_root_label.clone(),
            project: self.project.clone(),
            listing: self.listing.clone(),
            expanded: self.expanded.clone(),
            uploading: self.uploading.clone(),
            sequencer: self.sequencer.clone(),
        }
    }
}

impl<A: FilesApi> ExplorerSession<A> {
    pub fn new(api: A, default_root_label: &str) -> Self {
        Self {
            api: Rc::new(api),
            default_root_label: Rc::from(default_root_label),
            project: Mutable::new(None),
            listing: Mutable::new(ListingState::Loading),
            expanded: Mutable::new(ExpandedPaths::new()),
            uploading: Mutable::new(false),
            sequencer: Rc::new(FetchSequencer::default()),
        }
    }

    pub fn project_id(&self) -> Option<String> {
        self.project.lock_ref().as_ref().map(|project| project.id.clone())
    }

    pub fn root_label(&self) -> String {
        self.project
            .lock_ref()
            .as_ref()
            .map(|project| project.name.clone())
            .unwrap_or_else(|| self.default_root_label.to_string())
    }

    /// Latest successfully built tree, if any.
    pub fn tree(&self) -> Option<Arc<TreeNode>> {
        match &*self.listing.lock_ref() {
            ListingState::Ready(tree) => Some(tree.clone()),
            _ => None,
        }
    }

    /// Switch namespace and load it. Expansion state starts over.
    pub async fn select_project(&self, project: Option<Project>) -> RefreshOutcome {
        log::info!(
            "project selected: {}",
            project.as_ref().map_or("<none>", |project| project.id.as_str())
        );
        self.project.set(project);
        self.expanded.lock_mut().collapse_all();
        self.refresh().await
    }

    /// Fetch the listing and rebuild the tree from scratch.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.sequencer.issue();
        let project_id = self.project_id();
        self.listing.set(ListingState::Loading);

        let result = self.api.list(project_id.as_deref()).await;

        if !self.sequencer.is_current(ticket) {
            log::debug!("discarding listing #{ticket}, superseded");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let built = build_tree(&records, &self.root_label());
                if !built.duplicate_paths.is_empty() {
                    log::warn!(
                        "listing has duplicate paths, keeping the last of each: {}",
                        built.duplicate_paths.join(", ")
                    );
                }
                let node_count = built.root.len();
                self.expanded.lock_mut().retain_existing(&built.root);
                self.listing.set(ListingState::Ready(Arc::new(built.root)));
                log::debug!("listing #{ticket} applied, {node_count} nodes");
                RefreshOutcome::Applied { node_count }
            }
            Err(error) => {
                log::error!("failed to list files: {error}");
                self.listing.set(ListingState::Failed(error.user_message()));
                RefreshOutcome::Failed(error)
            }
        }
    }

    pub fn toggle(&self, path: &str) -> bool {
        self.expanded.lock_mut().toggle(path)
    }

    pub fn collapse_all(&self) {
        self.expanded.lock_mut().collapse_all();
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.lock_ref().is_expanded(path)
    }

    pub fn is_expanded_signal(&self, path: String) -> impl Signal<Item = bool> + use<A> {
        self.expanded
            .signal_ref(move |expanded| expanded.is_expanded(&path))
    }

    pub fn listing_signal(&self) -> impl Signal<Item = ListingState> + use<A> {
        self.listing.signal_cloned()
    }

    pub fn uploading_signal(&self) -> impl Signal<Item = bool> + use<A> {
        self.uploading.signal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{ApiCall, FakeFilesApi};
    use shared::FileRecord;

    fn session(paths: &[&str]) -> ExplorerSession<FakeFilesApi> {
        ExplorerSession::new(FakeFilesApi::with_paths(paths), "My Files")
    }

    fn child_names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|child| child.filename.as_str()).collect()
    }

    #[test]
    fn sequencer_only_honors_latest_ticket() {
        let sequencer = FetchSequencer::default();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[tokio::test]
    async fn refresh_builds_tree() {
        let session = session(&["a/b.txt", "a/c/d.txt", "e.txt"]);
        assert_eq!(session.listing.get_cloned(), ListingState::Loading);

        let outcome = session.refresh().await;
        assert_eq!(outcome, RefreshOutcome::Applied { node_count: 6 });

        let tree = session.tree().unwrap();
        assert_eq!(tree.filename, "My Files");
        assert_eq!(child_names(&tree), ["a", "e.txt"]);
        assert_eq!(child_names(tree.find("a").unwrap()), ["c", "b.txt"]);
    }

    #[tokio::test]
    async fn selecting_project_scopes_listing_and_root() {
        let session = session(&["notes.md"]);
        session.toggle("docs");

        session
            .select_project(Some(Project::new("p-42", "Thesis")))
            .await;

        assert_eq!(
            session.api.calls(),
            [ApiCall::List {
                project_id: Some("p-42".to_string())
            }]
        );
        assert_eq!(session.tree().unwrap().filename, "Thesis");
        assert!(!session.is_expanded("docs"));
    }

    #[tokio::test]
    async fn stale_listing_is_discarded() {
        let session = session(&[]);
        let first_gate = session.api.gate_next_list();
        let second_gate = session.api.gate_next_list();

        let (first, second, ()) = futures::join!(session.refresh(), session.refresh(), async {
            let _ = second_gate.send(vec![FileRecord::new("new.txt")]);
            let _ = first_gate.send(vec![FileRecord::new("old.txt")]);
        });

        assert_eq!(first, RefreshOutcome::Superseded);
        assert_eq!(second, RefreshOutcome::Applied { node_count: 2 });
        assert_eq!(child_names(&session.tree().unwrap()), ["new.txt"]);
    }

    #[tokio::test]
    async fn listing_failure_shows_inline_error() {
        let session = session(&["a.txt"]);
        *session.api.list_failure.borrow_mut() = Some(FilesApiError::Http {
            status: 403,
            message: "Not a project member".to_string(),
        });

        let outcome = session.refresh().await;
        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert_eq!(
            session.listing.get_cloned(),
            ListingState::Failed("Not a project member".to_string())
        );

        session.refresh().await;
        assert!(session.tree().is_some());
    }

    #[tokio::test]
    async fn collapse_all_resets_every_node() {
        let session = session(&["a/b/c.txt", "d/e.txt"]);
        session.refresh().await;
        session.toggle("a");
        session.toggle("a/b");
        session.toggle("d");
        session.toggle(shared::ROOT_PATH);
        assert!(!session.is_expanded(shared::ROOT_PATH));

        session.collapse_all();

        for path in ["a", "a/b", "d"] {
            assert!(!session.is_expanded(path), "{path} still expanded");
        }
        assert!(session.is_expanded(shared::ROOT_PATH));
    }

    #[tokio::test]
    async fn refresh_prunes_vanished_expansions() {
        let session = session(&["a/b.txt", "keep/x.txt"]);
        session.refresh().await;
        session.toggle("a");
        session.toggle("keep");

        session.api.set_paths(&["keep/x.txt"]);
        session.refresh().await;

        let expanded = session.expanded.lock_ref();
        assert_eq!(expanded.expanded_paths().collect::<Vec<_>>(), ["keep"]);
    }
}
