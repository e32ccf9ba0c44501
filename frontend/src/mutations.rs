//! Remote mutations of the active project.
//!
//! Every operation validates its input locally, issues exactly one remote
//! call and, on success, reloads the listing. Failures change nothing.

use crate::platform::FilesApi;
use crate::session::ExplorerSession;
use shared::drag::plan_drop;
use shared::paths;
use shared::{DownloadedArchive, DragPayload, DropPlan, DropRejected, MutationError, UploadFile};

#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    CreateFile { parent: String, name: String },
    CreateFolder { parent: String, name: String },
    /// Rename in place; `new_name` replaces the last path segment
    Rename { path: String, new_name: String },
    Delete { paths: Vec<String> },
    Download { paths: Vec<String> },
    Upload { target_dir: String, files: Vec<UploadFile> },
    Drop { payload: DragPayload<UploadFile>, target_path: String },
}

impl MutationRequest {
    /// Toast text after a successful run.
    pub fn success_message(&self) -> String {
        match self {
            Self::CreateFile { name, .. } => format!("Created file '{}'", name.trim()),
            Self::CreateFolder { name, .. } => format!("Created folder '{}'", name.trim()),
            Self::Rename { new_name, .. } => format!("Renamed to '{}'", new_name.trim()),
            Self::Delete { paths } => match paths.as_slice() {
                [path] => format!("Deleted '{}'", paths::file_name(path)),
                _ => format!("Deleted {} items", paths.len()),
            },
            Self::Download { .. } => "Download started".to_string(),
            Self::Upload { files, .. } => format!("Uploaded {} file(s)", files.len()),
            Self::Drop { payload, .. } => match payload {
                DragPayload::InternalMove { record } => {
                    format!("Moved '{}'", paths::file_name(&paths::normalize(&record.path)))
                }
                DragPayload::ExternalUpload { files } => format!("Uploaded {} file(s)", files.len()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Refreshed,
    /// Nothing to do, no remote call was made
    Unchanged,
    Downloaded(DownloadedArchive),
}

impl<A: FilesApi> ExplorerSession<A> {
    pub async fn apply(&self, request: MutationRequest) -> Result<MutationOutcome, MutationError> {
        match request {
            MutationRequest::CreateFile { parent, name } => self.create_file(&parent, &name).await,
            MutationRequest::CreateFolder { parent, name } => self.create_folder(&parent, &name).await,
            MutationRequest::Rename { path, new_name } => self.rename_entry(&path, &new_name).await,
            MutationRequest::Delete { paths } => self.delete(paths).await,
            MutationRequest::Download { paths } => self.download(paths).await,
            MutationRequest::Upload { target_dir, files } => self.upload(&target_dir, files).await,
            MutationRequest::Drop { payload, target_path } => {
                self.drop_payload(payload, &target_path).await
            }
        }
    }

    pub async fn create_file(&self, parent: &str, name: &str) -> Result<MutationOutcome, MutationError> {
        let name = paths::validate_entry_name(name)?;
        let file_path = paths::join(parent, &name);
        self.api
            .create_file(&file_path, self.project_id().as_deref())
            .await?;
        log::info!("created file {file_path}");
        self.reload().await
    }

    pub async fn create_folder(&self, parent: &str, name: &str) -> Result<MutationOutcome, MutationError> {
        let name = paths::validate_entry_name(name)?;
        let folder_path = paths::join(parent, &name);
        self.api
            .create_folder(&folder_path, self.project_id().as_deref())
            .await?;
        log::info!("created folder {folder_path}");
        self.reload().await
    }

    /// Give the entry at `path` a new name in the same directory.
    pub async fn rename_entry(&self, path: &str, new_name: &str) -> Result<MutationOutcome, MutationError> {
        let new_name = paths::validate_entry_name(new_name)?;
        let new_path = paths::join(paths::parent(path), &new_name);
        self.rename(path, &new_path).await
    }

    pub async fn rename(&self, old_path: &str, new_path: &str) -> Result<MutationOutcome, MutationError> {
        let new_path = paths::validate_entry_name(new_path)?;
        if new_path == paths::normalize(old_path) {
            return Ok(MutationOutcome::Unchanged);
        }
        self.api
            .rename(old_path, &new_path, self.project_id().as_deref())
            .await?;
        log::info!("renamed {old_path} -> {new_path}");
        self.reload().await
    }

    pub async fn delete(&self, paths: Vec<String>) -> Result<MutationOutcome, MutationError> {
        if paths.is_empty() {
            return Err(MutationError::NothingSelected);
        }
        let count = paths.len();
        self.api.delete(paths, self.project_id().as_deref()).await?;
        log::info!("deleted {count} item(s)");
        self.reload().await
    }

    pub async fn download(&self, paths: Vec<String>) -> Result<MutationOutcome, MutationError> {
        if paths.is_empty() {
            return Err(MutationError::NothingSelected);
        }
        let archive = self.api.download(paths, self.project_id().as_deref()).await?;
        log::info!("downloaded {} ({} bytes)", archive.filename, archive.bytes.len());
        self.reload().await?;
        Ok(MutationOutcome::Downloaded(archive))
    }

    /// Upload into `target_dir`; file names get the directory prefix.
    pub async fn upload(
        &self,
        target_dir: &str,
        files: Vec<UploadFile>,
    ) -> Result<MutationOutcome, MutationError> {
        if files.is_empty() {
            return Err(DropRejected::NothingToUpload.into());
        }
        let files: Vec<UploadFile> = files
            .into_iter()
            .map(|file| file.into_directory(target_dir))
            .collect();
        let count = files.len();

        self.uploading.set(true);
        let result = self.api.upload(files, self.project_id().as_deref()).await;
        self.uploading.set(false);

        result?;
        log::info!("uploaded {count} file(s) into {target_dir}");
        self.reload().await
    }

    /// Single entry point for anything dropped on the tree.
    pub async fn drop_payload(
        &self,
        payload: DragPayload<UploadFile>,
        target_path: &str,
    ) -> Result<MutationOutcome, MutationError> {
        let tree = self.tree().ok_or(MutationError::NoProjectTree)?;
        let plan = plan_drop(&tree, &payload, target_path).inspect_err(|reason| {
            log::debug!("drop on {target_path} rejected: {reason}");
        })?;

        match (plan, payload) {
            (DropPlan::Move { from, to }, _) => self.rename(&from, &to).await,
            (DropPlan::Upload { target_dir }, DragPayload::ExternalUpload { files }) => {
                self.upload(&target_dir, files).await
            }
            (DropPlan::Upload { .. }, DragPayload::InternalMove { .. }) => {
                Err(DropRejected::UnknownSource.into())
            }
        }
    }

    // Reload errors show inline in the tree; the mutation itself succeeded.
    async fn reload(&self) -> Result<MutationOutcome, MutationError> {
        self.refresh().await;
        Ok(MutationOutcome::Refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{ApiCall, FakeFilesApi};
    use crate::session::ListingState;
    use shared::{FileRecord, FilesApiError, Project, ROOT_PATH};

    async fn loaded(paths: &[&str]) -> ExplorerSession<FakeFilesApi> {
        let session = ExplorerSession::new(FakeFilesApi::with_paths(paths), "My Files");
        session
            .select_project(Some(Project::new("p1", "Demo")))
            .await;
        session.api.calls.borrow_mut().clear();
        session
    }

    fn p1() -> Option<String> {
        Some("p1".to_string())
    }

    #[tokio::test]
    async fn rename_issues_one_call_then_one_refetch() {
        let session = loaded(&["a/b.txt"]).await;
        session.api.set_paths(&["a/z.txt"]);

        let outcome = session.rename("a/b.txt", "a/z.txt").await.unwrap();

        assert_eq!(outcome, MutationOutcome::Refreshed);
        assert_eq!(
            session.api.calls(),
            [
                ApiCall::Rename {
                    old_path: "a/b.txt".to_string(),
                    new_path: "a/z.txt".to_string(),
                    project_id: p1(),
                },
                ApiCall::List { project_id: p1() },
            ]
        );
        assert!(session.tree().unwrap().find("a/z.txt").is_some());
    }

    #[tokio::test]
    async fn rename_entry_keeps_directory() {
        let session = loaded(&["a/b.txt"]).await;
        session.rename_entry("a/b.txt", "  notes.md ").await.unwrap();
        assert_eq!(
            session.api.mutation_calls(),
            [ApiCall::Rename {
                old_path: "a/b.txt".to_string(),
                new_path: "a/notes.md".to_string(),
                project_id: p1(),
            }]
        );
    }

    #[tokio::test]
    async fn rename_to_same_path_is_a_no_op() {
        let session = loaded(&["a/b.txt"]).await;
        let outcome = session.rename_entry("a/b.txt", "b.txt").await.unwrap();
        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn rename_rejects_blank_and_traversal_targets() {
        let session = loaded(&["a/b.txt"]).await;

        assert_eq!(
            session.rename("a/b.txt", "   ").await,
            Err(MutationError::EmptyName)
        );
        for target in ["../x", "a/./b", "a/../b.txt"] {
            assert!(matches!(
                session.rename("a/b.txt", target).await,
                Err(MutationError::InvalidName(_))
            ));
        }
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_names_never_reach_the_network() {
        let session = loaded(&["a/b.txt"]).await;

        for name in ["", "   ", "\t"] {
            assert_eq!(
                session.create_file(ROOT_PATH, name).await,
                Err(MutationError::EmptyName)
            );
            assert_eq!(
                session.create_folder("a", name).await,
                Err(MutationError::EmptyName)
            );
            assert_eq!(
                session.rename_entry("a/b.txt", name).await,
                Err(MutationError::EmptyName)
            );
        }
        assert!(matches!(
            session.create_folder(ROOT_PATH, "../escape").await,
            Err(MutationError::InvalidName(_))
        ));
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn create_places_entries_under_parent() {
        let session = loaded(&["a/b.txt"]).await;
        session.create_file(ROOT_PATH, "todo.md").await.unwrap();
        session.create_folder("a", "drafts").await.unwrap();

        assert_eq!(
            session.api.mutation_calls(),
            [
                ApiCall::CreateFile {
                    file_path: "todo.md".to_string(),
                    project_id: p1(),
                },
                ApiCall::CreateFolder {
                    folder_path: "a/drafts".to_string(),
                    project_id: p1(),
                },
            ]
        );
        assert_eq!(session.api.list_count(), 2);
    }

    #[tokio::test]
    async fn moving_into_own_descendant_makes_no_call() {
        let session = loaded(&["a/b.txt", "a/c/d.txt"]).await;
        let before = session.listing.get_cloned();

        for target in ["a", "a/c"] {
            let payload = DragPayload::InternalMove {
                record: FileRecord::new("a"),
            };
            let result = session.drop_payload(payload, target).await;
            assert!(matches!(result, Err(MutationError::DropRejected(_))), "{target}");
        }

        assert!(session.api.calls().is_empty());
        assert_eq!(session.listing.get_cloned(), before);
    }

    #[tokio::test]
    async fn internal_drop_renames_into_target() {
        let session = loaded(&["a/b.txt", "docs/x.md"]).await;
        let payload = DragPayload::InternalMove {
            record: FileRecord::new("a/b.txt"),
        };

        session.drop_payload(payload, "docs").await.unwrap();

        assert_eq!(
            session.api.mutation_calls(),
            [ApiCall::Rename {
                old_path: "a/b.txt".to_string(),
                new_path: "docs/b.txt".to_string(),
                project_id: p1(),
            }]
        );
    }

    #[tokio::test]
    async fn external_drop_uploads_into_hovered_directory() {
        let session = loaded(&["docs/x.md"]).await;
        let payload = DragPayload::ExternalUpload {
            files: vec![UploadFile::new("photo.png", "image/png", vec![1, 2])],
        };

        session.drop_payload(payload, "docs").await.unwrap();

        assert_eq!(
            session.api.mutation_calls(),
            [ApiCall::Upload {
                names: vec!["docs/photo.png".to_string()],
                project_id: p1(),
            }]
        );
        assert!(!session.uploading.get());
    }

    #[tokio::test]
    async fn drop_on_file_is_rejected() {
        let session = loaded(&["a/b.txt", "e.txt"]).await;
        let payload = DragPayload::InternalMove {
            record: FileRecord::new("e.txt"),
        };
        assert_eq!(
            session.drop_payload(payload, "a/b.txt").await,
            Err(MutationError::DropRejected(DropRejected::TargetNotDirectory))
        );
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_leaves_state_untouched() {
        let session = loaded(&["a/b.txt"]).await;
        let before = session.listing.get_cloned();
        assert!(matches!(before, ListingState::Ready(_)));

        let error = FilesApiError::Http {
            status: 409,
            message: "Target already exists".to_string(),
        };
        session.api.fail_next_mutation(error.clone());

        let result = session.rename("a/b.txt", "a/c.txt").await;

        assert_eq!(result, Err(MutationError::Api(error)));
        assert_eq!(session.api.list_count(), 0);
        assert_eq!(session.listing.get_cloned(), before);
    }

    #[tokio::test]
    async fn failed_upload_clears_uploading_flag() {
        let session = loaded(&[]).await;
        session.api.fail_next_mutation(FilesApiError::Timeout { after_ms: 30_000 });

        let result = session
            .upload(ROOT_PATH, vec![UploadFile::new("a.txt", "text/plain", vec![])])
            .await;

        assert!(result.is_err());
        assert!(!session.uploading.get());
        assert_eq!(session.api.list_count(), 0);
    }

    #[tokio::test]
    async fn empty_selections_are_rejected() {
        let session = loaded(&["a.txt"]).await;
        assert_eq!(session.delete(vec![]).await, Err(MutationError::NothingSelected));
        assert_eq!(session.download(vec![]).await, Err(MutationError::NothingSelected));
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn download_returns_archive_and_refetches() {
        let session = loaded(&["a.txt"]).await;
        let outcome = session.download(vec!["a.txt".to_string()]).await.unwrap();

        let MutationOutcome::Downloaded(archive) = outcome else {
            panic!("expected archive, got {outcome:?}");
        };
        assert_eq!(archive.filename, "project.zip");
        assert_eq!(session.api.list_count(), 1);
    }

    #[test]
    fn success_messages() {
        let delete_one = MutationRequest::Delete {
            paths: vec!["a/b.txt".to_string()],
        };
        assert_eq!(delete_one.success_message(), "Deleted 'b.txt'");
        let delete_many = MutationRequest::Delete {
            paths: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(delete_many.success_message(), "Deleted 2 items");
    }
}
