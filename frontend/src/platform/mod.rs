//! Files service abstraction
//!
//! The explorer talks to the project files router only through [`FilesApi`].
//! The browser build uses [`web::HttpFilesApi`]; tests drive the session with
//! an in-memory fake.

use shared::{DownloadedArchive, FileRecord, FilesApiError, UploadFile};

/// Remote file operations scoped to an optional project.
///
/// Every call carries the project id as given. `None` addresses the user's
/// unscoped storage.
#[allow(async_fn_in_trait)]
pub trait FilesApi {
    async fn list(&self, project_id: Option<&str>) -> Result<Vec<FileRecord>, FilesApiError>;

    /// File names must already carry the target directory prefix.
    async fn upload(
        &self,
        files: Vec<UploadFile>,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError>;

    async fn delete(&self, paths: Vec<String>, project_id: Option<&str>)
    -> Result<(), FilesApiError>;

    async fn rename(
        &self,
        old_path: &str,
        new_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError>;

    async fn create_folder(
        &self,
        folder_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError>;

    async fn create_file(
        &self,
        file_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError>;

    async fn download(
        &self,
        paths: Vec<String>,
        project_id: Option<&str>,
    ) -> Result<DownloadedArchive, FilesApiError>;
}

pub mod web;

pub use web::HttpFilesApi;

#[cfg(test)]
pub(crate) mod fake;
