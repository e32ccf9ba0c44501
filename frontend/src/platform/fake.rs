//! Recording in-memory [`FilesApi`] for session tests.

use super::FilesApi;
use futures::channel::oneshot;
use shared::{DownloadedArchive, FileRecord, FilesApiError, UploadFile};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List { project_id: Option<String> },
    Upload { names: Vec<String>, project_id: Option<String> },
    Delete { paths: Vec<String>, project_id: Option<String> },
    Rename { old_path: String, new_path: String, project_id: Option<String> },
    CreateFolder { folder_path: String, project_id: Option<String> },
    CreateFile { file_path: String, project_id: Option<String> },
    Download { paths: Vec<String>, project_id: Option<String> },
}

#[derive(Default)]
pub struct FakeFilesApi {
    pub records: RefCell<Vec<FileRecord>>,
    pub calls: RefCell<Vec<ApiCall>>,
    /// Returned by the next mutating call
    pub mutation_failure: RefCell<Option<FilesApiError>>,
    /// Returned by the next listing call
    pub list_failure: RefCell<Option<FilesApiError>>,
    /// When queued, a listing call waits for its gate and answers with its records
    pub list_gates: RefCell<VecDeque<oneshot::Receiver<Vec<FileRecord>>>>,
}

impl FakeFilesApi {
    pub fn with_paths(paths: &[&str]) -> Self {
        let fake = Self::default();
        fake.set_paths(paths);
        fake
    }

    pub fn set_paths(&self, paths: &[&str]) {
        *self.records.borrow_mut() = paths.iter().map(|path| FileRecord::new(*path)).collect();
    }

    pub fn fail_next_mutation(&self, error: FilesApiError) {
        *self.mutation_failure.borrow_mut() = Some(error);
    }

    pub fn gate_next_list(&self) -> oneshot::Sender<Vec<FileRecord>> {
        let (sender, receiver) = oneshot::channel();
        self.list_gates.borrow_mut().push_back(receiver);
        sender
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn list_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, ApiCall::List { .. }))
            .count()
    }

    pub fn mutation_calls(&self) -> Vec<ApiCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !matches!(call, ApiCall::List { .. }))
            .cloned()
            .collect()
    }

    fn record(&self, call: ApiCall) -> Result<(), FilesApiError> {
        self.calls.borrow_mut().push(call);
        match self.mutation_failure.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn owned(project_id: Option<&str>) -> Option<String> {
    project_id.map(str::to_string)
}

impl FilesApi for FakeFilesApi {
    async fn list(&self, project_id: Option<&str>) -> Result<Vec<FileRecord>, FilesApiError> {
        self.calls.borrow_mut().push(ApiCall::List {
            project_id: owned(project_id),
        });
        if let Some(error) = self.list_failure.borrow_mut().take() {
            return Err(error);
        }
        let gate = self.list_gates.borrow_mut().pop_front();
        match gate {
            Some(gate) => Ok(gate.await.unwrap_or_default()),
            None => Ok(self.records.borrow().clone()),
        }
    }

    async fn upload(&self, files: Vec<UploadFile>, project_id: Option<&str>) -> Result<(), FilesApiError> {
        self.record(ApiCall::Upload {
            names: files.into_iter().map(|file| file.name).collect(),
            project_id: owned(project_id),
        })
    }

    async fn delete(&self, paths: Vec<String>, project_id: Option<&str>) -> Result<(), FilesApiError> {
        self.record(ApiCall::Delete {
            paths,
            project_id: owned(project_id),
        })
    }

    async fn rename(&self, old_path: &str, new_path: &str, project_id: Option<&str>) -> Result<(), FilesApiError> {
        self.record(ApiCall::Rename {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
            project_id: owned(project_id),
        })
    }

    async fn create_folder(&self, folder_path: &str, project_id: Option<&str>) -> Result<(), FilesApiError> {
        self.record(ApiCall::CreateFolder {
            folder_path: folder_path.to_string(),
            project_id: owned(project_id),
        })
    }

    async fn create_file(&self, file_path: &str, project_id: Option<&str>) -> Result<(), FilesApiError> {
        self.record(ApiCall::CreateFile {
            file_path: file_path.to_string(),
            project_id: owned(project_id),
        })
    }

    async fn download(&self, paths: Vec<String>, project_id: Option<&str>) -> Result<DownloadedArchive, FilesApiError> {
        self.record(ApiCall::Download {
            paths,
            project_id: owned(project_id),
        })?;
        Ok(DownloadedArchive {
            filename: "project.zip".to_string(),
            content_type: "application/zip".to_string(),
            bytes: vec![0x50, 0x4b],
        })
    }
}
