//! Browser implementation of [`FilesApi`] over `fetch`.
//!
//! Requests carry the bearer token read from local storage at startup and
//! race a timer so a hung backend surfaces as [`FilesApiError::Timeout`].

use crate::platform::FilesApi;
use futures::future::{Either, select};
use serde::de::DeserializeOwned;
use shared::config::ApiSection;
use shared::wire::{
    self, CreateFileRequest, CreateFolderRequest, Endpoint, ListResponse, RenameRequest,
};
use shared::{DownloadedArchive, FileRecord, FilesApiError, UploadFile};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use std::future::Future;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};
use zoon::Timer;

const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

#[derive(Debug, Clone)]
pub struct HttpFilesApi {
    base_url: String,
    token: Option<String>,
    timeout_ms: u32,
}

enum RequestBody {
    Json(String),
    Form(FormData),
}

impl HttpFilesApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            timeout_ms,
        }
    }

    /// Client configured from the `[api]` section, token taken from local storage.
    pub fn from_config(api: &ApiSection) -> Self {
        let token = stored_token(&api.token_storage_key);
        if token.is_none() {
            log::warn!("no auth token under '{}'; requests go out unauthenticated", api.token_storage_key);
        }
        Self::new(api.base_url.clone(), token, api.request_timeout_ms)
    }

    fn url(&self, endpoint: Endpoint, project_id: Option<&str>) -> String {
        wire::endpoint_url(&self.base_url, endpoint, project_id, |id| {
            js_sys::encode_uri_component(id).into()
        })
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        project_id: Option<&str>,
        body: Option<RequestBody>,
    ) -> Result<Response, FilesApiError> {
        let url = self.url(endpoint, project_id);
        log::debug!("{} {url}", endpoint.method());

        let headers = Headers::new().map_err(network_error)?;
        if let Some(token) = &self.token {
            headers
                .set("Authorization", &format!("Bearer {token}"))
                .map_err(network_error)?;
        }

        let init = RequestInit::new();
        init.set_method(endpoint.method());
        match body {
            Some(RequestBody::Json(json)) => {
                headers
                    .set("Content-Type", "application/json")
                    .map_err(network_error)?;
                init.set_body(&JsValue::from_str(&json));
            }
            // Browser sets the multipart boundary header itself
            Some(RequestBody::Form(form)) => init.set_body(&form),
            None => {}
        }
        init.set_headers(&headers);
        let abort_controller = AbortController::new().map_err(network_error)?;
        init.set_signal(Some(&abort_controller.signal()));

        let request = Request::new_with_str_and_init(&url, &init).map_err(network_error)?;
        let window = web_sys::window().ok_or_else(|| FilesApiError::Network("no window".into()))?;
        let fetch = JsFuture::from(window.fetch_with_request(&request));

        let deadline = Timer::sleep(self.timeout_ms);
        let Some(response) = race_deadline(fetch, deadline, || abort_controller.abort()).await else {
            log::warn!("{url} timed out after {} ms, request aborted", self.timeout_ms);
            return Err(FilesApiError::Timeout {
                after_ms: u64::from(self.timeout_ms),
            });
        };
        let response = response.map_err(network_error)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| FilesApiError::Decode("fetch did not yield a Response".into()))?;

        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response_text(&response).await.unwrap_or_default();
        Err(FilesApiError::Http {
            status,
            message: wire::error_message_from_body(&body, endpoint),
        })
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        endpoint: Endpoint,
        project_id: Option<&str>,
        body: &B,
    ) -> Result<Response, FilesApiError> {
        let json = serde_json::to_string(body).map_err(|error| FilesApiError::Decode(error.to_string()))?;
        self.send(endpoint, project_id, Some(RequestBody::Json(json))).await
    }
}

/// Race `request` against `deadline`. `cancel` runs when the deadline wins.
async fn race_deadline<T>(
    request: impl Future<Output = T>,
    deadline: impl Future<Output = ()>,
    cancel: impl FnOnce(),
) -> Option<T> {
    match select(Box::pin(request), Box::pin(deadline)).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => {
            cancel();
            None
        }
    }
}

impl FilesApi for HttpFilesApi {
    async fn list(&self, project_id: Option<&str>) -> Result<Vec<FileRecord>, FilesApiError> {
        let response = self.send(Endpoint::List, project_id, None).await?;
        let listing: ListResponse = read_json(&response).await?;
        Ok(listing.files)
    }

    async fn upload(
        &self,
        files: Vec<UploadFile>,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError> {
        let form = FormData::new().map_err(network_error)?;
        for file in &files {
            let blob = bytes_to_blob(&file.bytes, &file.content_type)?;
            form.append_with_blob_and_filename(wire::UPLOAD_FIELD, &blob, &file.name)
                .map_err(network_error)?;
        }
        self.send(Endpoint::Upload, project_id, Some(RequestBody::Form(form)))
            .await?;
        Ok(())
    }

    async fn delete(
        &self,
        paths: Vec<String>,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError> {
        self.send_json(Endpoint::Delete, project_id, &paths).await?;
        Ok(())
    }

    async fn rename(
        &self,
        old_path: &str,
        new_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError> {
        let body = RenameRequest {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
        };
        self.send_json(Endpoint::Rename, project_id, &body).await?;
        Ok(())
    }

    async fn create_folder(
        &self,
        folder_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError> {
        let body = CreateFolderRequest {
            folder_path: folder_path.to_string(),
        };
        self.send_json(Endpoint::CreateFolder, project_id, &body).await?;
        Ok(())
    }

    async fn create_file(
        &self,
        file_path: &str,
        project_id: Option<&str>,
    ) -> Result<(), FilesApiError> {
        let body = CreateFileRequest {
            file_path: file_path.to_string(),
        };
        self.send_json(Endpoint::CreateFile, project_id, &body).await?;
        Ok(())
    }

    async fn download(
        &self,
        paths: Vec<String>,
        project_id: Option<&str>,
    ) -> Result<DownloadedArchive, FilesApiError> {
        let response = self.send_json(Endpoint::Download, project_id, &paths).await?;
        let content_disposition = response
            .headers()
            .get("content-disposition")
            .ok()
            .flatten();
        let content_type = response
            .headers()
            .get("content-type")
            .ok()
            .flatten()
            .unwrap_or_else(|| ARCHIVE_CONTENT_TYPE.to_string());
        let promise = response.array_buffer().map_err(network_error)?;
        let buffer = JsFuture::from(promise).await.map_err(network_error)?;
        Ok(DownloadedArchive {
            filename: wire::suggested_download_name(content_disposition.as_deref()),
            content_type,
            bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
        })
    }
}

/// Hand a downloaded archive to the browser as a file save.
pub fn save_archive(archive: &DownloadedArchive) -> Result<(), JsValue> {
    let blob = bytes_to_blob(&archive.bytes, &archive.content_type)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&archive.filename);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}

pub fn stored_token(storage_key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(storage_key)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, FilesApiError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(network_error)
}

async fn response_text(response: &Response) -> Result<String, FilesApiError> {
    let promise = response.text().map_err(network_error)?;
    let text = JsFuture::from(promise).await.map_err(network_error)?;
    Ok(text.as_string().unwrap_or_default())
}

async fn read_json<T: DeserializeOwned>(response: &Response) -> Result<T, FilesApiError> {
    let text = response_text(response).await?;
    serde_json::from_str(&text).map_err(|error| FilesApiError::Decode(error.to_string()))
}

fn network_error(error: JsValue) -> FilesApiError {
    FilesApiError::Network(error.as_string().unwrap_or_else(|| format!("{error:?}")))
}

#[cfg(test)]
mod tests {
    use super::race_deadline;
    use futures::future::{pending, ready};
    use std::cell::Cell;

    #[tokio::test]
    async fn expired_deadline_cancels_the_request() {
        let cancelled = Cell::new(false);
        let output = race_deadline(pending::<u32>(), ready(()), || cancelled.set(true)).await;
        assert_eq!(output, None);
        assert!(cancelled.get());
    }

    #[tokio::test]
    async fn finished_request_is_not_cancelled() {
        let cancelled = Cell::new(false);
        let output = race_deadline(ready(7), pending::<()>(), || cancelled.set(true)).await;
        assert_eq!(output, Some(7));
        assert!(!cancelled.get());
    }
}
