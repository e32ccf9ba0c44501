//! Request and response shapes of the remote Files API.

use crate::records::FileRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOWNLOAD_NAME: &str = "download.zip";
pub const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Upload,
    Delete,
    Rename,
    CreateFolder,
    CreateFile,
    Download,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::List => "/details",
            Self::Upload => "/upload",
            Self::Delete => "/delete",
            Self::Rename => "/rename",
            Self::CreateFolder => "/create-folder",
            Self::CreateFile => "/create-file",
            Self::Download => "/download",
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            Self::List => "GET",
            _ => "POST",
        }
    }

    /// Message used when a failed response carries no `detail`.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to list files",
            Self::Upload => "File upload failed",
            Self::Delete => "Failed to delete items",
            Self::Rename => "Failed to rename item",
            Self::CreateFolder => "Failed to create folder",
            Self::CreateFile => "Failed to create file",
            Self::Download => "Download failed",
        }
    }
}

/// Full request URL, with the project scope as a query parameter.
///
/// `encode` percent-encodes the project id; the platform supplies it.
pub fn endpoint_url(
    base_url: &str,
    endpoint: Endpoint,
    project_id: Option<&str>,
    encode: impl Fn(&str) -> String,
) -> String {
    let base = base_url.trim_end_matches('/');
    match project_id {
        Some(id) => format!("{base}{}?project_id={}", endpoint.path(), encode(id)),
        None => format!("{base}{}", endpoint.path()),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ListResponse {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenameRequest {
    pub old_path: String,
    pub new_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateFolderRequest {
    pub folder_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateFileRequest {
    pub file_path: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Human-readable message from an error response body.
pub fn error_message_from_body(body: &str, endpoint: Endpoint) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail);
    match detail {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => text,
        Some(serde_json::Value::Null) | None => endpoint.failure_message().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Suggested file name from a `Content-Disposition` header value.
pub fn suggested_download_name(content_disposition: Option<&str>) -> String {
    content_disposition
        .filter(|header| header.to_ascii_lowercase().contains("attachment"))
        .and_then(filename_parameter)
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

fn filename_parameter(header: &str) -> Option<String> {
    let mut plain = None;
    for parameter in header_parameters(header) {
        let Some((key, value)) = parameter.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }
        if key == "filename*" {
            // RFC 5987: charset'language'value
            let encoded = value.rsplit('\'').next().unwrap_or(value);
            let decoded = urlencoding::decode_binary(encoded.as_bytes());
            return Some(String::from_utf8_lossy(&decoded).into_owned());
        }
        if key == "filename" {
            plain = Some(value.to_string());
        }
    }
    plain
}

/// Split header parameters on `;` outside of double quotes.
fn header_parameters(header: &str) -> Vec<&str> {
    let mut parameters = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (index, character) in header.char_indices() {
        match character {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parameters.push(&header[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parameters.push(&header[start..]);
    parameters
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|inner| inner.strip_suffix('\''))
        })
        .unwrap_or(value)
}
