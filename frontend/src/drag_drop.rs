//! Browser side of drag-and-drop: writing and reading `DataTransfer`.
//!
//! Drop data is only readable inside the drop handler, so [`read_drop`]
//! grabs it synchronously and [`load_files`] reads file contents afterwards.

use shared::FileRecord;
use shared::drag::{DragKind, DragPayload, INTERNAL_MOVE_MIME, InternalMoveData, classify_drag_types};
use shared::UploadFile;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DataTransfer, File};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Tag a drag that starts on one of our nodes.
pub fn start_internal_drag(data_transfer: &DataTransfer, record: &FileRecord) {
    match InternalMoveData::encode(record) {
        Ok(encoded) => {
            if data_transfer.set_data(INTERNAL_MOVE_MIME, &encoded).is_err() {
                log::warn!("could not attach drag payload for {}", record.path);
            }
        }
        Err(error) => log::error!("failed to encode drag payload: {error}"),
    }
    let _ = data_transfer.set_data("text/plain", &record.path);
    data_transfer.set_effect_allowed("move");
}

/// Payload kind while hovering; contents are not readable yet.
pub fn hovered_kind(data_transfer: &DataTransfer) -> DragKind {
    let types: Vec<String> = data_transfer
        .types()
        .iter()
        .filter_map(|value| value.as_string())
        .collect();
    classify_drag_types(types.iter().map(String::as_str))
}

/// Capture the payload inside the drop handler.
pub fn read_drop(data_transfer: &DataTransfer) -> Option<DragPayload<File>> {
    match hovered_kind(data_transfer) {
        DragKind::InternalMove => {
            let data = data_transfer.get_data(INTERNAL_MOVE_MIME).ok()?;
            match InternalMoveData::decode(&data) {
                Ok(record) => Some(DragPayload::InternalMove { record }),
                Err(error) => {
                    log::warn!("ignoring malformed drag payload: {error}");
                    None
                }
            }
        }
        DragKind::ExternalFiles => {
            let list = data_transfer.files()?;
            let files = (0..list.length()).filter_map(|index| list.get(index)).collect();
            Some(DragPayload::ExternalUpload { files })
        }
        DragKind::Unsupported => None,
    }
}

/// Read dropped OS files into memory for upload.
pub async fn load_files(payload: DragPayload<File>) -> Result<DragPayload<UploadFile>, JsValue> {
    match payload {
        DragPayload::InternalMove { record } => Ok(DragPayload::InternalMove { record }),
        DragPayload::ExternalUpload { files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for file in files {
                uploads.push(read_file(&file).await?);
            }
            Ok(DragPayload::ExternalUpload { files: uploads })
        }
    }
}

async fn read_file(file: &File) -> Result<UploadFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let content_type = match file.type_() {
        content_type if content_type.is_empty() => FALLBACK_CONTENT_TYPE.to_string(),
        content_type => content_type,
    };
    Ok(UploadFile::new(
        file.name(),
        content_type,
        js_sys::Uint8Array::new(&buffer).to_vec(),
    ))
}
