//! Drag-and-drop classification and validation.
//!
//! The drag source produces an explicit [`DragPayload`] at drag-start time;
//! [`plan_drop`] turns a payload and a drop target into the single remote
//! operation to perform, or a [`DropRejected`] reason. Nothing here touches
//! the network.

use crate::paths;
use crate::records::FileRecord;
use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type carrying an internal-move payload inside a browser drag.
pub const INTERNAL_MOVE_MIME: &str = "application/x-project-explorer-node";

/// What is being dragged. `F` is the file handle type of the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload<F> {
    /// A node from this tree, serialized at drag start
    InternalMove { record: FileRecord },
    /// Files dragged in from the operating system
    ExternalUpload { files: Vec<F> },
}

/// Payload kind as far as it can be known while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    InternalMove,
    ExternalFiles,
    Unsupported,
}

impl<F> DragPayload<F> {
    pub fn kind(&self) -> DragKind {
        match self {
            Self::InternalMove { .. } => DragKind::InternalMove,
            Self::ExternalUpload { .. } => DragKind::ExternalFiles,
        }
    }
}

/// Serialized body stored under [`INTERNAL_MOVE_MIME`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InternalMoveData {
    pub record: FileRecord,
}

impl InternalMoveData {
    pub fn encode(record: &FileRecord) -> Result<String, serde_json::Error> {
        serde_json::to_string(&InternalMoveData {
            record: record.clone(),
        })
    }

    pub fn decode(data: &str) -> Result<FileRecord, serde_json::Error> {
        serde_json::from_str::<InternalMoveData>(data).map(|data| data.record)
    }
}

/// Classify the type list a browser reports during drag-over.
pub fn classify_drag_types<'a>(types: impl IntoIterator<Item = &'a str>) -> DragKind {
    let mut kind = DragKind::Unsupported;
    for drag_type in types {
        if drag_type == INTERNAL_MOVE_MIME {
            return DragKind::InternalMove;
        }
        if drag_type == "Files" {
            kind = DragKind::ExternalFiles;
        }
    }
    kind
}

/// Whether `node` should show the drop highlight for a payload of `kind`.
pub fn accepts_hover(node: &TreeNode, kind: DragKind) -> bool {
    node.is_directory() && matches!(kind, DragKind::InternalMove | DragKind::ExternalFiles)
}

/// Remote operation a valid drop resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    Move { from: String, to: String },
    Upload { target_dir: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropRejected {
    #[error("drop target is not a folder")]
    TargetNotDirectory,
    #[error("item is already in this folder")]
    SamePath,
    #[error("a folder cannot be moved into itself")]
    IntoSelfOrDescendant,
    #[error("dragged item no longer exists")]
    UnknownSource,
    #[error("drop target no longer exists")]
    UnknownTarget,
    #[error("no files to upload")]
    NothingToUpload,
}

/// Destination path for dropping `filename` onto `target_path`.
pub fn destination_path(target_path: &str, filename: &str) -> String {
    paths::join(target_path, filename)
}

/// Validate a drop against the current tree.
pub fn plan_drop<F>(
    tree: &TreeNode,
    payload: &DragPayload<F>,
    target_path: &str,
) -> Result<DropPlan, DropRejected> {
    let target = tree.find(target_path).ok_or(DropRejected::UnknownTarget)?;
    if !accepts_hover(target, payload.kind()) {
        return Err(DropRejected::TargetNotDirectory);
    }

    match payload {
        DragPayload::InternalMove { record } => {
            let source_path = paths::normalize(&record.path);
            let filename = paths::file_name(&source_path);
            let destination = destination_path(&target.path, filename);
            if destination == source_path {
                return Err(DropRejected::SamePath);
            }
            let source = tree.find(&source_path).ok_or(DropRejected::UnknownSource)?;
            if source.contains(&target.path) {
                return Err(DropRejected::IntoSelfOrDescendant);
            }
            Ok(DropPlan::Move {
                from: source_path,
                to: destination,
            })
        }
        DragPayload::ExternalUpload { files } => {
            if files.is_empty() {
                return Err(DropRejected::NothingToUpload);
            }
            Ok(DropPlan::Upload {
                target_dir: target.path.clone(),
            })
        }
    }
}
