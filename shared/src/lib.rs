//! Platform-neutral core of the project explorer: records, tree building,
//! expansion state, context menus, drag-and-drop planning and wire shapes.

pub mod config;
pub mod drag;
pub mod error;
pub mod expansion;
pub mod menu;
pub mod paths;
pub mod records;
pub mod tree;
pub mod wire;

pub use config::ExplorerConfig;
pub use drag::{DragKind, DragPayload, DropPlan, DropRejected};
pub use error::{FilesApiError, MutationError};
pub use expansion::ExpandedPaths;
pub use menu::{MenuAction, MenuIcon, MenuItem, context_menu_items};
pub use paths::ROOT_PATH;
pub use records::{DownloadedArchive, FileRecord, Project, UploadFile};
pub use tree::{BuiltTree, NodeKind, TreeNode, build_tree};

// ===== UTILITY FUNCTIONS =====

/// Human-readable byte count for tooltips.
pub fn format_size(size_bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = size_bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size_bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
