use crate::tree::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    NewFile,
    NewFolder,
    CopyName,
    CopyProjectId,
    CopyFilename,
    CopyPath,
    Rename,
    Download,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    FilePlus,
    FolderPlus,
    Copy,
    Hash,
    Pencil,
    Download,
    Trash,
}

impl MenuIcon {
    /// Glyph used by the text-only renderer.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::FilePlus => "📄",
            Self::FolderPlus => "📁",
            Self::Copy => "⧉",
            Self::Hash => "#",
            Self::Pencil => "✎",
            Self::Download => "⤓",
            Self::Trash => "🗑",
        }
    }
}

/// One context menu entry. `separator` draws a rule above the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub icon: MenuIcon,
    pub danger: bool,
    pub separator: bool,
}

impl MenuItem {
    const fn new(label: &'static str, action: MenuAction, icon: MenuIcon) -> Self {
        Self {
            label,
            action,
            icon,
            danger: false,
            separator: false,
        }
    }

    const fn after_separator(mut self) -> Self {
        self.separator = true;
        self
    }

    const fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

const ROOT_ITEMS: [MenuItem; 4] = [
    MenuItem::new("New File", MenuAction::NewFile, MenuIcon::FilePlus),
    MenuItem::new("New Folder", MenuAction::NewFolder, MenuIcon::FolderPlus),
    MenuItem::new("Copy Name", MenuAction::CopyName, MenuIcon::Copy).after_separator(),
    MenuItem::new("Copy Project ID", MenuAction::CopyProjectId, MenuIcon::Hash),
];

const NODE_ITEMS: [MenuItem; 5] = [
    MenuItem::new("Copy Filename", MenuAction::CopyFilename, MenuIcon::Copy),
    MenuItem::new("Copy Path", MenuAction::CopyPath, MenuIcon::Copy),
    MenuItem::new("Rename", MenuAction::Rename, MenuIcon::Pencil).after_separator(),
    MenuItem::new("Download", MenuAction::Download, MenuIcon::Download),
    MenuItem::new("Delete", MenuAction::Delete, MenuIcon::Trash)
        .after_separator()
        .danger(),
];

/// Ordered context menu entries for `node`.
pub fn context_menu_items(node: &TreeNode) -> Vec<MenuItem> {
    if node.is_root() {
        ROOT_ITEMS.to_vec()
    } else {
        NODE_ITEMS.to_vec()
    }
}

// ===== POSITIONING =====

pub const MENU_MIN_WIDTH: f64 = 200.0;
pub const MENU_ITEM_HEIGHT: f64 = 30.0;
pub const MENU_SEPARATOR_HEIGHT: f64 = 9.0;
pub const MENU_PADDING: f64 = 4.0;
pub const VIEWPORT_MARGIN: f64 = 5.0;

/// Rendered size of a menu holding `items`.
pub fn estimated_menu_size(items: &[MenuItem]) -> (f64, f64) {
    let separators = items.iter().filter(|item| item.separator).count() as f64;
    let height = items.len() as f64 * MENU_ITEM_HEIGHT
        + separators * MENU_SEPARATOR_HEIGHT
        + 2.0 * MENU_PADDING;
    (MENU_MIN_WIDTH, height)
}

/// Shift the menu origin so a `size` menu opened at `anchor` stays inside
/// `viewport`.
pub fn clamp_menu_position(anchor: (f64, f64), size: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let clamp_axis = |origin: f64, extent: f64, limit: f64| {
        let shifted = if origin + extent > limit {
            limit - extent - VIEWPORT_MARGIN
        } else {
            origin
        };
        shifted.max(0.0)
    };
    (
        clamp_axis(anchor.0, size.0, viewport.0),
        clamp_axis(anchor.1, size.1, viewport.1),
    )
}
