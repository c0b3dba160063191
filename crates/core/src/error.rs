#![forbid(unsafe_code)]

use crate::ids::NodeIdError;

/// Field of a command whose text could not be made transport-safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Label,
    SelectAction,
    MenuLabel,
    MenuAction,
}

impl TextField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::SelectAction => "select_action",
            Self::MenuLabel => "menu_label",
            Self::MenuAction => "menu_action",
        }
    }
}

/// Every way a render pass can be rejected before a command leaves the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    InvalidKey {
        key: String,
        reason: NodeIdError,
    },
    InvalidParentKey {
        key: String,
        parent_key: String,
        reason: NodeIdError,
    },
    DuplicateKey {
        key: String,
    },
    DanglingParent {
        key: String,
        parent_key: String,
    },
    Cycle {
        start_key: String,
    },
    /// `key` is the record key for labels, or the menu entry position for
    /// action text.
    Escape {
        key: String,
        field: TextField,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey { key, reason } => {
                write!(f, "invalid key {key:?}: {}", reason.message())
            }
            Self::InvalidParentKey {
                key,
                parent_key,
                reason,
            } => write!(
                f,
                "invalid parent key {parent_key:?} on {key:?}: {}",
                reason.message()
            ),
            Self::DuplicateKey { key } => write!(f, "duplicate key (key={key})"),
            Self::DanglingParent { key, parent_key } => {
                write!(f, "dangling parent (key={key}, parent_key={parent_key})")
            }
            Self::Cycle { start_key } => write!(f, "parent cycle (start_key={start_key})"),
            Self::Escape { key, field } => write!(
                f,
                "unescapable text (key={key}, field={})",
                field.as_str()
            ),
        }
    }
}

impl std::error::Error for TreeError {}
