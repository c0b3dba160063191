#![forbid(unsafe_code)]

use crate::ids::{ActionToken, NodeId};
use serde::Serialize;

/// Instruction consumed by the client renderer. Text fields hold the raw
/// record values; escaping happens when a sequence is serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddNode {
        id: NodeId,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_id: Option<NodeId>,
        opened: bool,
    },
    BindSelect {
        action_id: ActionToken,
    },
    BindContextMenu {
        entries: Vec<MenuEntry>,
    },
}

impl Command {
    pub fn is_binding(&self) -> bool {
        !matches!(self, Self::AddNode { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub action_id: ActionToken,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, action_id: ActionToken) -> Self {
        Self {
            label: label.into(),
            action_id,
        }
    }
}
