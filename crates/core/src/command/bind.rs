#![forbid(unsafe_code)]

use super::escape::is_transport_safe;
use super::types::{Command, MenuEntry};
use crate::error::{TextField, TreeError};
use crate::ids::{ActionToken, NodeId};
use tracing::debug;

/// Actions wired to the rendered tree. Empty bindings leave the tree in
/// display-only mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    select: Option<ActionToken>,
    context_menu: Vec<MenuEntry>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previously configured selection action.
    pub fn set_select(&mut self, action_id: ActionToken) {
        self.select = Some(action_id);
    }

    /// Appends a context-menu entry. Registering an identical entry again is
    /// a no-op; returns whether the entry was added.
    pub fn add_menu_entry(&mut self, entry: MenuEntry) -> bool {
        if self.context_menu.contains(&entry) {
            return false;
        }
        self.context_menu.push(entry);
        true
    }

    pub fn select(&self) -> Option<&ActionToken> {
        self.select.as_ref()
    }

    pub fn context_menu(&self) -> &[MenuEntry] {
        &self.context_menu
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_none() && self.context_menu.is_empty()
    }

    /// Token sent to the execution boundary when `node` is selected.
    pub fn select_token(&self, node: &NodeId) -> Option<String> {
        self.select.as_ref().map(|action| action.for_node(node))
    }

    /// Token sent when the context-menu entry at `position` fires on `node`.
    pub fn menu_token(&self, position: usize, node: &NodeId) -> Option<String> {
        self.context_menu
            .get(position)
            .map(|entry| entry.action_id.for_node(node))
    }
}

pub fn bind_select(action_id: &ActionToken) -> Result<Command, TreeError> {
    if !is_transport_safe(action_id.as_str()) {
        return Err(TreeError::Escape {
            key: "select".to_string(),
            field: TextField::SelectAction,
        });
    }
    Ok(Command::BindSelect {
        action_id: action_id.clone(),
    })
}

/// `None` when no entries are registered.
pub fn bind_context_menu(entries: &[MenuEntry]) -> Result<Option<Command>, TreeError> {
    if entries.is_empty() {
        return Ok(None);
    }
    for (position, entry) in entries.iter().enumerate() {
        if !is_transport_safe(&entry.label) {
            return Err(TreeError::Escape {
                key: format!("menu[{position}]"),
                field: TextField::MenuLabel,
            });
        }
        if !is_transport_safe(entry.action_id.as_str()) {
            return Err(TreeError::Escape {
                key: format!("menu[{position}]"),
                field: TextField::MenuAction,
            });
        }
    }
    Ok(Some(Command::BindContextMenu {
        entries: entries.to_vec(),
    }))
}

/// Binding commands for `bindings`: selection first, then the context menu.
pub fn bind(bindings: &Bindings) -> Result<Vec<Command>, TreeError> {
    let mut commands = Vec::new();
    if let Some(action_id) = bindings.select() {
        commands.push(bind_select(action_id)?);
    }
    if let Some(menu) = bind_context_menu(bindings.context_menu())? {
        commands.push(menu);
    }
    debug!(bindings = commands.len(), "actions bound");
    Ok(commands)
}
