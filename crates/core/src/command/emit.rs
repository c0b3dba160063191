#![forbid(unsafe_code)]

use super::escape::is_transport_safe;
use super::types::Command;
use crate::error::{TextField, TreeError};
use crate::tree::Tree;
use tracing::debug;

/// One `AddNode` per node, in record order.
///
/// Parents are not guaranteed to precede their children; the renderer
/// attaches out-of-order children itself. Every label is checked before the
/// first command is produced, so a rejected pass yields nothing.
pub fn emit(tree: &Tree, collapsed: bool) -> Result<Vec<Command>, TreeError> {
    if let Some(node) = tree.nodes().find(|node| !is_transport_safe(&node.label)) {
        return Err(TreeError::Escape {
            key: node.id.as_str().to_string(),
            field: TextField::Label,
        });
    }

    let opened = !collapsed;
    let commands: Vec<Command> = tree
        .nodes()
        .map(|node| Command::AddNode {
            id: node.id.clone(),
            label: node.label.clone(),
            parent_id: node.parent_id.clone(),
            opened,
        })
        .collect();

    debug!(commands = commands.len(), opened, "nodes emitted");
    Ok(commands)
}
