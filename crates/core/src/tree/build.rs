#![forbid(unsafe_code)]

use super::types::{Node, Record, Tree};
use crate::error::TreeError;
use crate::ids::NodeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Builds a validated hierarchy from flat records.
///
/// Checks run in a fixed order so the reported error is deterministic for a
/// given input: key validity and uniqueness (record order), then parent
/// references, then cycles.
pub fn build(records: &[Record]) -> Result<Tree, TreeError> {
    let mut nodes = Vec::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());

    for record in records {
        let id = NodeId::try_new(record.key.as_str()).map_err(|reason| TreeError::InvalidKey {
            key: record.key.clone(),
            reason,
        })?;
        let parent_id = record
            .parent_key
            .as_deref()
            .map(|parent_key| {
                NodeId::try_new(parent_key).map_err(|reason| TreeError::InvalidParentKey {
                    key: id.as_str().to_string(),
                    parent_key: parent_key.to_string(),
                    reason,
                })
            })
            .transpose()?;

        match index.entry(id.clone()) {
            Entry::Occupied(_) => {
                return Err(TreeError::DuplicateKey {
                    key: id.into_string(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(nodes.len());
            }
        }
        nodes.push(Node {
            id,
            label: record.label.clone(),
            parent_id,
            children: Vec::new(),
        });
    }

    let mut links = Vec::new();
    for (pos, node) in nodes.iter().enumerate() {
        let Some(parent_id) = node.parent_id.as_ref() else {
            continue;
        };
        let Some(&parent_pos) = index.get(parent_id) else {
            return Err(TreeError::DanglingParent {
                key: node.id.as_str().to_string(),
                parent_key: parent_id.as_str().to_string(),
            });
        };
        links.push((parent_pos, pos));
    }
    for (parent_pos, child_pos) in links {
        let child = nodes[child_pos].id.clone();
        nodes[parent_pos].children.push(child);
    }

    ensure_acyclic(&nodes, &index)?;

    debug!(
        nodes = nodes.len(),
        roots = nodes.iter().filter(|n| n.is_root()).count(),
        "tree built"
    );
    Ok(Tree { nodes, index })
}

// Ancestor walk capped at the node count. Nodes proven to reach a root are
// remembered so each chain is walked once.
fn ensure_acyclic(nodes: &[Node], index: &HashMap<NodeId, usize>) -> Result<(), TreeError> {
    let bound = nodes.len();
    let mut rooted = vec![false; nodes.len()];
    let mut chain = Vec::new();

    for start in 0..nodes.len() {
        if rooted[start] {
            continue;
        }
        chain.clear();
        let mut current = start;
        let mut steps = 0usize;
        loop {
            chain.push(current);
            let Some(parent_id) = nodes[current].parent_id.as_ref() else {
                break;
            };
            // Parent references were resolved above.
            let parent = index[parent_id];
            if rooted[parent] {
                break;
            }
            steps += 1;
            if steps > bound {
                return Err(TreeError::Cycle {
                    start_key: nodes[start].id.as_str().to_string(),
                });
            }
            current = parent;
        }
        for &pos in &chain {
            rooted[pos] = true;
        }
    }
    Ok(())
}
