#![forbid(unsafe_code)]

use serde::Serialize;
use std::fmt;

const MAX_NODE_ID_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Keys are trimmed before use, so `" 7"` and `"7"` name the same node.
    pub fn try_new(value: impl Into<String>) -> Result<Self, NodeIdError> {
        let value = value.into();
        let trimmed = validate_node_id(&value)?;
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeIdError {
    Empty,
    TooLong,
    ContainsControl,
}

impl NodeIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "key must not be empty",
            Self::TooLong => "key is too long",
            Self::ContainsControl => "key contains control characters",
        }
    }
}

fn validate_node_id(value: &str) -> Result<&str, NodeIdError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NodeIdError::Empty);
    }
    if trimmed.len() > MAX_NODE_ID_LEN {
        return Err(NodeIdError::TooLong);
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(NodeIdError::ContainsControl);
    }
    Ok(trimmed)
}

/// Pre-serialized reference to a server-side action. Never parsed here,
/// only escaped and transported.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionToken(String);

impl ActionToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ActionTokenError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ActionTokenError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text handed to the execution boundary when this action fires for `node`.
    ///
    /// The identifier is percent-encoded the way the client's
    /// `encodeURIComponent` does it. Keys made of letters, digits and `-_.~`
    /// come out unchanged, matching the older raw `&key=<id>` form; keys with
    /// other characters (`&`, `=`, spaces, non-ASCII) differ from a raw append.
    pub fn for_node(&self, node: &NodeId) -> String {
        format!("{}&key={}", self.0, percent_encode_component(node.as_str()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTokenError {
    Empty,
}

impl ActionTokenError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "action token must not be empty",
        }
    }
}

// Matches the client's encodeURIComponent: unreserved plus !'()* stay literal.
fn percent_encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Mount point of one rendered tree. Supplied by the caller so that
/// uniqueness never depends on process-wide state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn try_new(value: impl Into<String>) -> Result<Self, ContainerIdError> {
        let value = value.into();
        validate_container_id(&value)?;
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(format!("tree_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerIdError {
    Empty,
    TooLong,
    InvalidFirstChar,
    InvalidChar { ch: char, index: usize },
}

impl ContainerIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "container id must not be empty",
            Self::TooLong => "container id is too long",
            Self::InvalidFirstChar => "container id must start with a letter or '_'",
            Self::InvalidChar { .. } => "container id may only contain [A-Za-z0-9_-]",
        }
    }
}

fn validate_container_id(value: &str) -> Result<(), ContainerIdError> {
    if value.is_empty() {
        return Err(ContainerIdError::Empty);
    }
    if value.len() > 128 {
        return Err(ContainerIdError::TooLong);
    }
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(ContainerIdError::Empty);
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(ContainerIdError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate().skip(1) {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-') {
            continue;
        }
        return Err(ContainerIdError::InvalidChar { ch, index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_validation() {
        assert_eq!(NodeId::try_new("").unwrap_err(), NodeIdError::Empty);
        assert_eq!(NodeId::try_new("   ").unwrap_err(), NodeIdError::Empty);
        assert_eq!(
            NodeId::try_new("a\u{0007}b").unwrap_err(),
            NodeIdError::ContainsControl
        );
        assert_eq!(
            NodeId::try_new("x".repeat(257)).unwrap_err(),
            NodeIdError::TooLong
        );
        assert_eq!(NodeId::try_new(" 42 ").unwrap().as_str(), "42");
    }

    #[test]
    fn action_token_appends_encoded_key() {
        let token = ActionToken::new("class=Folders&method=onSelect").unwrap();
        let plain = NodeId::try_new("17").unwrap();
        assert_eq!(
            token.for_node(&plain),
            "class=Folders&method=onSelect&key=17"
        );

        let tricky = NodeId::try_new("a&b=c d").unwrap();
        assert_eq!(
            token.for_node(&tricky),
            "class=Folders&method=onSelect&key=a%26b%3Dc%20d"
        );
        assert_eq!(
            ActionToken::new("").unwrap_err(),
            ActionTokenError::Empty
        );
    }

    #[test]
    fn container_id_validation() {
        assert_eq!(ContainerId::try_new("").unwrap_err(), ContainerIdError::Empty);
        assert_eq!(
            ContainerId::try_new("1tree").unwrap_err(),
            ContainerIdError::InvalidFirstChar
        );
        assert_eq!(
            ContainerId::try_new("tree x").unwrap_err(),
            ContainerIdError::InvalidChar { ch: ' ', index: 4 }
        );
        assert_eq!(
            ContainerId::try_new("folder-tree").unwrap().as_str(),
            "folder-tree"
        );
    }

    #[test]
    fn generated_container_ids_are_valid_and_distinct() {
        let a = ContainerId::generate();
        let b = ContainerId::generate();
        assert_ne!(a, b);
        assert!(ContainerId::try_new(a.as_str()).is_ok());
        assert!(a.as_str().starts_with("tree_"));
    }
}
