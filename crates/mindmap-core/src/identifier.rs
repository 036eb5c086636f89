//! Node identifiers.
//!
//! Ids are assigned sequentially in discovery order during extraction and are
//! only meaningful within one extraction pass. They render as `node_<n>`.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// Identifier of an extracted node.
///
/// # Examples
///
/// ```
/// use mindmap_core::identifier::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.to_string(), "node_3");
/// assert_eq!("node_3".parse::<NodeId>(), Ok(id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    const PREFIX: &'static str = "node_";

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in discovery order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Error returned when a string is not of the form `node_<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeIdError(String);

impl fmt::Display for ParseNodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a node id (expected `node_<n>`)", self.0)
    }
}

impl std::error::Error for ParseNodeIdError {}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|digits| digits.parse().ok())
            .map(NodeId)
            .ok_or_else(|| ParseNodeIdError(s.to_string()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
