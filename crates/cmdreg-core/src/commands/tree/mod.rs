//! In-memory command tree
//!
//! One tree exists per tenant plus one global tree. Nodes live in an arena
//! owned by the tree; a parent owns its children through its child map and a
//! child only keeps a non-owning `NodeId` back-reference to its parent.

mod command_tree;
mod node;

pub use command_tree::CommandTree;
pub use node::{CommandNode, NodeEntry, NodeId, Subtree, TreeError};

#[cfg(test)]
mod tests;
