//! Tree node types

use std::collections::BTreeMap;
use thiserror::Error;

use crate::commands::types::{CommandPath, CommandRecord, Scope};

/// Handle of a node inside one `CommandTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) u64);

/// What a node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum NodeEntry {
    /// The tree root; behaves as a group without a record
    Root,
    /// Registered by the application, never persisted
    Builtin(CommandRecord),
    /// Defined by a tenant and mirrored in a store
    Custom(CommandRecord),
}

impl NodeEntry {
    pub fn record(&self) -> Option<&CommandRecord> {
        match self {
            Self::Root => None,
            Self::Builtin(record) | Self::Custom(record) => Some(record),
        }
    }

    pub(super) fn record_mut(&mut self) -> Option<&mut CommandRecord> {
        match self {
            Self::Root => None,
            Self::Builtin(record) | Self::Custom(record) => Some(record),
        }
    }

    pub fn is_group(&self) -> bool {
        match self {
            Self::Root => true,
            Self::Builtin(record) | Self::Custom(record) => record.is_group,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    pub(super) fn aliases(&self) -> Vec<String> {
        self.record().map(CommandRecord::aliases).unwrap_or_default()
    }
}

/// A node of the in-memory command tree
///
/// `children` maps every child name and alias (case-folded when the tree is
/// case-insensitive) to the child node. The parent owns its children;
/// `parent` is only a back-reference for walking upwards.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub(super) name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) children: BTreeMap<String, NodeId>,
    pub(super) entry: NodeEntry,
}

impl CommandNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn entry(&self) -> &NodeEntry {
        &self.entry
    }

    pub fn record(&self) -> Option<&CommandRecord> {
        self.entry.record()
    }

    pub fn is_group(&self) -> bool {
        self.entry.is_group()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A detached node together with all of its descendants
///
/// Produced by `CommandTree::detach` and consumed by `CommandTree::insert`,
/// which is how a subtree moves between parents or between trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    pub(super) name: String,
    pub(super) entry: NodeEntry,
    pub(super) children: Vec<Subtree>,
}

impl Subtree {
    pub fn leaf(name: impl Into<String>, entry: NodeEntry) -> Self {
        Self {
            name: name.into(),
            entry,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> &NodeEntry {
        &self.entry
    }

    pub fn children(&self) -> &[Subtree] {
        &self.children
    }

    pub fn aliases(&self) -> Vec<String> {
        self.entry.aliases()
    }

    /// Number of nodes, including this one
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Subtree::len).sum::<usize>()
    }

    /// Records of this node and its descendants, parents before children
    pub fn records(&self) -> Vec<&CommandRecord> {
        let mut records = Vec::new();
        self.collect_records(&mut records);
        records
    }

    fn collect_records<'a>(&'a self, out: &mut Vec<&'a CommandRecord>) {
        if let Some(record) = self.entry.record() {
            out.push(record);
        }
        for child in &self.children {
            child.collect_records(out);
        }
    }

    /// Rename this node to `path` and rewrite every descendant's name under it,
    /// moving all records into `scope`
    pub fn rebase(&mut self, path: &CommandPath, scope: Scope) {
        self.name = path.name().to_string();
        if let Some(record) = self.entry.record_mut() {
            record.name = path.clone();
            record.scope = scope;
        }
        for child in &mut self.children {
            let child_path = path.child(child.name.clone());
            child.rebase(&child_path, scope);
        }
    }
}

/// Errors raised by tree operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TreeError {
    #[error("no command named '{segment}'")]
    NotFound { segment: String },

    #[error("'{name}' is not a command group")]
    NotAGroup { name: String },

    #[error("name '{name}' is already taken")]
    NameConflict { name: String },

    #[error("alias '{alias}' is already taken")]
    AliasConflict { alias: String },

    #[error("'{name}' is not a custom command")]
    NotCustom { name: String },

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}
