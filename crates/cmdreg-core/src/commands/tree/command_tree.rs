//! Arena-backed command tree

use std::collections::{BTreeMap, HashMap, HashSet};

use super::node::{CommandNode, NodeEntry, NodeId, Subtree, TreeError};
use crate::commands::types::{CommandPath, CommandRecord, Scope};

/// One scope's tree of commands
///
/// Pure data structure without I/O. `insert` and `detach` only touch the
/// immediate parent's child map; moving a subtree is `detach` followed by
/// `insert`, which re-creates the descendants under their new parent.
#[derive(Debug, Clone)]
pub struct CommandTree {
    scope: Scope,
    case_insensitive: bool,
    root: NodeId,
    nodes: HashMap<NodeId, CommandNode>,
    next_id: u64,
}

impl CommandTree {
    pub fn new(scope: Scope, case_insensitive: bool) -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            CommandNode {
                name: String::new(),
                parent: None,
                children: BTreeMap::new(),
                entry: NodeEntry::Root,
            },
        );
        Self {
            scope,
            case_insensitive,
            root,
            nodes,
            next_id: 1,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of commands, the root excluded
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key under which `name` is stored in a child map
    pub fn fold(&self, name: &str) -> String {
        if self.case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CommandNode> {
        self.nodes.get(&id)
    }

    fn node_ref(&self, id: NodeId) -> Result<&CommandNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut CommandNode, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode(id))
    }

    /// Child of `parent` matching a name or alias
    pub fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes
            .get(&parent)?
            .children
            .get(&self.fold(segment))
            .copied()
    }

    /// Walk `path` from the root
    pub fn find(&self, path: &CommandPath) -> Result<NodeId, TreeError> {
        let mut current = self.root;
        for segment in path.segments() {
            let node = self.node_ref(current)?;
            if !node.is_group() {
                return Err(TreeError::NotAGroup {
                    name: node.name.clone(),
                });
            }
            current = node
                .children
                .get(&self.fold(segment))
                .copied()
                .ok_or_else(|| TreeError::NotFound {
                    segment: segment.clone(),
                })?;
        }
        Ok(current)
    }

    pub fn contains(&self, path: &CommandPath) -> bool {
        !path.is_root() && self.find(path).is_ok()
    }

    /// Path from the root to `id`, following parent back-references
    pub fn qualified_path(&self, id: NodeId) -> CommandPath {
        let mut names = Vec::new();
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            let Some(parent) = node.parent else {
                break;
            };
            names.push(node.name.clone());
            current = self.nodes.get(&parent);
        }
        names.reverse();
        CommandPath::new(names)
    }

    /// Distinct children of `id` in name order (alias keys skipped)
    pub fn children(&self, id: NodeId) -> Vec<(NodeId, &CommandNode)> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|(key, child_id)| {
                let child = self.nodes.get(child_id)?;
                (*key == self.fold(&child.name)).then_some((*child_id, child))
            })
            .collect()
    }

    /// All nodes below `id`, parents before children
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .children(id)
            .into_iter()
            .rev()
            .map(|(child, _)| child)
            .collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev().map(|(child, _)| child));
        }
        out
    }

    /// Check that a node named `name` with `aliases` may be added under `parent`
    pub fn check_insert(
        &self,
        parent: NodeId,
        name: &str,
        aliases: &[String],
    ) -> Result<(), TreeError> {
        let parent_node = self.node_ref(parent)?;
        if !parent_node.is_group() {
            return Err(TreeError::NotAGroup {
                name: parent_node.name.clone(),
            });
        }

        let key = self.fold(name);
        if parent_node.children.contains_key(&key) {
            return Err(TreeError::NameConflict {
                name: name.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for alias in aliases {
            let alias_key = self.fold(alias);
            if alias_key == key
                || !seen.insert(alias_key.clone())
                || parent_node.children.contains_key(&alias_key)
            {
                return Err(TreeError::AliasConflict {
                    alias: alias.clone(),
                });
            }
        }
        Ok(())
    }

    /// Attach `subtree` under `parent` as `name`
    pub fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        mut subtree: Subtree,
    ) -> Result<NodeId, TreeError> {
        self.check_insert(parent, name, &subtree.aliases())?;
        subtree.name = name.to_string();
        self.graft(parent, subtree)
    }

    fn graft(&mut self, parent: NodeId, subtree: Subtree) -> Result<NodeId, TreeError> {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let name_key = self.fold(&subtree.name);
        let alias_keys: Vec<String> = subtree
            .entry
            .aliases()
            .iter()
            .map(|alias| self.fold(alias))
            .collect();

        let parent_node = self.node_mut(parent)?;
        parent_node.children.insert(name_key, id);
        for alias_key in alias_keys {
            parent_node.children.entry(alias_key).or_insert(id);
        }

        self.nodes.insert(
            id,
            CommandNode {
                name: subtree.name,
                parent: Some(parent),
                children: BTreeMap::new(),
                entry: subtree.entry,
            },
        );
        for child in subtree.children {
            self.graft(id, child)?;
        }
        Ok(id)
    }

    /// Remove the child `name` of `parent` with all of its descendants
    pub fn detach(&mut self, parent: NodeId, name: &str) -> Result<Subtree, TreeError> {
        let key = self.fold(name);
        let parent_node = self.node_mut(parent)?;
        let id = parent_node
            .children
            .get(&key)
            .copied()
            .ok_or_else(|| TreeError::NotFound {
                segment: name.to_string(),
            })?;
        parent_node.children.retain(|_, child| *child != id);
        self.take(id)
    }

    fn take(&mut self, id: NodeId) -> Result<Subtree, TreeError> {
        let child_ids: Vec<NodeId> = self.children(id).into_iter().map(|(c, _)| c).collect();
        let node = self.nodes.remove(&id).ok_or(TreeError::UnknownNode(id))?;
        let children = child_ids
            .into_iter()
            .map(|child| self.take(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Subtree {
            name: node.name,
            entry: node.entry,
            children,
        })
    }

    /// Swap the record of a custom node, re-keying its aliases in the parent
    pub fn replace_record(&mut self, id: NodeId, record: CommandRecord) -> Result<(), TreeError> {
        let node = self.node_ref(id)?;
        if !node.entry.is_custom() {
            return Err(TreeError::NotCustom {
                name: node.name.clone(),
            });
        }
        let parent = node.parent.ok_or(TreeError::UnknownNode(id))?;
        let name_key = self.fold(&node.name);

        let mut alias_keys = Vec::new();
        {
            let parent_node = self.node_ref(parent)?;
            for alias in record.aliases() {
                let alias_key = self.fold(&alias);
                let taken_by_other = parent_node
                    .children
                    .get(&alias_key)
                    .is_some_and(|holder| *holder != id);
                if alias_key == name_key || taken_by_other {
                    return Err(TreeError::AliasConflict { alias });
                }
                if !alias_keys.contains(&alias_key) {
                    alias_keys.push(alias_key);
                }
            }
        }

        let parent_node = self.node_mut(parent)?;
        parent_node
            .children
            .retain(|key, holder| *holder != id || *key == name_key);
        for alias_key in alias_keys {
            parent_node.children.insert(alias_key, id);
        }
        self.node_mut(id)?.entry = NodeEntry::Custom(record);
        Ok(())
    }

    /// Drop every custom top-level command, keeping built-ins
    pub fn retain_builtins(&mut self) -> Result<(), TreeError> {
        let custom: Vec<String> = self
            .children(self.root)
            .into_iter()
            .filter(|(_, node)| node.entry.is_custom())
            .map(|(_, node)| node.name.clone())
            .collect();
        for name in custom {
            self.detach(self.root, &name)?;
        }
        Ok(())
    }
}
