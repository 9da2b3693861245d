//! Copy-on-write edit scope for registry mutations

use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

use super::types::{CommandRegistry, TreeSlot};
use crate::commands::tree::{CommandTree, NodeEntry, NodeId};
use crate::commands::types::{CommandPath, CommandRecord, Scope, TenantId};
use crate::error::{RegistryError, RegistryResult};

/// A custom command the current tenant may mutate
#[derive(Debug, Clone)]
pub(super) struct Located {
    pub(super) scope: Scope,
    pub(super) id: NodeId,
    pub(super) record: CommandRecord,
}

/// One tenant's mutation in progress
///
/// Holds the tenant operation lock for its whole life and works on private
/// copies of the trees. The global lock is taken only once the mutation
/// needs to change the global tree, always after the tenant lock. Dropping
/// the scope without `commit` discards every change.
pub(super) struct EditScope {
    tenant: TenantId,
    local_slot: Arc<TreeSlot>,
    global_slot: Arc<TreeSlot>,
    local: CommandTree,
    global: Arc<CommandTree>,
    global_edit: Option<CommandTree>,
    _local_guard: OwnedMutexGuard<()>,
    global_guard: Option<OwnedMutexGuard<()>>,
}

impl EditScope {
    pub(super) async fn begin(registry: &CommandRegistry, tenant: &TenantId) -> Self {
        let local_slot = registry.tenant_slot(tenant);
        let local_guard = Arc::clone(&local_slot.op_lock).lock_owned().await;
        let local = (*local_slot.current()).clone();
        let global_slot = Arc::clone(&registry.global);
        let global = global_slot.current();

        Self {
            tenant: tenant.clone(),
            local_slot,
            global_slot,
            local,
            global,
            global_edit: None,
            _local_guard: local_guard,
            global_guard: None,
        }
    }

    pub(super) fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Take the global operation lock and start editing a fresh global copy
    pub(super) async fn lock_global(&mut self) {
        if self.global_guard.is_some() {
            return;
        }
        let guard = Arc::clone(&self.global_slot.op_lock).lock_owned().await;
        let current = self.global_slot.current();
        self.global_edit = Some((*current).clone());
        self.global = current;
        self.global_guard = Some(guard);
    }

    pub(super) fn tree(&self, scope: Scope) -> &CommandTree {
        match scope {
            Scope::Local => &self.local,
            Scope::Global => self.global_edit.as_ref().unwrap_or(self.global.as_ref()),
        }
    }

    pub(super) fn tree_mut(&mut self, scope: Scope) -> RegistryResult<&mut CommandTree> {
        match scope {
            Scope::Local => Ok(&mut self.local),
            Scope::Global => self
                .global_edit
                .as_mut()
                .ok_or_else(|| RegistryError::internal("global tree edited without its lock")),
        }
    }

    /// Find the custom command at `path`, local tree first
    ///
    /// Built-in commands fail `Builtin`. Global commands owned by another
    /// tenant are reported as missing.
    pub(super) async fn locate(&mut self, path: &CommandPath) -> RegistryResult<Located> {
        if path.is_root() {
            return Err(RegistryError::not_found(path));
        }
        if let Ok(id) = self.local.find(path) {
            return self.located(Scope::Local, id, path);
        }

        let id = self
            .tree(Scope::Global)
            .find(path)
            .map_err(|_| RegistryError::not_found(path))?;
        self.located(Scope::Global, id, path)?;

        self.lock_global().await;
        let id = self
            .tree(Scope::Global)
            .find(path)
            .map_err(|_| RegistryError::not_found(path))?;
        self.located(Scope::Global, id, path)
    }

    fn located(&self, scope: Scope, id: NodeId, path: &CommandPath) -> RegistryResult<Located> {
        let node = self
            .tree(scope)
            .node(id)
            .ok_or_else(|| RegistryError::not_found(path))?;
        match node.entry() {
            NodeEntry::Custom(record)
                if scope == Scope::Local || record.is_owned_by(&self.tenant) =>
            {
                Ok(Located {
                    scope,
                    id,
                    record: record.clone(),
                })
            }
            NodeEntry::Builtin(_) => Err(RegistryError::builtin(path)),
            _ => Err(RegistryError::not_found(path)),
        }
    }

    /// Group that will hold `path`, and the tree it lives in
    ///
    /// Top-level commands go into `root_scope`. Otherwise the parent is
    /// searched in `search` order and must be a custom group this tenant may
    /// edit.
    pub(super) async fn parent_group(
        &mut self,
        path: &CommandPath,
        root_scope: Scope,
        search: &[Scope],
    ) -> RegistryResult<(Scope, NodeId)> {
        let parent = path.parent();
        if parent.is_root() {
            if root_scope == Scope::Global {
                self.lock_global().await;
            }
            return Ok((root_scope, self.tree(root_scope).root()));
        }

        for &scope in search {
            let Ok(id) = self.tree(scope).find(&parent) else {
                continue;
            };
            self.check_parent(scope, id, path)?;
            if scope == Scope::Local {
                return Ok((scope, id));
            }

            self.lock_global().await;
            let id = self.tree(scope).find(&parent).map_err(|_| {
                RegistryError::invalid_path(path, format!("group '{}' does not exist", parent))
            })?;
            self.check_parent(scope, id, path)?;
            return Ok((scope, id));
        }

        Err(RegistryError::invalid_path(
            path,
            format!("group '{}' does not exist", parent),
        ))
    }

    fn check_parent(&self, scope: Scope, id: NodeId, path: &CommandPath) -> RegistryResult<()> {
        let parent = path.parent();
        let Some(node) = self.tree(scope).node(id) else {
            return Err(RegistryError::invalid_path(
                path,
                format!("group '{}' does not exist", parent),
            ));
        };
        match node.entry() {
            NodeEntry::Custom(record) if !record.is_group => Err(RegistryError::invalid_path(
                path,
                format!("'{}' is not a command group", parent),
            )),
            NodeEntry::Custom(record)
                if scope == Scope::Local || record.is_owned_by(&self.tenant) =>
            {
                Ok(())
            }
            NodeEntry::Builtin(_) => Err(RegistryError::invalid_path(
                path,
                format!("'{}' is a built-in command", parent),
            )),
            _ => Err(RegistryError::invalid_path(
                path,
                format!("group '{}' does not exist", parent),
            )),
        }
    }

    /// Publish the edited trees
    pub(super) fn commit(self) {
        let mut local = self.local_slot.tree.write();
        if let Some(global) = self.global_edit {
            *self.global_slot.tree.write() = Arc::new(global);
        }
        *local = Arc::new(self.local);
    }
}
