//! Rename and scope changes
//!
//! Both move a whole subtree: detach from the old parent, rewrite every name
//! and scope under it, insert at the new parent. The top-level record is
//! moved in the store before the new trees are published. Descendant records
//! are rewritten afterwards on a best-effort basis and failures come back as
//! warnings.

use tracing::{info, warn};

use super::scope::{EditScope, Located};
use super::types::{CommandRegistry, MoveReport, PersistWarning};
use crate::commands::tree::NodeId;
use crate::commands::types::{CommandPath, CommandRecord, Scope, TenantId};
use crate::error::{RegistryError, RegistryResult};
use crate::storage::StorageError;

impl CommandRegistry {
    /// Move a command and its subcommands to `new_path`
    pub async fn rename(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        new_path: &CommandPath,
    ) -> RegistryResult<MoveReport> {
        self.validate_new_path(new_path)?;

        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.record.locked {
            return Err(RegistryError::locked(path));
        }
        if scope.tree(Scope::Local).contains(new_path) || scope.tree(Scope::Global).contains(new_path)
        {
            return Err(RegistryError::name_conflict(new_path));
        }
        if new_path.starts_with(path) {
            return Err(RegistryError::invalid_path(
                new_path,
                format!("cannot move '{}' inside itself", path),
            ));
        }

        let (dest_scope, dest_parent) = scope
            .parent_group(new_path, located.scope, &[Scope::Local, Scope::Global])
            .await?;
        let target = scope
            .tree(dest_scope)
            .qualified_path(dest_parent)
            .child(new_path.name());
        if target.starts_with(&located.record.name) {
            return Err(RegistryError::invalid_path(
                new_path,
                format!("cannot move '{}' inside itself", path),
            ));
        }

        // A new top-level name and its aliases must also be free in the other tree
        if target.len() == 1 {
            let other = match dest_scope {
                Scope::Local => scope.tree(Scope::Global),
                Scope::Global => scope.tree(Scope::Local),
            };
            other
                .check_insert(other.root(), target.name(), &located.record.aliases())
                .map_err(|e| RegistryError::from_tree(e, &target))?;
        }

        let report = self
            .relocate(&mut scope, located, &target, dest_scope, dest_parent)
            .await?;
        scope.commit();

        info!(
            tenant = %tenant,
            from = %path,
            to = %target,
            moved = report.moved,
            warnings = report.warnings.len(),
            "Command renamed"
        );
        Ok(report)
    }

    /// Make a command local or global, together with its subcommands
    ///
    /// Not gated by the lock flag. A subcommand can only change scope when
    /// its parent group already exists in the target tree.
    pub async fn set_scope(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        target: Scope,
    ) -> RegistryResult<MoveReport> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.scope == target {
            return Err(RegistryError::AlreadyInScope {
                path: path.to_string(),
                scope: target,
            });
        }

        scope.lock_global().await;
        if scope.tree(target).contains(path) {
            return Err(RegistryError::name_conflict(path));
        }
        let (dest_scope, dest_parent) = scope.parent_group(path, target, &[target]).await?;
        let name = scope
            .tree(located.scope)
            .node(located.id)
            .map(|node| node.name().to_string())
            .ok_or_else(|| RegistryError::not_found(path))?;
        let dest_path = scope.tree(dest_scope).qualified_path(dest_parent).child(name);

        let report = self
            .relocate(&mut scope, located, &dest_path, dest_scope, dest_parent)
            .await?;
        scope.commit();

        info!(
            tenant = %tenant,
            path = %path,
            scope = %target,
            moved = report.moved,
            warnings = report.warnings.len(),
            "Command scope changed"
        );
        Ok(report)
    }

    /// Move the subtree at `from` under `dest_parent` as `to`
    ///
    /// Fails without touching the store when the insert is rejected; the
    /// caller's working copy is then discarded, leaving the published tree
    /// as it was.
    async fn relocate(
        &self,
        scope: &mut EditScope,
        from: Located,
        to: &CommandPath,
        dest_scope: Scope,
        dest_parent: NodeId,
    ) -> RegistryResult<MoveReport> {
        let path = from.record.name.clone();
        let (source_parent, source_name) = {
            let node = scope
                .tree(from.scope)
                .node(from.id)
                .ok_or_else(|| RegistryError::not_found(&path))?;
            let parent = node
                .parent()
                .ok_or_else(|| RegistryError::internal("command node without a parent"))?;
            (parent, node.name().to_string())
        };

        let mut subtree = scope
            .tree_mut(from.scope)?
            .detach(source_parent, &source_name)
            .map_err(|e| RegistryError::from_tree(e, &path))?;
        let old_keys: Vec<String> = subtree
            .records()
            .into_iter()
            .map(|record| self.key(&record.name))
            .collect();

        subtree.rebase(to, dest_scope);
        let moved: Vec<CommandRecord> = subtree.records().into_iter().cloned().collect();
        let descendants = moved.len().saturating_sub(1);

        scope
            .tree_mut(dest_scope)?
            .insert(dest_parent, to.name(), subtree)
            .map_err(|e| RegistryError::from_tree(e, to))?;

        let warnings = self
            .persist_move(
                scope.tenant(),
                from.scope,
                dest_scope,
                old_keys.into_iter().zip(moved).collect(),
            )
            .await?;

        Ok(MoveReport {
            path: to.clone(),
            scope: dest_scope,
            moved: descendants,
            warnings,
        })
    }

    /// Rewrite moved records in the store, top-level record first
    ///
    /// The top-level record is put under its new key before the old key is
    /// deleted; when the delete fails the new key is removed again and the
    /// error is returned.
    async fn persist_move(
        &self,
        tenant: &TenantId,
        from: Scope,
        to: Scope,
        moves: Vec<(String, CommandRecord)>,
    ) -> RegistryResult<Vec<PersistWarning>> {
        let source = self.store_for(tenant, from).await?;
        let dest = self.store_for(tenant, to).await?;

        let mut moves = moves.into_iter();
        let Some((old_key, top)) = moves.next() else {
            return Ok(Vec::new());
        };
        let new_key = self.key(&top.name);
        dest.put(&new_key, &top).await?;
        if let Err(e) = source.delete(&old_key).await {
            if let Err(undo) = dest.delete(&new_key).await {
                warn!(tenant = %tenant, key = %new_key, error = %undo, "Failed to undo record move");
            }
            return Err(e.into());
        }

        let mut warnings = Vec::new();
        for (old_key, record) in moves {
            let new_key = self.key(&record.name);
            let result: Result<(), StorageError> = async {
                dest.put(&new_key, &record).await?;
                source.delete(&old_key).await?;
                Ok(())
            }
            .await;

            if let Err(e) = result {
                warn!(
                    tenant = %tenant,
                    from = %old_key,
                    to = %new_key,
                    error = %e,
                    "Failed to rewrite moved subcommand"
                );
                warnings.push(PersistWarning {
                    key: new_key,
                    scope: to,
                    message: e.to_string(),
                });
            }
        }
        Ok(warnings)
    }
}
