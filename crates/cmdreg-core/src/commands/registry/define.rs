//! Define, update and remove

use tracing::{debug, info};

use super::scope::EditScope;
use super::types::{CommandRegistry, DefineRequest};
use crate::commands::tree::{NodeEntry, Subtree};
use crate::commands::types::{CommandAttributes, CommandPath, CommandRecord, Scope, TenantId};
use crate::error::{RegistryError, RegistryResult};

impl CommandRegistry {
    /// Create a command in `tenant`
    ///
    /// A top-level command is local to the tenant. A subcommand lives in the
    /// same tree as its parent group, local first, then global.
    pub async fn define(
        &self,
        tenant: &TenantId,
        request: DefineRequest,
    ) -> RegistryResult<CommandRecord> {
        self.validate_new_path(&request.path)?;

        let mut scope = EditScope::begin(self, tenant).await;
        let (tree_scope, parent) = scope
            .parent_group(&request.path, Scope::Local, &[Scope::Local, Scope::Global])
            .await?;
        // Stored under the parent's own name, however the caller spelled it
        let path = scope
            .tree(tree_scope)
            .qualified_path(parent)
            .child(request.path.name());

        let mut record = CommandRecord::new(path.clone(), request.template, tenant.clone())
            .with_attributes(request.attributes)
            .with_permission(request.permission)
            .with_scope(tree_scope);
        record.is_group = request.is_group;
        let aliases = record.aliases();

        // A top-level name must be free in both trees
        if path.len() == 1 {
            for other in [Scope::Local, Scope::Global] {
                let tree = scope.tree(other);
                tree.check_insert(tree.root(), path.name(), &aliases)
                    .map_err(|e| RegistryError::from_tree(e, &path))?;
            }
        }

        scope
            .tree_mut(tree_scope)?
            .insert(
                parent,
                path.name(),
                Subtree::leaf(path.name(), NodeEntry::Custom(record.clone())),
            )
            .map_err(|e| RegistryError::from_tree(e, &path))?;

        let store = self.store_for(tenant, tree_scope).await?;
        store.put(&self.key(&path), &record).await?;
        scope.commit();

        info!(tenant = %tenant, path = %path, scope = %tree_scope, "Command defined");
        Ok(record)
    }

    /// Replace the template and overlay attributes of a command
    ///
    /// Keys in `attributes` win; existing keys not mentioned are kept.
    pub async fn update(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        template: Option<String>,
        attributes: CommandAttributes,
    ) -> RegistryResult<CommandRecord> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.record.locked {
            return Err(RegistryError::locked(path));
        }

        let mut record = located.record;
        if let Some(template) = template {
            record.template = template;
        }
        record.attributes.merge(attributes);

        scope
            .tree_mut(located.scope)?
            .replace_record(located.id, record.clone())
            .map_err(|e| RegistryError::from_tree(e, path))?;

        let store = self.store_for(tenant, located.scope).await?;
        store.put(&self.key(&record.name), &record).await?;
        scope.commit();

        info!(tenant = %tenant, path = %record.name, "Command updated");
        Ok(record)
    }

    /// Delete a command that has no subcommands
    pub async fn remove(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
    ) -> RegistryResult<CommandRecord> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        let record = located.record;
        if record.locked {
            return Err(RegistryError::locked(path));
        }

        let (parent, name) = {
            let node = scope
                .tree(located.scope)
                .node(located.id)
                .ok_or_else(|| RegistryError::not_found(path))?;
            if node.has_children() {
                return Err(RegistryError::has_children(path));
            }
            let parent = node
                .parent()
                .ok_or_else(|| RegistryError::internal("command node without a parent"))?;
            (parent, node.name().to_string())
        };

        let store = self.store_for(tenant, located.scope).await?;
        let key = self.key(&record.name);
        if record.is_group {
            let prefix = format!("{}{}", key, self.config.separator);
            let orphans = store.scan(&prefix).await?;
            if !orphans.is_empty() {
                debug!(tenant = %tenant, path = %path, stored = orphans.len(), "Group still has stored children");
                return Err(RegistryError::has_children(path));
            }
        }

        scope
            .tree_mut(located.scope)?
            .detach(parent, &name)
            .map_err(|e| RegistryError::from_tree(e, path))?;
        store.delete(&key).await?;
        scope.commit();

        info!(tenant = %tenant, path = %record.name, "Command removed");
        Ok(record)
    }
}
