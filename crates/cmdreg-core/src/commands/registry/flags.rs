//! Aliases, lock flag and permission level

use std::collections::HashSet;
use tracing::info;

use super::scope::{EditScope, Located};
use super::types::CommandRegistry;
use crate::commands::types::{AliasMode, CommandPath, CommandRecord, PermissionLevel, Scope, TenantId};
use crate::error::{RegistryError, RegistryResult};

impl CommandRegistry {
    /// Add aliases to a command, returning the ones actually added
    ///
    /// Aliases the command already has are skipped. In `Strict` mode any
    /// other collision (with the command's own name, a sibling, or another
    /// alias in the same call) rejects the whole call. In `Permissive` mode
    /// colliding aliases are dropped.
    pub async fn add_aliases(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        aliases: &[String],
        mode: AliasMode,
    ) -> RegistryResult<Vec<String>> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.record.locked {
            return Err(RegistryError::locked(path));
        }

        let added = {
            let tree = scope.tree(located.scope);
            let node = tree
                .node(located.id)
                .ok_or_else(|| RegistryError::not_found(path))?;
            let parent = node
                .parent()
                .ok_or_else(|| RegistryError::internal("command node without a parent"))?;
            let own_key = tree.fold(node.name());
            let existing: HashSet<String> = located
                .record
                .aliases()
                .iter()
                .map(|alias| tree.fold(alias))
                .collect();
            let top_level = path.len() == 1;
            let other = match located.scope {
                Scope::Local => scope.tree(Scope::Global),
                Scope::Global => scope.tree(Scope::Local),
            };

            let mut seen = HashSet::new();
            let mut added = Vec::new();
            for alias in aliases.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
                if alias.chars().any(char::is_whitespace)
                    || (!self.config.separator.trim().is_empty()
                        && alias.contains(self.config.separator.as_str()))
                {
                    return Err(RegistryError::invalid_path(
                        path,
                        format!("alias '{}' contains whitespace or the separator", alias),
                    ));
                }

                let key = tree.fold(alias);
                if existing.contains(&key) {
                    continue;
                }
                let taken = key == own_key
                    || !seen.insert(key.clone())
                    || tree.child(parent, alias).is_some_and(|holder| holder != located.id)
                    || (top_level && other.child(other.root(), alias).is_some());
                if taken {
                    match mode {
                        AliasMode::Strict => return Err(RegistryError::alias_conflict(alias)),
                        AliasMode::Permissive => continue,
                    }
                }
                added.push(alias.to_string());
            }
            added
        };

        if added.is_empty() {
            return Ok(added);
        }

        let mut record = located.record.clone();
        let mut all = record.aliases();
        all.extend(added.iter().cloned());
        record.attributes.set_aliases(all);
        self.save(scope, &located, record).await?;

        info!(tenant = %tenant, path = %path, aliases = ?added, "Aliases added");
        Ok(added)
    }

    /// Add aliases using the configured default mode
    pub async fn add_aliases_default(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        aliases: &[String],
    ) -> RegistryResult<Vec<String>> {
        self.add_aliases(tenant, path, aliases, self.config.default_alias_mode)
            .await
    }

    /// Set or clear the lock flag, returning whether it changed
    ///
    /// Locking does not cascade to subcommands.
    pub async fn set_locked(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        locked: bool,
    ) -> RegistryResult<bool> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.record.locked == locked {
            return Ok(false);
        }

        let mut record = located.record.clone();
        record.locked = locked;
        self.save(scope, &located, record).await?;

        info!(tenant = %tenant, path = %path, locked, "Command lock changed");
        Ok(true)
    }

    /// Set the level needed to execute a command, returning whether it changed
    ///
    /// Allowed on locked commands.
    pub async fn set_permission(
        &self,
        tenant: &TenantId,
        path: &CommandPath,
        level: PermissionLevel,
    ) -> RegistryResult<bool> {
        let mut scope = EditScope::begin(self, tenant).await;
        let located = scope.locate(path).await?;
        if located.record.permission == level {
            return Ok(false);
        }

        let mut record = located.record.clone();
        record.permission = level;
        self.save(scope, &located, record).await?;

        info!(tenant = %tenant, path = %path, level = %level, "Command permission changed");
        Ok(true)
    }

    /// Replace a located record in the working tree and its store, then publish
    async fn save(
        &self,
        mut scope: EditScope,
        located: &Located,
        record: CommandRecord,
    ) -> RegistryResult<()> {
        scope
            .tree_mut(located.scope)?
            .replace_record(located.id, record.clone())
            .map_err(|e| RegistryError::from_tree(e, &record.name))?;

        let store = self.store_for(scope.tenant(), located.scope).await?;
        store.put(&self.key(&record.name), &record).await?;
        scope.commit();
        Ok(())
    }
}
