//! Loading, teardown and read access

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::{CommandRegistry, CommandSummary, LoadReport, SkippedRecord};
use crate::commands::tree::{CommandTree, NodeEntry, NodeId, Subtree};
use crate::commands::types::{CommandPath, CommandRecord, Scope, TenantId};
use crate::error::{RegistryError, RegistryResult};
use crate::storage::StoreScope;

impl CommandRegistry {
    /// Install a built-in command in the global tree
    ///
    /// Built-ins are visible to every tenant, never persisted, and cannot be
    /// changed through the mutation operations. A built-in may be nested
    /// under a built-in group.
    pub async fn register_builtin(&self, record: CommandRecord) -> RegistryResult<()> {
        let path = record.name.clone();
        self.validate_new_path(&path)?;
        let record = CommandRecord {
            scope: Scope::Global,
            owner: None,
            ..record
        };

        let _guard = self.global.op_lock.lock().await;
        let mut tree = (*self.global.current()).clone();
        let parent = tree
            .find(&path.parent())
            .map_err(|e| RegistryError::from_tree(e, &path))?;
        if tree.node(parent).is_some_and(|node| node.entry().is_custom()) {
            return Err(RegistryError::invalid_path(
                &path,
                "built-in commands cannot be nested under custom commands",
            ));
        }
        tree.insert(
            parent,
            path.name(),
            Subtree::leaf(path.name(), NodeEntry::Builtin(record)),
        )
        .map_err(|e| RegistryError::from_tree(e, &path))?;
        *self.global.tree.write() = Arc::new(tree);

        debug!(path = %path, "Built-in command registered");
        Ok(())
    }

    /// Rebuild a tenant's local tree from its store
    pub async fn load_tenant(&self, tenant: &TenantId) -> RegistryResult<LoadReport> {
        let slot = self.tenant_slot(tenant);
        let _guard = slot.op_lock.lock().await;

        let store = self
            .provider
            .open(&StoreScope::Tenant(tenant.clone()))
            .await?;
        let rows = store.scan("").await?;
        let mut tree = CommandTree::new(Scope::Local, self.config.case_insensitive);
        let report = self.fill(&mut tree, rows, Scope::Local);
        *slot.tree.write() = Arc::new(tree);

        info!(
            tenant = %tenant,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Tenant commands loaded"
        );
        Ok(report)
    }

    /// Rebuild the global tree from the global store, keeping built-ins
    pub async fn load_global(&self) -> RegistryResult<LoadReport> {
        let _guard = self.global.op_lock.lock().await;

        let store = self.provider.open(&StoreScope::Global).await?;
        let rows = store.scan("").await?;
        let mut tree = (*self.global.current()).clone();
        tree.retain_builtins().map_err(|e| {
            RegistryError::internal(format!("failed to clear global commands: {}", e))
        })?;
        let report = self.fill(&mut tree, rows, Scope::Global);
        *self.global.tree.write() = Arc::new(tree);

        info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Global commands loaded"
        );
        Ok(report)
    }

    /// Insert stored rows into `tree`, parents before children
    fn fill(
        &self,
        tree: &mut CommandTree,
        rows: Vec<(String, CommandRecord)>,
        scope: Scope,
    ) -> LoadReport {
        let mut rows: Vec<(String, CommandRecord)> = rows
            .into_iter()
            .map(|(key, mut record)| {
                if record.name.is_root() {
                    record.name = self.parse_path(&key);
                }
                record.scope = scope;
                (key, record)
            })
            .collect();
        rows.sort_by(|(_, a), (_, b)| a.name.segments().cmp(b.name.segments()));

        let mut report = LoadReport::default();
        for (key, record) in rows {
            match place(tree, record) {
                Ok(_) => report.loaded += 1,
                Err(reason) => {
                    warn!(key = %key, scope = %scope, reason = %reason, "Skipping stored command");
                    report.skipped.push(SkippedRecord { key, reason });
                }
            }
        }
        report
    }

    /// Drop a tenant's local tree; with `purge`, also delete its stored records
    ///
    /// Returns the number of deleted records. Global commands owned by the
    /// tenant are left in place.
    pub async fn remove_tenant(&self, tenant: &TenantId, purge: bool) -> RegistryResult<usize> {
        let slot = self.tenants.get(tenant).map(|entry| Arc::clone(entry.value()));
        let _guard = match &slot {
            Some(slot) => Some(Arc::clone(&slot.op_lock).lock_owned().await),
            None => None,
        };
        self.tenants.remove(tenant);

        let mut deleted = 0;
        if purge {
            let store = self
                .provider
                .open(&StoreScope::Tenant(tenant.clone()))
                .await?;
            for (key, _) in store.scan("").await? {
                if store.delete(&key).await? {
                    deleted += 1;
                }
            }
        }

        info!(tenant = %tenant, purge, deleted, "Tenant removed");
        Ok(deleted)
    }

    /// Published trees visible to `tenant`: its local tree, then the global tree
    pub fn snapshot(&self, tenant: &TenantId) -> (Arc<CommandTree>, Arc<CommandTree>) {
        match self.tenants.get(tenant) {
            Some(slot) => {
                let local = slot.tree.read();
                let global = self.global.tree.read();
                (Arc::clone(&local), Arc::clone(&global))
            }
            None => (
                Arc::new(CommandTree::new(Scope::Local, self.config.case_insensitive)),
                self.global.current(),
            ),
        }
    }

    /// Record visible to `tenant` at `path`, local first
    pub fn get(&self, tenant: &TenantId, path: &CommandPath) -> Option<CommandRecord> {
        let (local, global) = self.snapshot(tenant);
        [local, global].iter().find_map(|tree| {
            let id = tree.find(path).ok()?;
            tree.node(id)?.record().cloned()
        })
    }

    /// Visible commands of `tenant`, local tree first, parents before children
    ///
    /// Hidden commands and everything below them are left out.
    pub fn list(&self, tenant: &TenantId) -> Vec<CommandSummary> {
        let (local, global) = self.snapshot(tenant);
        let mut out = Vec::new();
        for tree in [&local, &global] {
            collect_visible(tree, tree.root(), &mut out);
        }
        out
    }
}

fn place(tree: &mut CommandTree, record: CommandRecord) -> Result<NodeId, String> {
    if record.name.is_root() {
        return Err("record has an empty name".to_string());
    }
    let parent = tree
        .find(&record.name.parent())
        .map_err(|e| format!("parent group unavailable: {}", e))?;
    if tree.node(parent).is_some_and(|node| node.entry().is_builtin()) {
        return Err("parent is a built-in command".to_string());
    }
    let name = record.name.name().to_string();
    tree.insert(parent, &name, Subtree::leaf(name.clone(), NodeEntry::Custom(record)))
        .map_err(|e| e.to_string())
}

fn collect_visible(tree: &CommandTree, id: NodeId, out: &mut Vec<CommandSummary>) {
    for (child, node) in tree.children(id) {
        let Some(record) = node.record() else {
            continue;
        };
        if record.attributes.is_hidden() {
            continue;
        }
        out.push(CommandSummary::from_record(record, node.entry().is_builtin()));
        collect_visible(tree, child, out);
    }
}
