//! Command registry types and core implementation

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::commands::tree::CommandTree;
use crate::commands::types::{CommandAttributes, CommandPath, CommandRecord, PermissionLevel, Scope, TenantId};
use crate::config::{Config, RegistryConfig};
use crate::error::{RegistryError, RegistryResult};
use crate::storage::{CommandStore, StoreProvider, StoreScope, create_store_provider};

/// A published tree plus the lock that serializes its mutations
///
/// Readers clone the `Arc` and never block on mutations. Mutations run on a
/// private copy while holding `op_lock` and publish it in one swap.
#[derive(Debug)]
pub(super) struct TreeSlot {
    pub(super) tree: RwLock<Arc<CommandTree>>,
    pub(super) op_lock: Arc<tokio::sync::Mutex<()>>,
}

impl TreeSlot {
    pub(super) fn new(tree: CommandTree) -> Self {
        Self {
            tree: RwLock::new(Arc::new(tree)),
            op_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub(super) fn current(&self) -> Arc<CommandTree> {
        Arc::clone(&self.tree.read())
    }
}

/// Runtime registry of custom commands
///
/// Holds one local tree per tenant and a single global tree shared by all
/// tenants. Every custom command is mirrored into the store of its scope.
pub struct CommandRegistry {
    pub(super) config: RegistryConfig,
    pub(super) provider: Arc<dyn StoreProvider>,
    pub(super) global: Arc<TreeSlot>,
    pub(super) tenants: DashMap<TenantId, Arc<TreeSlot>>,
}

impl CommandRegistry {
    /// Create an empty registry persisting through `provider`
    pub fn new(config: RegistryConfig, provider: Arc<dyn StoreProvider>) -> Self {
        let global = CommandTree::new(Scope::Global, config.case_insensitive);
        Self {
            config,
            provider,
            global: Arc::new(TreeSlot::new(global)),
            tenants: DashMap::new(),
        }
    }

    /// Create a registry with the store backend selected by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.registry.clone(),
            create_store_provider(&config.storage),
        )
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Tenants with a loaded or edited local tree
    pub fn tenants(&self) -> Vec<TenantId> {
        let mut tenants: Vec<TenantId> = self.tenants.iter().map(|e| e.key().clone()).collect();
        tenants.sort();
        tenants
    }

    /// Parse a fully-qualified name with the configured separator
    pub fn parse_path(&self, input: &str) -> CommandPath {
        CommandPath::parse(input, &self.config.separator)
    }

    /// Store key of a command
    pub fn key(&self, path: &CommandPath) -> String {
        path.join(&self.config.separator)
    }

    pub(super) fn tenant_slot(&self, tenant: &TenantId) -> Arc<TreeSlot> {
        self.tenants
            .entry(tenant.clone())
            .or_insert_with(|| {
                Arc::new(TreeSlot::new(CommandTree::new(
                    Scope::Local,
                    self.config.case_insensitive,
                )))
            })
            .clone()
    }

    pub(super) async fn store_for(
        &self,
        tenant: &TenantId,
        scope: Scope,
    ) -> RegistryResult<Arc<dyn CommandStore>> {
        let store_scope = match scope {
            Scope::Local => StoreScope::Tenant(tenant.clone()),
            Scope::Global => StoreScope::Global,
        };
        Ok(self.provider.open(&store_scope).await?)
    }

    /// Check that `path` can name a new command
    pub(super) fn validate_new_path(&self, path: &CommandPath) -> RegistryResult<()> {
        if path.is_root() {
            return Err(RegistryError::invalid_path(path, "command name is empty"));
        }
        if path.len() > self.config.max_depth {
            return Err(RegistryError::invalid_path(
                path,
                format!("commands may be nested at most {} levels deep", self.config.max_depth),
            ));
        }
        for segment in path.segments() {
            if segment.chars().any(char::is_whitespace)
                || (!self.config.separator.trim().is_empty()
                    && segment.contains(self.config.separator.as_str()))
            {
                return Err(RegistryError::invalid_path(
                    path,
                    format!("'{}' contains whitespace or the separator", segment),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("config", &self.config)
            .field("tenants", &self.tenants.len())
            .finish()
    }
}

/// Input of [`CommandRegistry::define`]
#[derive(Debug, Clone, PartialEq)]
pub struct DefineRequest {
    pub path: CommandPath,
    pub template: String,
    pub attributes: CommandAttributes,
    pub is_group: bool,
    pub permission: PermissionLevel,
}

impl DefineRequest {
    pub fn new(path: impl Into<CommandPath>, template: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
            attributes: CommandAttributes::default(),
            is_group: false,
            permission: PermissionLevel::Public,
        }
    }

    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn with_attributes(mut self, attributes: CommandAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_permission(mut self, permission: PermissionLevel) -> Self {
        self.permission = permission;
        self
    }
}

/// A descendant record whose store rewrite failed after a move
#[derive(Debug, Clone, PartialEq)]
pub struct PersistWarning {
    /// New store key of the record
    pub key: String,
    /// Store the record should have been written to
    pub scope: Scope,
    pub message: String,
}

/// Outcome of a rename or scope change
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    /// Path of the moved command
    pub path: CommandPath,
    pub scope: Scope,
    /// Number of descendants that moved along
    pub moved: usize,
    pub warnings: Vec<PersistWarning>,
}

impl MoveReport {
    /// Whether every record reached the store
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A stored record that could not be placed in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

/// Outcome of rebuilding a tree from its store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Listing entry for one visible command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSummary {
    pub path: CommandPath,
    pub scope: Scope,
    pub is_group: bool,
    pub builtin: bool,
    pub locked: bool,
    pub permission: PermissionLevel,
    pub aliases: Vec<String>,
    pub brief: Option<String>,
}

impl CommandSummary {
    pub(super) fn from_record(record: &CommandRecord, builtin: bool) -> Self {
        Self {
            path: record.name.clone(),
            scope: record.scope,
            is_group: record.is_group,
            builtin,
            locked: record.locked,
            permission: record.permission,
            aliases: record.aliases(),
            brief: record
                .attributes
                .brief()
                .or_else(|| record.attributes.help())
                .map(str::to_string),
        }
    }
}
