//! Persisted command record and its attribute bag

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::access::{PermissionLevel, Scope};
use super::path::{CommandPath, TenantId};

/// Free-form attributes attached to a command
///
/// Well-known keys: `aliases` (array of strings), `brief`, `help`,
/// `description`, `usage` (strings), `hidden` and `invoke_without_command`
/// (booleans). Any other key is kept and round-tripped untouched. The `name`
/// key is reserved for the command path and is always discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandAttributes(BTreeMap<String, Value>);

impl CommandAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute; keys are case-insensitive
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<Value>) {
        let key = key.as_ref().trim().to_lowercase();
        if key == "name" || key.is_empty() {
            return;
        }
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(&key.to_lowercase())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    /// Aliases in insertion order
    ///
    /// A single string value is accepted as a one-element list.
    pub fn aliases(&self) -> Vec<String> {
        match self.get("aliases") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn set_aliases(&mut self, aliases: Vec<String>) {
        if aliases.is_empty() {
            self.0.remove("aliases");
        } else {
            self.0.insert(
                "aliases".to_string(),
                Value::Array(aliases.into_iter().map(Value::String).collect()),
            );
        }
    }

    pub fn brief(&self) -> Option<&str> {
        self.get_str("brief")
    }

    pub fn help(&self) -> Option<&str> {
        self.get_str("help").or_else(|| self.get_str("description"))
    }

    pub fn is_hidden(&self) -> bool {
        self.get_bool("hidden").unwrap_or(false)
    }

    /// Whether a group runs its own template when no subcommand matches
    pub fn invoke_without_command(&self) -> bool {
        self.get_bool("invoke_without_command").unwrap_or(true)
    }

    /// Overlay `other` on top of `self`: its keys win, the rest are kept
    pub fn merge(&mut self, other: CommandAttributes) {
        for (key, value) in other.0 {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for CommandAttributes {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// A command as stored in a tenant or global table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Fully-qualified path of the command
    pub name: CommandPath,
    /// Response template with positional placeholders
    pub template: String,
    #[serde(default)]
    pub attributes: CommandAttributes,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub locked: bool,
    pub scope: Scope,
    #[serde(default)]
    pub permission: PermissionLevel,
    /// Tenant that defined the command; `None` for built-in commands
    #[serde(default)]
    pub owner: Option<TenantId>,
}

impl CommandRecord {
    /// Create a local, unlocked, public command owned by `owner`
    pub fn new(name: CommandPath, template: impl Into<String>, owner: TenantId) -> Self {
        Self {
            name,
            template: template.into(),
            attributes: CommandAttributes::default(),
            is_group: false,
            locked: false,
            scope: Scope::Local,
            permission: PermissionLevel::Public,
            owner: Some(owner),
        }
    }

    /// Create a built-in command record, visible everywhere and never persisted
    pub fn builtin(name: CommandPath, template: impl Into<String>) -> Self {
        Self {
            name,
            template: template.into(),
            attributes: CommandAttributes::default(),
            is_group: false,
            locked: false,
            scope: Scope::Global,
            permission: PermissionLevel::Public,
            owner: None,
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

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn aliases(&self) -> Vec<String> {
        self.attributes.aliases()
    }

    pub fn is_owned_by(&self, tenant: &TenantId) -> bool {
        self.owner.as_ref() == Some(tenant)
    }
}
