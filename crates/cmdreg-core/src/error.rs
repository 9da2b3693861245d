//! Error types for cmdreg

use thiserror::Error;

use crate::commands::tree::TreeError;
use crate::commands::types::{CommandPath, PermissionLevel, Scope};
use crate::render::RenderError;
use crate::storage::StorageError;

/// Result type alias for registry and dispatcher operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Main error type for registry mutations and command dispatch
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No command at the given path
    #[error("Command '{path}' does not exist")]
    NotFound { path: String },

    /// A sibling already uses the name
    #[error("Command '{path}' already exists")]
    NameConflict { path: String },

    /// The path cannot address a new or moved command
    #[error("Command '{path}' is invalid: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Command '{path}' is locked and cannot be edited")]
    Locked { path: String },

    #[error("Command '{path}' cannot be removed because it has at least one child command")]
    HasChildren { path: String },

    /// An alias collides with a sibling name or alias
    #[error("Alias '{alias}' conflicts with an existing command")]
    AliasConflict { alias: String },

    #[error("Command '{path}' is already {scope}")]
    AlreadyInScope { path: String, scope: Scope },

    /// The principal's level is below the command's permission
    #[error("Command '{path}' requires permission {required}, caller has {actual}")]
    Forbidden {
        path: String,
        required: PermissionLevel,
        actual: PermissionLevel,
    },

    /// Fewer arguments than the template has placeholders
    #[error("Command '{path}' needs {expected} argument(s), got {supplied}")]
    ArgumentCount {
        path: String,
        expected: usize,
        supplied: usize,
    },

    /// Built-in commands cannot be changed through the registry
    #[error("Command '{path}' is built in and cannot be edited")]
    Builtin { path: String },

    #[error("Permission level {0} is out of range, expected 0 to 3")]
    InvalidPermission(u8),

    #[error("Template error: {0}")]
    Render(RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Broken internal invariant
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    pub fn not_found(path: &CommandPath) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    pub fn name_conflict(path: &CommandPath) -> Self {
        Self::NameConflict {
            path: path.to_string(),
        }
    }

    pub fn invalid_path(path: &CommandPath, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn locked(path: &CommandPath) -> Self {
        Self::Locked {
            path: path.to_string(),
        }
    }

    pub fn has_children(path: &CommandPath) -> Self {
        Self::HasChildren {
            path: path.to_string(),
        }
    }

    pub fn alias_conflict(alias: impl Into<String>) -> Self {
        Self::AliasConflict {
            alias: alias.into(),
        }
    }

    pub fn builtin(path: &CommandPath) -> Self {
        Self::Builtin {
            path: path.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Translate a tree error raised while handling `path`
    pub(crate) fn from_tree(error: TreeError, path: &CommandPath) -> Self {
        match error {
            TreeError::NotFound { .. } => Self::not_found(path),
            TreeError::NotAGroup { name } => {
                Self::invalid_path(path, format!("'{}' is not a command group", name))
            }
            TreeError::NameConflict { .. } => Self::name_conflict(path),
            TreeError::AliasConflict { alias } => Self::alias_conflict(alias),
            TreeError::NotCustom { .. } => Self::builtin(path),
            TreeError::UnknownNode(id) => Self::internal(format!("dangling node id {:?}", id)),
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NameConflict { .. } => "NAME_CONFLICT",
            Self::InvalidPath { .. } => "INVALID_PATH",
            Self::Locked { .. } => "LOCKED",
            Self::HasChildren { .. } => "HAS_CHILDREN",
            Self::AliasConflict { .. } => "ALIAS_CONFLICT",
            Self::AlreadyInScope { .. } => "ALREADY_IN_SCOPE",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::ArgumentCount { .. } => "ARGUMENT_COUNT",
            Self::Builtin { .. } => "BUILTIN",
            Self::InvalidPermission(_) => "INVALID_PERMISSION",
            Self::Render(_) => "RENDER",
            Self::Storage(_) => "STORAGE",
            Self::Config(_) => "CONFIG",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::Storage(_) | Self::Config(_) | Self::Internal(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let path = CommandPath::from("admin stats");
        assert_eq!(
            RegistryError::not_found(&path).to_string(),
            "Command 'admin stats' does not exist"
        );
        assert_eq!(
            RegistryError::locked(&path).to_string(),
            "Command 'admin stats' is locked and cannot be edited"
        );
    }

    #[test]
    fn test_error_codes() {
        let path = CommandPath::from("greet");
        assert_eq!(RegistryError::has_children(&path).error_code(), "HAS_CHILDREN");
        assert_eq!(RegistryError::InvalidPermission(7).error_code(), "INVALID_PERMISSION");
    }

    #[test]
    fn test_user_error_classification() {
        let path = CommandPath::from("greet");
        assert!(RegistryError::name_conflict(&path).is_user_error());
        assert!(!RegistryError::internal("boom").is_user_error());
        assert!(!RegistryError::from(StorageError::Unavailable("down".into())).is_user_error());
    }

    #[test]
    fn test_from_tree_error() {
        let path = CommandPath::from("fun hug");
        let error = RegistryError::from_tree(
            TreeError::NotAGroup {
                name: "fun".to_string(),
            },
            &path,
        );
        assert!(matches!(error, RegistryError::InvalidPath { .. }));
    }
}
