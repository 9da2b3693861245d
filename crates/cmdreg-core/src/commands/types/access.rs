//! Visibility scope, permission levels and alias modes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RegistryError;

/// Where a command is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only inside the owning tenant
    Local,
    /// In every tenant
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// Minimum level a principal needs to execute a command
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum PermissionLevel {
    #[default]
    Public = 0,
    Moderator = 1,
    Admin = 2,
    Owner = 3,
}

impl PermissionLevel {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = RegistryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::Moderator),
            2 => Ok(Self::Admin),
            3 => Ok(Self::Owner),
            other => Err(RegistryError::InvalidPermission(other)),
        }
    }
}

impl From<PermissionLevel> for u8 {
    fn from(level: PermissionLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::Owner => "owner",
        };
        write!(f, "{} ({})", self.as_u8(), name)
    }
}

/// How `add_aliases` treats aliases that collide with a sibling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    /// Any collision rejects the whole call
    #[default]
    Strict,
    /// Colliding aliases are dropped, the rest are added
    Permissive,
}
