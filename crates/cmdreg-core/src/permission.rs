//! Permission resolution for command execution

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::fmt;

use crate::commands::types::{PermissionLevel, TenantId};

/// The user invoking a command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a principal in a tenant to a permission level
///
/// Consulted only when a command executes.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    async fn resolve(&self, tenant: &TenantId, principal: &Principal) -> PermissionLevel;
}

/// Resolver backed by an in-memory grant table
///
/// Owners hold `Owner` in every tenant. Anyone without a grant is `Public`.
#[derive(Debug, Default)]
pub struct StaticPermissionResolver {
    owners: HashSet<Principal>,
    grants: DashMap<(TenantId, Principal), PermissionLevel>,
}

impl StaticPermissionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, principal: impl Into<Principal>) -> Self {
        self.owners.insert(principal.into());
        self
    }

    /// Set the level of `principal` in `tenant`, replacing any earlier grant
    pub fn grant(&self, tenant: TenantId, principal: Principal, level: PermissionLevel) {
        self.grants.insert((tenant, principal), level);
    }

    pub fn revoke(&self, tenant: &TenantId, principal: &Principal) {
        self.grants.remove(&(tenant.clone(), principal.clone()));
    }
}

#[async_trait]
impl PermissionResolver for StaticPermissionResolver {
    async fn resolve(&self, tenant: &TenantId, principal: &Principal) -> PermissionLevel {
        if self.owners.contains(principal) {
            return PermissionLevel::Owner;
        }
        self.grants
            .get(&(tenant.clone(), principal.clone()))
            .map(|level| *level)
            .unwrap_or_default()
    }
}

/// Resolver that gives every principal the same level
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPermissionResolver(pub PermissionLevel);

#[async_trait]
impl PermissionResolver for FixedPermissionResolver {
    async fn resolve(&self, _tenant: &TenantId, _principal: &Principal) -> PermissionLevel {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolver_levels() {
        let resolver = StaticPermissionResolver::new().with_owner("root");
        let g1 = TenantId::from("g1");
        let g2 = TenantId::from("g2");
        resolver.grant(g1.clone(), Principal::from("mod"), PermissionLevel::Moderator);

        assert_eq!(resolver.resolve(&g1, &Principal::from("root")).await, PermissionLevel::Owner);
        assert_eq!(resolver.resolve(&g2, &Principal::from("root")).await, PermissionLevel::Owner);
        assert_eq!(
            resolver.resolve(&g1, &Principal::from("mod")).await,
            PermissionLevel::Moderator
        );
        assert_eq!(resolver.resolve(&g2, &Principal::from("mod")).await, PermissionLevel::Public);
        assert_eq!(
            resolver.resolve(&g1, &Principal::from("stranger")).await,
            PermissionLevel::Public
        );
    }

    #[tokio::test]
    async fn test_static_resolver_revoke() {
        let resolver = StaticPermissionResolver::new();
        let g1 = TenantId::from("g1");
        let admin = Principal::from("admin");
        resolver.grant(g1.clone(), admin.clone(), PermissionLevel::Admin);
        resolver.revoke(&g1, &admin);
        assert_eq!(resolver.resolve(&g1, &admin).await, PermissionLevel::Public);
    }

    #[tokio::test]
    async fn test_fixed_resolver() {
        let resolver = FixedPermissionResolver(PermissionLevel::Admin);
        assert_eq!(
            resolver.resolve(&TenantId::from("x"), &Principal::from("y")).await,
            PermissionLevel::Admin
        );
    }
}
