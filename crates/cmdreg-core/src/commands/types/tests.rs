//! Tests for command types

use super::*;
use serde_json::json;

#[test]
fn test_path_parse_whitespace() {
    let path = CommandPath::parse("  admin   stats ", " ");
    assert_eq!(path.segments(), &["admin".to_string(), "stats".to_string()]);
    assert_eq!(path.name(), "stats");
    assert_eq!(path.parent(), CommandPath::from("admin"));
}

#[test]
fn test_path_parse_custom_separator() {
    let path = CommandPath::parse("fun.hug.big", ".");
    assert_eq!(path.len(), 3);
    assert_eq!(path.join("."), "fun.hug.big");
    assert_eq!(path.to_string(), "fun hug big");
}

#[test]
fn test_path_root() {
    let root = CommandPath::root();
    assert!(root.is_root());
    assert_eq!(root.name(), "");
    assert!(CommandPath::from("greet").parent().is_root());
}

#[test]
fn test_path_rebase() {
    let path = CommandPath::from("fun hug big");
    let rebased = path
        .rebase(&CommandPath::from("fun"), &CommandPath::from("games party"))
        .unwrap();
    assert_eq!(rebased, CommandPath::from("games party hug big"));
    assert!(path.rebase(&CommandPath::from("other"), &CommandPath::root()).is_none());
}

#[test]
fn test_path_starts_with_is_segment_aware() {
    let path = CommandPath::from("greeting");
    assert!(!path.starts_with(&CommandPath::from("greet")));
    assert!(path.starts_with(&CommandPath::root()));
}

#[test]
fn test_permission_level_ordering() {
    assert!(PermissionLevel::Public < PermissionLevel::Moderator);
    assert!(PermissionLevel::Admin < PermissionLevel::Owner);
}

#[test]
fn test_permission_level_from_u8() {
    assert_eq!(PermissionLevel::try_from(2).unwrap(), PermissionLevel::Admin);
    assert!(matches!(
        PermissionLevel::try_from(4),
        Err(crate::error::RegistryError::InvalidPermission(4))
    ));
}

#[test]
fn test_permission_level_serializes_as_number() {
    let json = serde_json::to_string(&PermissionLevel::Moderator).unwrap();
    assert_eq!(json, "1");
    let level: PermissionLevel = serde_json::from_str("3").unwrap();
    assert_eq!(level, PermissionLevel::Owner);
    assert!(serde_json::from_str::<PermissionLevel>("9").is_err());
}

#[test]
fn test_attributes_ignore_name_key() {
    let attributes = CommandAttributes::new()
        .with("Name", "sneaky")
        .with("Brief", "Says hi");
    assert!(attributes.get("name").is_none());
    assert_eq!(attributes.brief(), Some("Says hi"));
}

#[test]
fn test_attributes_aliases() {
    let mut attributes = CommandAttributes::new().with("aliases", json!(["hi", "hey"]));
    assert_eq!(attributes.aliases(), vec!["hi", "hey"]);

    attributes.set_aliases(Vec::new());
    assert!(attributes.get("aliases").is_none());

    let single = CommandAttributes::new().with("aliases", "yo sup");
    assert_eq!(single.aliases(), vec!["yo", "sup"]);
}

#[test]
fn test_attributes_merge_overrides_and_retains() {
    let mut base = CommandAttributes::new()
        .with("brief", "old")
        .with("help", "kept");
    base.merge(CommandAttributes::new().with("brief", "new").with("hidden", true));

    assert_eq!(base.brief(), Some("new"));
    assert_eq!(base.help(), Some("kept"));
    assert!(base.is_hidden());
}

#[test]
fn test_attributes_flags() {
    let attributes = CommandAttributes::new();
    assert!(attributes.invoke_without_command());
    assert!(!attributes.is_hidden());

    let strict = CommandAttributes::new().with("invoke_without_command", "false");
    assert!(!strict.invoke_without_command());
}

#[test]
fn test_record_builder() {
    let record = CommandRecord::new(CommandPath::from("greet"), "Hello, {}!", TenantId::from("g1"))
        .group()
        .with_permission(PermissionLevel::Moderator);

    assert!(record.is_group);
    assert!(!record.locked);
    assert_eq!(record.scope, Scope::Local);
    assert!(record.is_owned_by(&TenantId::from("g1")));
    assert!(!record.is_owned_by(&TenantId::from("g2")));
}

#[test]
fn test_record_json_roundtrip_defaults() {
    let json = r#"{"name":["greet"],"template":"Hi","scope":"global"}"#;
    let record: CommandRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.scope, Scope::Global);
    assert_eq!(record.permission, PermissionLevel::Public);
    assert!(record.owner.is_none());
    assert!(record.attributes.is_empty());
}
