//! Tests for the command tree

use super::*;
use crate::commands::types::{CommandAttributes, CommandPath, CommandRecord, Scope, TenantId};
use serde_json::json;

fn custom(path: &str) -> NodeEntry {
    NodeEntry::Custom(CommandRecord::new(
        CommandPath::from(path),
        "text",
        TenantId::from("g1"),
    ))
}

fn custom_group(path: &str) -> NodeEntry {
    NodeEntry::Custom(
        CommandRecord::new(CommandPath::from(path), "", TenantId::from("g1")).group(),
    )
}

fn with_aliases(path: &str, aliases: &[&str]) -> NodeEntry {
    NodeEntry::Custom(
        CommandRecord::new(CommandPath::from(path), "text", TenantId::from("g1"))
            .with_attributes(CommandAttributes::new().with("aliases", json!(aliases))),
    )
}

/// fun (group) -> hug (group) -> big, plus a top-level greet
fn sample_tree() -> CommandTree {
    let mut tree = CommandTree::new(Scope::Local, true);
    let root = tree.root();
    let fun = tree
        .insert(root, "fun", Subtree::leaf("fun", custom_group("fun")))
        .unwrap();
    let hug = tree
        .insert(fun, "hug", Subtree::leaf("hug", custom_group("fun hug")))
        .unwrap();
    tree.insert(hug, "big", Subtree::leaf("big", custom("fun hug big")))
        .unwrap();
    tree.insert(root, "greet", Subtree::leaf("greet", custom("greet")))
        .unwrap();
    tree
}

#[test]
fn test_new_tree_is_empty() {
    let tree = CommandTree::new(Scope::Global, false);
    assert!(tree.is_empty());
    assert_eq!(tree.scope(), Scope::Global);
    assert!(tree.find(&CommandPath::root()).is_ok());
}

#[test]
fn test_find_nested() {
    let tree = sample_tree();
    let id = tree.find(&CommandPath::from("fun hug big")).unwrap();
    assert_eq!(tree.node(id).unwrap().name(), "big");
    assert_eq!(tree.qualified_path(id), CommandPath::from("fun hug big"));
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_find_missing_segment() {
    let tree = sample_tree();
    let err = tree.find(&CommandPath::from("fun kiss")).unwrap_err();
    assert_eq!(
        err,
        TreeError::NotFound {
            segment: "kiss".to_string()
        }
    );
}

#[test]
fn test_find_through_leaf_fails() {
    let tree = sample_tree();
    let err = tree.find(&CommandPath::from("greet more")).unwrap_err();
    assert!(matches!(err, TreeError::NotAGroup { .. }));
}

#[test]
fn test_case_insensitive_lookup() {
    let tree = sample_tree();
    assert!(tree.find(&CommandPath::from("FUN Hug")).is_ok());

    let mut strict = CommandTree::new(Scope::Local, false);
    let root = strict.root();
    strict
        .insert(root, "Greet", Subtree::leaf("Greet", custom("Greet")))
        .unwrap();
    assert!(strict.find(&CommandPath::from("greet")).is_err());
    assert!(strict.find(&CommandPath::from("Greet")).is_ok());
}

#[test]
fn test_insert_name_conflict() {
    let mut tree = sample_tree();
    let root = tree.root();
    let err = tree
        .insert(root, "GREET", Subtree::leaf("GREET", custom("GREET")))
        .unwrap_err();
    assert!(matches!(err, TreeError::NameConflict { .. }));
}

#[test]
fn test_insert_alias_conflict() {
    let mut tree = sample_tree();
    let root = tree.root();
    let err = tree
        .insert(root, "hello", Subtree::leaf("hello", with_aliases("hello", &["greet"])))
        .unwrap_err();
    assert_eq!(
        err,
        TreeError::AliasConflict {
            alias: "greet".to_string()
        }
    );
    assert!(!tree.contains(&CommandPath::from("hello")));
}

#[test]
fn test_insert_under_leaf_fails() {
    let mut tree = sample_tree();
    let greet = tree.find(&CommandPath::from("greet")).unwrap();
    let err = tree
        .insert(greet, "sub", Subtree::leaf("sub", custom("greet sub")))
        .unwrap_err();
    assert!(matches!(err, TreeError::NotAGroup { .. }));
}

#[test]
fn test_aliases_resolve_to_same_node() {
    let mut tree = CommandTree::new(Scope::Local, true);
    let root = tree.root();
    let id = tree
        .insert(root, "hello", Subtree::leaf("hello", with_aliases("hello", &["Hi", "hey"])))
        .unwrap();
    assert_eq!(tree.child(root, "hi"), Some(id));
    assert_eq!(tree.child(root, "HEY"), Some(id));
    assert_eq!(tree.children(root).len(), 1);
}

#[test]
fn test_detach_removes_subtree_and_aliases() {
    let mut tree = sample_tree();
    let root = tree.root();
    let subtree = tree.detach(root, "fun").unwrap();

    assert_eq!(subtree.len(), 3);
    assert_eq!(subtree.children()[0].name(), "hug");
    assert!(!tree.contains(&CommandPath::from("fun")));
    assert!(!tree.contains(&CommandPath::from("fun hug big")));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_detach_missing() {
    let mut tree = sample_tree();
    let root = tree.root();
    assert!(matches!(
        tree.detach(root, "nope"),
        Err(TreeError::NotFound { .. })
    ));
}

#[test]
fn test_move_subtree_reparents_descendants() {
    let mut tree = sample_tree();
    let root = tree.root();
    let mut subtree = tree.detach(root, "fun").unwrap();
    subtree.rebase(&CommandPath::from("games"), Scope::Local);
    let games = tree.insert(root, "games", subtree).unwrap();

    let big = tree.find(&CommandPath::from("games hug big")).unwrap();
    assert_eq!(tree.qualified_path(big), CommandPath::from("games hug big"));
    let record = tree.node(big).unwrap().record().unwrap();
    assert_eq!(record.name, CommandPath::from("games hug big"));

    let hug = tree.node(big).unwrap().parent().unwrap();
    assert_eq!(tree.node(hug).unwrap().parent(), Some(games));
}

#[test]
fn test_move_between_trees() {
    let mut local = sample_tree();
    let mut global = CommandTree::new(Scope::Global, true);
    let local_root = local.root();
    let global_root = global.root();

    let mut subtree = local.detach(local_root, "fun").unwrap();
    subtree.rebase(&CommandPath::from("fun"), Scope::Global);
    global.insert(global_root, "fun", subtree).unwrap();

    let big = global.find(&CommandPath::from("fun hug big")).unwrap();
    assert_eq!(
        global.node(big).unwrap().record().unwrap().scope,
        Scope::Global
    );
    assert!(!local.contains(&CommandPath::from("fun")));
}

#[test]
fn test_descendants_preorder() {
    let tree = sample_tree();
    let fun = tree.find(&CommandPath::from("fun")).unwrap();
    let names: Vec<CommandPath> = tree
        .descendants(fun)
        .into_iter()
        .map(|id| tree.qualified_path(id))
        .collect();
    assert_eq!(
        names,
        vec![CommandPath::from("fun hug"), CommandPath::from("fun hug big")]
    );
}

#[test]
fn test_replace_record_rekeys_aliases() {
    let mut tree = CommandTree::new(Scope::Local, true);
    let root = tree.root();
    let id = tree
        .insert(root, "hello", Subtree::leaf("hello", with_aliases("hello", &["hi"])))
        .unwrap();

    let mut record = tree.node(id).unwrap().record().unwrap().clone();
    record.attributes.set_aliases(vec!["hey".to_string()]);
    tree.replace_record(id, record).unwrap();

    assert_eq!(tree.child(root, "hey"), Some(id));
    assert_eq!(tree.child(root, "hi"), None);
    assert_eq!(tree.child(root, "hello"), Some(id));
}

#[test]
fn test_replace_record_alias_conflict_leaves_tree_unchanged() {
    let mut tree = sample_tree();
    let root = tree.root();
    let greet = tree.find(&CommandPath::from("greet")).unwrap();

    let mut record = tree.node(greet).unwrap().record().unwrap().clone();
    record.attributes.set_aliases(vec!["fun".to_string()]);
    let err = tree.replace_record(greet, record).unwrap_err();

    assert!(matches!(err, TreeError::AliasConflict { .. }));
    assert_ne!(tree.child(root, "fun"), Some(greet));
}

#[test]
fn test_replace_record_rejects_builtin() {
    let mut tree = CommandTree::new(Scope::Global, true);
    let root = tree.root();
    let record = CommandRecord::builtin(CommandPath::from("help"), "Help text");
    let id = tree
        .insert(root, "help", Subtree::leaf("help", NodeEntry::Builtin(record.clone())))
        .unwrap();
    assert!(matches!(
        tree.replace_record(id, record),
        Err(TreeError::NotCustom { .. })
    ));
}

#[test]
fn test_retain_builtins() {
    let mut tree = sample_tree();
    let root = tree.root();
    let record = CommandRecord::builtin(CommandPath::from("help"), "Help text");
    tree.insert(root, "help", Subtree::leaf("help", NodeEntry::Builtin(record)))
        .unwrap();

    tree.retain_builtins().unwrap();
    assert_eq!(tree.len(), 1);
    assert!(tree.contains(&CommandPath::from("help")));

    // Nothing left to drop
    assert_eq!(tree.retain_builtins(), Ok(()));
    assert_eq!(tree.len(), 1);
}
