// Tests for editing entries in nodelist.json

use ffmap_core::Role;
use ffmap_core::model::NodeList;
use ffmap_core::nodelist::{apply_modify, apply_remove, entry_id, find_entry};
use ffmap_core::report::Change;
use serde_json::json;

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn sample_list() -> NodeList {
    serde_json::from_value(json!({
        "version": "1.0.1",
        "nodes": [
            {"id": "a1", "name": "first", "role": "node", "position": {"lat": 53.5, "long": 10.0}},
            {"id": "a2", "name": "second", "role": "node"},
            {"id": "a1", "name": "duplicate", "role": "node"},
            {"id": "a3", "name": "roleless"}
        ]
    }))
    .unwrap()
}

#[test]
fn test_find_entry_first_match_wins() {
    let list = sample_list();

    assert_eq!(find_entry(&list, "a1"), Some(0));
    assert_eq!(find_entry(&list, "a3"), Some(3));
    assert_eq!(find_entry(&list, "zz"), None);
}

#[test]
fn test_modify_role_marks_change() {
    let mut list = sample_list();

    let log = apply_modify(&mut list, &ids(&["a1", "a3"]), Some(Role::Offloader), false);

    assert_eq!(
        log.changes,
        vec![
            Change::RoleChanged {
                node_id: "a1".to_string(),
                from: Some("node".to_string()),
                to: Role::Offloader,
            },
            Change::RoleChanged {
                node_id: "a3".to_string(),
                from: None,
                to: Role::Offloader,
            },
        ]
    );
    let entries = list.entries();
    assert_eq!(entries[0]["role"], "offloader");
    // Only the first entry with a duplicated id is touched
    assert_eq!(entries[2]["role"], "node");
    assert_eq!(entries[3]["role"], "offloader");
}

#[test]
fn test_clear_location_removes_position() {
    let mut list = sample_list();

    let log = apply_modify(&mut list, &ids(&["a1", "a2"]), None, true);

    assert_eq!(
        log.changes,
        vec![Change::LocationCleared {
            node_id: "a1".to_string()
        }]
    );
    assert!(list.entries()[0].get("position").is_none());
    assert_eq!(list.entries()[0]["name"], "first");
}

#[test]
fn test_missing_entry_is_reported() {
    let mut list = sample_list();
    let before = list.clone();

    let log = apply_modify(&mut list, &ids(&["zz"]), Some(Role::Hidden), true);

    assert!(!log.changed());
    assert_eq!(log.missing, ids(&["zz"]));
    assert_eq!(list, before);
}

#[test]
fn test_remove_entries() {
    let mut list = sample_list();

    let log = apply_remove(&mut list, &ids(&["a2", "zz"]));

    assert_eq!(
        log.changes,
        vec![Change::Removed {
            node_id: "a2".to_string()
        }]
    );
    assert_eq!(log.missing, ids(&["zz"]));
    let remaining: Vec<Option<&str>> = list.entries().iter().map(entry_id).collect();
    assert_eq!(remaining, vec![Some("a1"), Some("a1"), Some("a3")]);
    assert_eq!(serde_json::to_value(&list).unwrap()["version"], "1.0.1");
}

#[test]
fn test_remove_drops_first_match_only() {
    let mut list = sample_list();

    apply_remove(&mut list, &ids(&["a1"]));

    assert_eq!(entry_id(&list.entries()[0]), Some("a2"));
    assert_eq!(list.entries()[1]["name"], "duplicate");
}
