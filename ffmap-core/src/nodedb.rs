// Editing node records in nodes.json

use crate::model::{NodeDb, Role};
use crate::report::{Change, EditLog, StoreOutcome};
use crate::store::edit_in_dir;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

pub fn modify(
    dest_dir: &Path,
    node_ids: &[String],
    role: Option<Role>,
    clear_location: bool,
) -> StoreOutcome {
    edit_in_dir(dest_dir, |db: &mut NodeDb| {
        apply_modify(db, node_ids, role, clear_location)
    })
}

pub fn remove(dest_dir: &Path, node_ids: &[String]) -> StoreOutcome {
    edit_in_dir(dest_dir, |db: &mut NodeDb| apply_remove(db, node_ids))
}

/// Set the role and/or drop the location of every requested node.
pub fn apply_modify(
    db: &mut NodeDb,
    node_ids: &[String],
    role: Option<Role>,
    clear_location: bool,
) -> EditLog {
    let mut log = EditLog::default();

    for node_id in node_ids {
        let Some(record) = db.nodes_mut().and_then(|nodes| nodes.get_mut(node_id)) else {
            warn!("Node {} not found in nodedb", node_id);
            log.missing.push(node_id.clone());
            continue;
        };
        info!("Modify {} in nodedb", node_id);

        if let Some(role) = role {
            let from = record_role(record);
            info!(
                "  - change role from '{}' to '{}'",
                from.as_deref().unwrap_or("<unset>"),
                role
            );
            set_record_role(record, role);
            log.changes.push(Change::RoleChanged {
                node_id: node_id.clone(),
                from,
                to: role,
            });
        }

        if clear_location {
            if clear_record_location(record) {
                info!("  - remove location");
                log.changes.push(Change::LocationCleared {
                    node_id: node_id.clone(),
                });
            } else {
                info!("  - no location set");
            }
        }
    }

    log
}

pub fn apply_remove(db: &mut NodeDb, node_ids: &[String]) -> EditLog {
    let mut log = EditLog::default();

    for node_id in node_ids {
        let removed = db.nodes_mut().and_then(|nodes| nodes.shift_remove(node_id));
        if removed.is_some() {
            info!("Remove {} from nodedb", node_id);
            log.changes.push(Change::Removed {
                node_id: node_id.clone(),
            });
        } else {
            warn!("Node {} not found in nodedb", node_id);
            log.missing.push(node_id.clone());
        }
    }

    log
}

/// `nodeinfo.system.role` of a node record, if set.
pub fn record_role(record: &Value) -> Option<String> {
    record
        .pointer("/nodeinfo/system/role")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn set_record_role(record: &mut Value, role: Role) {
    let nodeinfo = object_mut(record)
        .entry("nodeinfo")
        .or_insert(Value::Null);
    let system = object_mut(nodeinfo).entry("system").or_insert(Value::Null);
    object_mut(system).insert("role".to_string(), Value::from(role.as_str()));
}

fn clear_record_location(record: &mut Value) -> bool {
    record
        .get_mut("nodeinfo")
        .and_then(Value::as_object_mut)
        .and_then(|nodeinfo| nodeinfo.shift_remove("location"))
        .is_some()
}

// Anything that is not an object yet (missing or malformed) becomes an empty one.
fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}
