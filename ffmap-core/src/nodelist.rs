// Editing entries in nodelist.json

use crate::model::{NodeList, Role};
use crate::report::{Change, EditLog, StoreOutcome};
use crate::store::edit_in_dir;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

pub fn modify(
    dest_dir: &Path,
    node_ids: &[String],
    role: Option<Role>,
    clear_location: bool,
) -> StoreOutcome {
    edit_in_dir(dest_dir, |list: &mut NodeList| {
        apply_modify(list, node_ids, role, clear_location)
    })
}

pub fn remove(dest_dir: &Path, node_ids: &[String]) -> StoreOutcome {
    edit_in_dir(dest_dir, |list: &mut NodeList| apply_remove(list, node_ids))
}

/// Position of the first entry with the given id.
pub fn find_entry(list: &NodeList, node_id: &str) -> Option<usize> {
    list.entries()
        .iter()
        .position(|entry| entry_id(entry) == Some(node_id))
}

pub fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

pub fn apply_modify(
    list: &mut NodeList,
    node_ids: &[String],
    role: Option<Role>,
    clear_location: bool,
) -> EditLog {
    let mut log = EditLog::default();

    for node_id in node_ids {
        let entry = find_entry(list, node_id)
            .zip(list.entries_mut())
            .and_then(|(ix, entries)| entries[ix].as_object_mut());
        let Some(entry) = entry else {
            warn!("Node {} not found in nodelist", node_id);
            log.missing.push(node_id.clone());
            continue;
        };
        info!("Modify {} in nodelist", node_id);

        if let Some(role) = role {
            // Replacing in place keeps the key where it was, a `null` role counts as unset.
            let from = entry
                .insert("role".to_string(), Value::from(role.as_str()))
                .and_then(|previous| previous.as_str().map(str::to_owned));
            info!(
                "  - change role from '{}' to '{}'",
                from.as_deref().unwrap_or("<unset>"),
                role
            );
            log.changes.push(Change::RoleChanged {
                node_id: node_id.clone(),
                from,
                to: role,
            });
        }

        if clear_location {
            if entry.shift_remove("position").is_some() {
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

pub fn apply_remove(list: &mut NodeList, node_ids: &[String]) -> EditLog {
    let mut log = EditLog::default();

    for node_id in node_ids {
        match find_entry(list, node_id).zip(list.entries_mut()) {
            Some((ix, entries)) => {
                info!("Remove {} from nodelist", node_id);
                entries.remove(ix);
                log.changes.push(Change::Removed {
                    node_id: node_id.clone(),
                });
            }
            None => {
                warn!("Node {} not found in nodelist", node_id);
                log.missing.push(node_id.clone());
            }
        }
    }

    log
}
