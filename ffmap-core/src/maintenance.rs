// Modify and remove operations across all stores
//
// Every store is loaded, edited and written on its own. There is no rollback:
// a store that fails to write does not stop the stores and artifacts after it.

use crate::artifacts;
use crate::error::{MaintenanceError, Result};
use crate::graph;
use crate::model::Role;
use crate::nodedb;
use crate::nodelist;
use crate::report::{ModifyReport, RemoveReport};
use crate::settings::Settings;
use tracing::{info, warn};

/// Changes requested for existing node records.
#[derive(Debug, Clone, Default)]
pub struct ModifyRequest {
    /// New role name. Names outside [`Role::ALL`] are reported and ignored.
    pub role: Option<String>,
    pub clear_location: bool,
}

pub struct Maintainer<'a> {
    settings: &'a Settings,
}

impl<'a> Maintainer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Change role and/or location in nodes.json and nodelist.json.
    pub fn modify(&self, node_ids: &[String], request: &ModifyRequest) -> Result<ModifyReport> {
        let node_ids = normalize_node_ids(node_ids)?;

        let mut rejected_role = None;
        let role = match request.role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => Some(role),
            Some(Err(err)) => {
                warn!("Ignoring {}", err);
                rejected_role = Some(err.0);
                None
            }
            None => None,
        };

        let dest_dir = &self.settings.dest_dir;
        info!("Modifying {} node(s) in {}", node_ids.len(), dest_dir.display());
        let nodedb = nodedb::modify(dest_dir, &node_ids, role, request.clear_location);
        let nodelist = nodelist::modify(dest_dir, &node_ids, role, request.clear_location);

        Ok(ModifyReport {
            rejected_role,
            nodedb,
            nodelist,
        })
    }

    /// Remove nodes from every store and delete their RRD files and images.
    pub fn remove(&self, node_ids: &[String]) -> Result<RemoveReport> {
        let node_ids = normalize_node_ids(node_ids)?;

        let dest_dir = &self.settings.dest_dir;
        info!("Removing {} node(s) from {}", node_ids.len(), dest_dir.display());
        let nodedb = nodedb::remove(dest_dir, &node_ids);
        let nodelist = nodelist::remove(dest_dir, &node_ids);
        let graph = graph::remove(dest_dir, &node_ids);
        let artifacts = artifacts::remove(&self.settings.nodedb_dir, &self.settings.imgpath, &node_ids);

        Ok(RemoveReport {
            nodedb,
            nodelist,
            graph,
            artifacts,
        })
    }
}

/// Trim ids, drop blanks and repeats while keeping the given order.
pub fn normalize_node_ids(node_ids: &[String]) -> Result<Vec<String>> {
    let mut unique: Vec<String> = Vec::with_capacity(node_ids.len());
    for node_id in node_ids.iter().map(|id| id.trim()) {
        if !node_id.is_empty() && !unique.iter().any(|seen| seen == node_id) {
            unique.push(node_id.to_string());
        }
    }

    if unique.is_empty() {
        return Err(MaintenanceError::NoNodeIds);
    }
    Ok(unique)
}
