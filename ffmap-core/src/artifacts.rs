// Best-effort removal of RRD databases and rendered statistics images

use crate::error::ArtifactError;
use crate::report::{ArtifactOutcome, RrdOutcome};
use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub fn rrd_path(nodedb_dir: &Path, node_id: &str) -> PathBuf {
    nodedb_dir.join(format!("{}.rrd", node_id))
}

/// Glob matching every `<node_id>_*.png` in `imgpath`. Both parts are
/// escaped so ids and directories with glob metacharacters match literally.
pub fn image_pattern(imgpath: &Path, node_id: &str) -> String {
    let dir = Pattern::escape(&imgpath.to_string_lossy());
    Path::new(&dir)
        .join(format!("{}_*.png", Pattern::escape(node_id)))
        .to_string_lossy()
        .into_owned()
}

/// Delete the RRD file and all statistics images of every node.
///
/// Failures are collected in [`ArtifactOutcome::ignored`] and never stop the
/// cleanup of the remaining files.
pub fn remove(nodedb_dir: &Path, imgpath: &Path, node_ids: &[String]) -> ArtifactOutcome {
    let mut outcome = ArtifactOutcome::default();

    for node_id in node_ids {
        let rrd = remove_rrd(nodedb_dir, node_id, &mut outcome.ignored);
        outcome.rrd.push(rrd);
    }

    for node_id in node_ids {
        remove_images(imgpath, node_id, &mut outcome);
    }
    if outcome.no_images_found() {
        info!("No stats images found in {}", imgpath.display());
    }

    outcome
}

fn remove_rrd(nodedb_dir: &Path, node_id: &str, ignored: &mut Vec<ArtifactError>) -> RrdOutcome {
    let path = rrd_path(nodedb_dir, node_id);
    let present = path.is_file();
    if present {
        info!("Removing RRD database file {}", display_name(&path));
    } else {
        info!("RRD database file {} not found", display_name(&path));
    }

    let removed = match fs::remove_file(&path) {
        Ok(()) => true,
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(source) => {
            debug!("ignoring failed removal of {}: {}", path.display(), source);
            ignored.push(ArtifactError::Remove {
                path: path.clone(),
                source,
            });
            false
        }
    };

    RrdOutcome {
        node_id: node_id.to_string(),
        path,
        present,
        removed,
    }
}

fn remove_images(imgpath: &Path, node_id: &str, outcome: &mut ArtifactOutcome) {
    let pattern = image_pattern(imgpath, node_id);
    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(source) => {
            warn!("invalid image pattern {}: {}", pattern, source);
            outcome.ignored.push(ArtifactError::Pattern { pattern, source });
            return;
        }
    };

    for entry in paths {
        let image = match entry {
            Ok(image) => image,
            Err(err) => {
                debug!("ignoring unreadable image entry: {}", err);
                outcome.ignored.push(err.into());
                continue;
            }
        };
        info!("Removing stats image {}", display_name(&image));
        match fs::remove_file(&image) {
            Ok(()) => outcome.images_removed.push(image),
            Err(source) => {
                debug!("ignoring failed removal of {}: {}", image.display(), source);
                outcome.ignored.push(ArtifactError::Remove {
                    path: image,
                    source,
                });
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
