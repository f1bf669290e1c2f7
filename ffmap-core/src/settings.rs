//! Layered settings: built-in defaults, then the INI config file, then
//! command line overrides. Later layers win.
//!
//! The result is an immutable [`Settings`] value that is handed to the
//! maintenance operations by reference.

use crate::error::SettingsError;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "/etc/ffmap/ffmap.cfg";
pub const DEFAULT_LOGFILE: &str = "/var/log/ffmap.log";
pub const DEFAULT_LOGLEVEL: &str = "2";
pub const DEFAULT_DEST_DIR: &str = "/var/lib/ffmap/mapdata";
pub const DEFAULT_NODEDB_DIR: &str = "/var/lib/ffmap/nodedb";
pub const DEFAULT_IMGPATH: &str = "/var/www/meshviewer/stats/img";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The config file that was asked for, whether or not it could be read.
    pub config_file: PathBuf,
    pub logfile: PathBuf,
    /// Numeric level (0 = error .. 4 = trace) or a level name.
    pub loglevel: String,
    /// Directory holding nodes.json, nodelist.json and graph.json.
    pub dest_dir: PathBuf,
    /// Directory holding the per-node RRD files.
    pub nodedb_dir: PathBuf,
    /// Directory holding the rendered statistics images.
    pub imgpath: PathBuf,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
    pub nodedb_dir: Option<PathBuf>,
    pub imgpath: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Layers {
    global: GlobalSection,
    rrd: RrdSection,
}

#[derive(Debug, Deserialize)]
struct GlobalSection {
    logfile: PathBuf,
    loglevel: String,
    dest_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RrdSection {
    nodedb: PathBuf,
    imgpath: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            logfile: PathBuf::from(DEFAULT_LOGFILE),
            loglevel: DEFAULT_LOGLEVEL.to_string(),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            nodedb_dir: PathBuf::from(DEFAULT_NODEDB_DIR),
            imgpath: PathBuf::from(DEFAULT_IMGPATH),
        }
    }
}

impl Settings {
    /// Assemble the settings for one run.
    ///
    /// A config file that is missing or cannot be parsed is skipped; the
    /// reason comes back as the second tuple element so the caller can warn
    /// once logging is set up.
    pub fn load(overrides: &Overrides) -> Result<(Settings, Option<SettingsError>), SettingsError> {
        let config_file = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let (layers, warning) = if config_file.is_file() {
            match merge_layers(Some(&config_file), overrides) {
                Ok(layers) => (layers, None),
                Err(source) => (
                    merge_layers(None, overrides)?,
                    Some(SettingsError::Unparsable {
                        path: config_file.clone(),
                        source,
                    }),
                ),
            }
        } else {
            (
                merge_layers(None, overrides)?,
                Some(SettingsError::NotFound(config_file.clone())),
            )
        };

        let settings = Settings {
            config_file,
            logfile: layers.global.logfile,
            loglevel: layers.global.loglevel,
            dest_dir: layers.global.dest_dir,
            nodedb_dir: layers.rrd.nodedb,
            imgpath: layers.rrd.imgpath,
        };
        Ok((settings, warning))
    }
}

fn merge_layers(config_file: Option<&Path>, overrides: &Overrides) -> Result<Layers, ConfigError> {
    let mut builder = Config::builder()
        .set_default("global.logfile", DEFAULT_LOGFILE)?
        .set_default("global.loglevel", DEFAULT_LOGLEVEL)?
        .set_default("global.dest_dir", DEFAULT_DEST_DIR)?
        .set_default("rrd.nodedb", DEFAULT_NODEDB_DIR)?
        .set_default("rrd.imgpath", DEFAULT_IMGPATH)?;

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).format(FileFormat::Ini).required(true));
    }

    let cli = [
        ("global.dest_dir", &overrides.dest_dir),
        ("rrd.nodedb", &overrides.nodedb_dir),
        ("rrd.imgpath", &overrides.imgpath),
    ];
    for (key, value) in cli {
        if let Some(value) = value {
            builder = builder.set_override(key, value.to_string_lossy().into_owned())?;
        }
    }

    builder.build()?.try_deserialize()
}
