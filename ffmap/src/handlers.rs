use crate::logging::init_logging;
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use ffmap_core::report::{Change, StoreOutcome, WriteStatus};
use ffmap_core::{Maintainer, ModifyReport, ModifyRequest, Overrides, RemoveReport, Settings};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::warn;

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

// Arguments that only exist on some subcommands read as absent on the others.
fn path_arg(args: &ArgMatches, id: &str) -> Option<PathBuf> {
    args.try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(|raw| expand_path(raw))
}

/// Command line layer of the settings.
pub fn overrides_from_args(args: &ArgMatches) -> Overrides {
    Overrides {
        config_file: path_arg(args, "config"),
        dest_dir: path_arg(args, "dest-dir"),
        nodedb_dir: path_arg(args, "nodedb"),
        imgpath: path_arg(args, "imgpath"),
    }
}

pub fn node_ids_from_args(args: &ArgMatches) -> Vec<String> {
    args.get_many::<String>("nodeid")
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default()
}

/// Build the settings for this run and start logging.
fn prepare(args: &ArgMatches) -> Result<Settings> {
    let (settings, config_warning) =
        Settings::load(&overrides_from_args(args)).context("Failed to assemble settings")?;

    if let Some(reason) = init_logging(&settings) {
        eprintln!("{} {}", "⚠".yellow().bold(), reason);
    }
    if let Some(err) = config_warning {
        warn!("{}, using defaults", err);
        eprintln!("{} {}, using defaults", "⚠".yellow().bold(), err);
    }

    Ok(settings)
}

pub fn handle_modify(args: &ArgMatches) -> Result<()> {
    let settings = prepare(args)?;
    let quiet = args.get_flag("quiet");

    let request = ModifyRequest {
        role: args.get_one::<String>("role").cloned(),
        clear_location: args.get_flag("location"),
    };
    if request.role.is_none() && !request.clear_location {
        eprintln!(
            "{} Neither --role nor --location given, nothing will change",
            "⚠".yellow().bold()
        );
    }

    let report = Maintainer::new(&settings).modify(&node_ids_from_args(args), &request)?;
    emit(&render_modify_report(&report), quiet);
    Ok(())
}

pub fn handle_remove(args: &ArgMatches) -> Result<()> {
    let settings = prepare(args)?;
    let quiet = args.get_flag("quiet");

    let report = Maintainer::new(&settings).remove(&node_ids_from_args(args))?;
    emit(&render_remove_report(&report), quiet);
    Ok(())
}

fn emit(report: &str, quiet: bool) {
    if quiet {
        // Keep only the lines that need attention
        for line in report.lines().filter(|l| l.contains('⚠') || l.contains('✗')) {
            eprintln!("{}", line);
        }
    } else {
        print!("{}", report);
    }
}

pub fn render_modify_report(report: &ModifyReport) -> String {
    let mut out = String::new();
    if let Some(role) = &report.rejected_role {
        let _ = writeln!(
            out,
            "{} Unknown role '{}', role left unchanged",
            "⚠".yellow().bold(),
            role
        );
    }
    for store in report.stores() {
        render_store(&mut out, store);
    }
    out
}

pub fn render_remove_report(report: &RemoveReport) -> String {
    let mut out = String::new();
    for store in report.stores() {
        render_store(&mut out, store);
    }

    let artifacts = &report.artifacts;
    for rrd in &artifacts.rrd {
        if rrd.removed {
            let _ = writeln!(
                out,
                "{} Removed RRD database file {}",
                "✓".green().bold(),
                rrd.path.display()
            );
        } else if !rrd.present {
            let _ = writeln!(
                out,
                "{} RRD database file {} not found",
                "→".blue(),
                rrd.path.display()
            );
        }
    }
    for image in &artifacts.images_removed {
        let _ = writeln!(
            out,
            "{} Removed stats image {}",
            "✓".green().bold(),
            image.display()
        );
    }
    if artifacts.no_images_found() {
        let _ = writeln!(out, "{} No stats images found", "→".blue());
    } else {
        let _ = writeln!(
            out,
            "{} {} stats image(s) deleted",
            "✓".green().bold(),
            artifacts.images_removed.len().to_string().cyan()
        );
    }
    for err in &artifacts.ignored {
        let _ = writeln!(out, "{} {} (ignored)", "⚠".yellow().bold(), err);
    }
    out
}

fn render_store(out: &mut String, store: &StoreOutcome) {
    let kind = store.kind;
    if let Some(err) = &store.load_error {
        let _ = writeln!(out, "{} {}", "⚠".yellow().bold(), err);
    }

    for change in &store.changes {
        let line = match change {
            Change::RoleChanged { node_id, from, to } => format!(
                "{} in {}: role '{}' -> '{}'",
                node_id,
                kind,
                from.as_deref().unwrap_or("<unset>"),
                to
            ),
            Change::LocationCleared { node_id } => {
                format!("{} in {}: location removed", node_id, kind)
            }
            Change::Removed { node_id } => format!("Removed {} from {}", node_id, kind),
            Change::GraphNodeRemoved {
                node_id,
                index,
                links,
            } => format!(
                "Removed {} from graph nodes at index {} with {} link(s)",
                node_id,
                index,
                links.len()
            ),
        };
        let _ = writeln!(out, "{} {}", "✓".green().bold(), line);
    }

    for node_id in &store.missing {
        let _ = writeln!(out, "{} Node {} not found in {}", "→".blue(), node_id, kind);
    }

    match &store.write {
        WriteStatus::Written => {
            let _ = writeln!(
                out,
                "{} Wrote {}",
                "✓".green().bold(),
                store.path.display().to_string().bright_white()
            );
        }
        WriteStatus::Skipped => {}
        WriteStatus::Failed(err) => {
            let _ = writeln!(out, "{} {}", "✗".red().bold(), err);
        }
    }
}
