use ffmap::commands::command_argument_builder;
use ffmap::handlers::*;
use ffmap::logging::level_from_setting;
use ffmap_core::{Maintainer, ModifyRequest, Settings};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::filter::LevelFilter;

fn parse(args: &[&str]) -> clap::ArgMatches {
    command_argument_builder()
        .try_get_matches_from(args)
        .unwrap()
}

fn plain() {
    colored::control::set_override(false);
}

#[test]
fn test_modify_arguments() {
    let matches = parse(&[
        "ffmap", "-d", "/srv/mapdata", "modify", "-i", "a1", "a2", "-r", "hidden", "-l",
    ]);
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "modify");
    assert_eq!(node_ids_from_args(sub), vec!["a1", "a2"]);
    assert_eq!(sub.get_one::<String>("role").map(String::as_str), Some("hidden"));
    assert!(sub.get_flag("location"));

    let overrides = overrides_from_args(sub);
    assert_eq!(overrides.dest_dir, Some(PathBuf::from("/srv/mapdata")));
    assert_eq!(overrides.nodedb_dir, None);
    assert_eq!(overrides.imgpath, None);
}

#[test]
fn test_remove_arguments() {
    let matches = parse(&[
        "ffmap", "remove", "-i", "a1", "-n", "/srv/rrd", "--imgpath", "/srv/img", "-c", "/etc/x.cfg",
    ]);
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "remove");
    let overrides = overrides_from_args(sub);
    assert_eq!(overrides.config_file, Some(PathBuf::from("/etc/x.cfg")));
    assert_eq!(overrides.nodedb_dir, Some(PathBuf::from("/srv/rrd")));
    assert_eq!(overrides.imgpath, Some(PathBuf::from("/srv/img")));
}

#[test]
fn test_nodeid_is_required() {
    let result = command_argument_builder().try_get_matches_from(["ffmap", "remove"]);
    assert!(result.is_err());
}

#[test]
fn test_subcommand_is_required() {
    let result = command_argument_builder().try_get_matches_from(["ffmap"]);
    assert!(result.is_err());
}

#[test]
fn test_level_from_setting() {
    assert_eq!(level_from_setting("0"), LevelFilter::ERROR);
    assert_eq!(level_from_setting("2"), LevelFilter::INFO);
    assert_eq!(level_from_setting(" 3 "), LevelFilter::DEBUG);
    assert_eq!(level_from_setting("9"), LevelFilter::TRACE);
    assert_eq!(level_from_setting("warn"), LevelFilter::WARN);
    assert_eq!(level_from_setting("loud"), LevelFilter::INFO);
}

fn create_settings(root: &TempDir) -> Settings {
    let settings = Settings {
        dest_dir: root.path().join("mapdata"),
        nodedb_dir: root.path().join("nodedb"),
        imgpath: root.path().join("img"),
        ..Settings::default()
    };
    fs::create_dir(&settings.dest_dir).unwrap();
    fs::create_dir(&settings.nodedb_dir).unwrap();
    fs::create_dir(&settings.imgpath).unwrap();
    fs::write(
        settings.dest_dir.join("nodes.json"),
        json!({"nodes": {"a1": {"nodeinfo": {"system": {"role": "node"}}}}}).to_string(),
    )
    .unwrap();
    fs::write(
        settings.dest_dir.join("nodelist.json"),
        json!({"nodes": [{"id": "a1", "role": "node"}]}).to_string(),
    )
    .unwrap();
    fs::write(
        settings.dest_dir.join("graph.json"),
        json!({"batadv": {"nodes": [{"node_id": "a1"}], "links": []}}).to_string(),
    )
    .unwrap();
    settings
}

#[test]
fn test_render_modify_report() {
    plain();
    let root = TempDir::new().unwrap();
    let settings = create_settings(&root);
    let request = ModifyRequest {
        role: Some("hidden".to_string()),
        clear_location: false,
    };

    let report = Maintainer::new(&settings)
        .modify(&["a1".to_string(), "zz".to_string()], &request)
        .unwrap();
    let rendered = render_modify_report(&report);

    assert!(rendered.contains("a1 in nodedb: role 'node' -> 'hidden'"));
    assert!(rendered.contains("a1 in nodelist: role 'node' -> 'hidden'"));
    assert!(rendered.contains("Node zz not found in nodedb"));
    assert!(rendered.contains("Node zz not found in nodelist"));
    assert!(rendered.contains("nodes.json"));
}

#[test]
fn test_render_modify_report_unknown_role() {
    plain();
    let root = TempDir::new().unwrap();
    let settings = create_settings(&root);
    let request = ModifyRequest {
        role: Some("boss".to_string()),
        clear_location: false,
    };

    let report = Maintainer::new(&settings)
        .modify(&["a1".to_string()], &request)
        .unwrap();
    let rendered = render_modify_report(&report);

    assert!(rendered.contains("Unknown role 'boss'"));
    assert!(!rendered.contains("Wrote"));
}

#[test]
fn test_render_remove_report() {
    plain();
    let root = TempDir::new().unwrap();
    let settings = create_settings(&root);
    fs::write(settings.imgpath.join("a1_day.png"), b"png").unwrap();

    let report = Maintainer::new(&settings)
        .remove(&["a1".to_string()])
        .unwrap();
    let rendered = render_remove_report(&report);

    assert!(rendered.contains("Removed a1 from nodedb"));
    assert!(rendered.contains("Removed a1 from nodelist"));
    assert!(rendered.contains("Removed a1 from graph nodes at index 0 with 0 link(s)"));
    assert!(rendered.contains("a1.rrd not found"));
    assert!(rendered.contains("1 stats image(s) deleted"));
}

#[test]
fn test_render_remove_report_nothing_left() {
    plain();
    let root = TempDir::new().unwrap();
    let settings = create_settings(&root);
    let maintainer = Maintainer::new(&settings);
    maintainer.remove(&["a1".to_string()]).unwrap();

    let rendered = render_remove_report(&maintainer.remove(&["a1".to_string()]).unwrap());

    assert!(rendered.contains("Node a1 not found in graph"));
    assert!(rendered.contains("No stats images found"));
    assert!(!rendered.contains("Wrote"));
}
