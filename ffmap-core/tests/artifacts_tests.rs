// Tests for removing RRD files and statistics images

use ffmap_core::ArtifactError;
use ffmap_core::artifacts::{image_pattern, remove, rrd_path};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"x").unwrap();
}

fn setup() -> (TempDir, TempDir) {
    let rrd_dir = TempDir::new().unwrap();
    let img_dir = TempDir::new().unwrap();
    (rrd_dir, img_dir)
}

#[test]
fn test_rrd_path() {
    assert_eq!(
        rrd_path(Path::new("/var/lib/ffmap/nodedb"), "a1"),
        Path::new("/var/lib/ffmap/nodedb/a1.rrd")
    );
}

#[test]
fn test_image_pattern_escapes_metacharacters() {
    assert_eq!(image_pattern(Path::new("/srv/img"), "a1"), "/srv/img/a1_*.png");
    assert_eq!(
        image_pattern(Path::new("/srv/img[1]"), "a*"),
        "/srv/img[[]1[]]/a[*]_*.png"
    );
}

#[test]
fn test_remove_images_scenario() {
    let (rrd_dir, img_dir) = setup();
    touch(img_dir.path(), "a1_day.png");
    touch(img_dir.path(), "a1_week.png");
    touch(img_dir.path(), "a2_day.png");

    let outcome = remove(rrd_dir.path(), img_dir.path(), &ids(&["a1"]));

    assert_eq!(outcome.images_removed.len(), 2);
    assert!(!outcome.no_images_found());
    assert!(!img_dir.path().join("a1_day.png").exists());
    assert!(!img_dir.path().join("a1_week.png").exists());
    assert!(img_dir.path().join("a2_day.png").exists());
}

#[test]
fn test_remove_rrd_file() {
    let (rrd_dir, img_dir) = setup();
    touch(rrd_dir.path(), "a1.rrd");
    touch(rrd_dir.path(), "a2.rrd");

    let outcome = remove(rrd_dir.path(), img_dir.path(), &ids(&["a1", "a3"]));

    assert_eq!(outcome.rrd.len(), 2);
    assert!(outcome.rrd[0].present);
    assert!(outcome.rrd[0].removed);
    assert!(!outcome.rrd[1].present);
    assert!(!outcome.rrd[1].removed);
    assert!(outcome.ignored.is_empty());
    assert!(!rrd_dir.path().join("a1.rrd").exists());
    assert!(rrd_dir.path().join("a2.rrd").exists());
}

#[test]
fn test_no_images_found() {
    let (rrd_dir, img_dir) = setup();
    touch(img_dir.path(), "a2_day.png");

    let outcome = remove(rrd_dir.path(), img_dir.path(), &ids(&["a1"]));

    assert!(outcome.no_images_found());
    assert!(outcome.ignored.is_empty());
}

#[test]
fn test_missing_directories_are_not_errors() {
    let outcome = remove(
        Path::new("/nonexistent/ffmap/nodedb"),
        Path::new("/nonexistent/ffmap/img"),
        &ids(&["a1"]),
    );

    assert!(!outcome.rrd[0].present);
    assert!(outcome.no_images_found());
    assert!(outcome.ignored.is_empty());
}

#[test]
fn test_failed_deletions_are_collected() {
    let (rrd_dir, img_dir) = setup();
    // Directories cannot be removed with remove_file
    fs::create_dir(rrd_dir.path().join("a1.rrd")).unwrap();
    fs::create_dir(img_dir.path().join("a1_day.png")).unwrap();
    touch(img_dir.path(), "a1_week.png");

    let outcome = remove(rrd_dir.path(), img_dir.path(), &ids(&["a1"]));

    assert!(!outcome.rrd[0].present);
    assert!(!outcome.rrd[0].removed);
    assert_eq!(outcome.images_removed.len(), 1);
    assert_eq!(outcome.ignored.len(), 2);
    assert!(
        outcome
            .ignored
            .iter()
            .all(|err| matches!(err, ArtifactError::Remove { .. }))
    );
}

#[test]
fn test_remove_twice_finds_nothing() {
    let (rrd_dir, img_dir) = setup();
    touch(rrd_dir.path(), "a1.rrd");
    touch(img_dir.path(), "a1_day.png");

    remove(rrd_dir.path(), img_dir.path(), &ids(&["a1"]));
    let outcome = remove(rrd_dir.path(), img_dir.path(), &ids(&["a1"]));

    assert!(!outcome.rrd[0].present);
    assert!(!outcome.rrd[0].removed);
    assert!(outcome.no_images_found());
}
