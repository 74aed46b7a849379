mod common;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use common::{Val, jpeg_bytes, jpeg_with_exif, solid_rgba, tiff, TAG_DATE_TIME_ORIGINAL};
use yearcollage_core::{SortStrategy, sort_paths};

fn touch(path: &Path, secs: u64) {
    let f = File::options().write(true).open(path).expect("open");
    f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .expect("set mtime");
}

fn write(dir: &Path, name: &str, bytes: &[u8], mtime: u64) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, bytes).expect("write");
    touch(&p, mtime);
    p
}

#[test]
fn name_order_is_lexicographic() {
    let paths = vec![
        PathBuf::from("b.jpg"),
        PathBuf::from("a.png"),
        PathBuf::from("c.webp"),
    ];
    let sorted = sort_paths(paths, SortStrategy::Name);
    assert_eq!(
        sorted,
        vec![
            PathBuf::from("a.png"),
            PathBuf::from("b.jpg"),
            PathBuf::from("c.webp")
        ]
    );
}

#[test]
fn name_order_compares_whole_strings() {
    let paths = vec![PathBuf::from("a/b-c.jpg"), PathBuf::from("a/b/c.jpg")];
    // '-' (0x2d) sorts before '/' (0x2f)
    let sorted = sort_paths(paths, SortStrategy::Name);
    assert_eq!(sorted[0], PathBuf::from("a/b-c.jpg"));
}

#[test]
fn time_order_is_oldest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let newest = write(dir.path(), "a.jpg", b"x", 3_000);
    let oldest = write(dir.path(), "b.jpg", b"x", 1_000);
    let middle = write(dir.path(), "c.jpg", b"x", 2_000);
    let sorted = sort_paths(vec![newest.clone(), oldest.clone(), middle.clone()], SortStrategy::Time);
    assert_eq!(sorted, vec![oldest, middle, newest]);
}

#[test]
fn time_order_is_total_with_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let real = write(dir.path(), "real.jpg", b"x", 5_000);
    let ghost_b = dir.path().join("ghost-b.jpg");
    let ghost_a = dir.path().join("ghost-a.jpg");
    // unreadable mtimes sort as the epoch, ties by path
    let sorted = sort_paths(
        vec![real.clone(), ghost_b.clone(), ghost_a.clone()],
        SortStrategy::Time,
    );
    assert_eq!(sorted, vec![ghost_a.clone(), ghost_b.clone(), real.clone()]);
    let again = sort_paths(vec![ghost_b, real, ghost_a], SortStrategy::Time);
    assert_eq!(sorted, again);
}

#[test]
fn exif_order_prefers_capture_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let jpeg = jpeg_bytes(&solid_rgba(4, 4, [10, 20, 30, 255]));
    let shot = |ts: &str| {
        jpeg_with_exif(
            &jpeg,
            &tiff(&[], &[(TAG_DATE_TIME_ORIGINAL, Val::Ascii(ts.into()))]),
        )
    };
    // mtimes say a < b, capture times say b < a
    let a = write(dir.path(), "a.jpg", &shot("2021:06:01 10:00:00"), 1_000);
    let b = write(dir.path(), "b.jpg", &shot("2020:06:01 10:00:00"), 2_000);
    let sorted = sort_paths(vec![a.clone(), b.clone()], SortStrategy::Exif);
    assert_eq!(sorted, vec![b, a]);
}

#[test]
fn exif_order_falls_back_to_mtime_then_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plain = jpeg_bytes(&solid_rgba(4, 4, [0, 0, 0, 255]));
    let late = write(dir.path(), "a.jpg", &plain, 9_000);
    let early = write(dir.path(), "z.jpg", &plain, 1_000);
    let tie_b = write(dir.path(), "tie-b.jpg", &plain, 4_000);
    let tie_a = write(dir.path(), "tie-a.jpg", &plain, 4_000);
    let sorted = sort_paths(
        vec![late.clone(), tie_b.clone(), early.clone(), tie_a.clone()],
        SortStrategy::Exif,
    );
    assert_eq!(sorted, vec![early, tie_a, tie_b, late]);
}

#[test]
fn unknown_strategy_falls_back_to_time() {
    assert_eq!(SortStrategy::from_name("weird"), SortStrategy::Time);
    assert_eq!(SortStrategy::from_name(""), SortStrategy::Time);
    assert_eq!(SortStrategy::from_name("NAME"), SortStrategy::Name);
    assert_eq!(SortStrategy::from_name("exif"), SortStrategy::Exif);
    assert!("weird".parse::<SortStrategy>().is_err());

    let dir = tempfile::tempdir().expect("tempdir");
    let second = write(dir.path(), "a.jpg", b"x", 2_000);
    let first = write(dir.path(), "b.jpg", b"x", 1_000);
    let sorted = sort_paths(vec![second.clone(), first.clone()], SortStrategy::from_name("weird"));
    assert_eq!(sorted, vec![first, second]);
}
