use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CollageError;
use crate::metadata;

/// Order in which discovered photos fill the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Filesystem modification time, oldest first.
    #[default]
    Time,
    /// Full path string, ascending.
    Name,
    /// Embedded capture time, oldest first.
    Exif,
}

impl FromStr for SortStrategy {
    type Err = CollageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "time" => Ok(Self::Time),
            "name" => Ok(Self::Name),
            "exif" => Ok(Self::Exif),
            other => Err(CollageError::InvalidConfig(format!(
                "invalid sort mode {other:?} (use \"time\", \"name\", or \"exif\")"
            ))),
        }
    }
}

impl SortStrategy {
    /// Lenient lookup: unknown names warn and fall back to `Time`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(mode = name, "unknown sort mode, falling back to time");
            Self::Time
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Name => "name",
            Self::Exif => "exif",
        }
    }
}

/// Sorts `paths` by `strategy`. Every strategy is a total order: timestamps
/// that cannot be read become the Unix epoch and ties fall back to the path.
pub fn sort_paths(mut paths: Vec<PathBuf>, strategy: SortStrategy) -> Vec<PathBuf> {
    match strategy {
        SortStrategy::Name => {
            paths.sort_by(|a, b| cmp_path(a, b));
            paths
        }
        SortStrategy::Time => sort_by_timestamp(paths, |p| modified_time(p).unwrap_or_default()),
        SortStrategy::Exif => sort_by_timestamp(paths, exif_time_or_fallback),
    }
}

fn sort_by_timestamp<F>(paths: Vec<PathBuf>, key: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> DateTime<Utc>,
{
    let mut items: Vec<(DateTime<Utc>, PathBuf)> =
        paths.into_iter().map(|p| (key(&p), p)).collect();
    items.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| cmp_path(&a.1, &b.1)));
    items.into_iter().map(|(_, p)| p).collect()
}

fn cmp_path(a: &Path, b: &Path) -> Ordering {
    a.as_os_str().cmp(b.as_os_str())
}

/// Modification time, or `None` (with a warning) when it cannot be read.
pub fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => Some(DateTime::<Utc>::from(t)),
        Err(e) => {
            warn!(?path, error = %e, "stat failed");
            None
        }
    }
}

/// Capture time from EXIF, else modification time, else the epoch.
pub fn exif_time_or_fallback(path: &Path) -> DateTime<Utc> {
    let captured = match File::open(path) {
        Ok(f) => metadata::capture_time_from(&mut BufReader::new(f)),
        Err(e) => {
            warn!(?path, error = %e, "open for exif failed");
            None
        }
    };
    match captured {
        Some(ts) => ts,
        None => {
            debug!(?path, "no exif timestamp, using modification time");
            modified_time(path).unwrap_or_default()
        }
    }
}
