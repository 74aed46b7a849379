//! Best-effort EXIF readers. Nothing here fails: missing or corrupt metadata
//! degrades to `Orientation::Normal` / `None`.

use std::io::{BufRead, Cursor, Seek};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use exif::{Exif, In, Reader, Tag, Value};

use crate::orientation::Orientation;

/// Fields read in strict EXIF `YYYY:MM:DD HH:MM:SS` form, in order.
const EXIF_TIME_TAGS: [Tag; 2] = [Tag::DateTimeOriginal, Tag::DateTime];

/// Fields retried with [`parse_exif_time_string`] when the strict pass fails.
const LENIENT_TIME_TAGS: [Tag; 2] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized];

/// Naive layouts tried before RFC 3339; naive values are local wall-clock time.
const NAIVE_TIME_FORMATS: [&str; 2] = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub fn read_orientation(bytes: &[u8]) -> Orientation {
    read_orientation_from(&mut Cursor::new(bytes))
}

pub fn read_orientation_from<R: BufRead + Seek>(reader: &mut R) -> Orientation {
    read_exif(reader)
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|f| f.value.get_uint(0))
        })
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

/// Capture timestamp. `DateTimeOriginal` then `DateTime` are tried as strict
/// EXIF datetimes; failing that, `DateTimeOriginal` then `DateTimeDigitized`
/// go through the lenient layouts (EXIF, ISO with a space, RFC 3339).
pub fn capture_time(bytes: &[u8]) -> Option<DateTime<Utc>> {
    capture_time_from(&mut Cursor::new(bytes))
}

pub fn capture_time_from<R: BufRead + Seek>(reader: &mut R) -> Option<DateTime<Utc>> {
    let exif = read_exif(reader)?;

    if let Some(ts) = EXIF_TIME_TAGS
        .iter()
        .find_map(|tag| exif_datetime(ascii_field(&exif, *tag)?))
    {
        return Some(ts);
    }
    LENIENT_TIME_TAGS.iter().find_map(|tag| {
        let raw = ascii_field(&exif, *tag)?;
        parse_exif_time_string(std::str::from_utf8(raw).ok()?)
    })
}

/// Parses the timestamp layouts commonly found in EXIF strings.
pub fn parse_exif_time_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if s.is_empty() {
        return None;
    }
    for fmt in NAIVE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn read_exif<R: BufRead + Seek>(reader: &mut R) -> Option<Exif> {
    Reader::new().read_from_container(reader).ok()
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<&[u8]> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(parts) => parts.first().map(Vec::as_slice),
        _ => None,
    }
}

fn exif_datetime(raw: &[u8]) -> Option<DateTime<Utc>> {
    let dt = exif::DateTime::from_ascii(raw).ok()?;
    let naive = NaiveDate::from_ymd_opt(dt.year as i32, dt.month as u32, dt.day as u32)?
        .and_hms_nano_opt(
            dt.hour as u32,
            dt.minute as u32,
            dt.second as u32,
            dt.nanosecond.unwrap_or(0),
        )?;
    local_to_utc(naive)
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
