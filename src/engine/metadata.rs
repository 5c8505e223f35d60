//! Creation-timestamp extraction.
//!
//! Pictures get their EXIF DateTimeOriginal (falling back to
//! DateTimeDigitized); everything else, and every extraction failure,
//! keeps the filesystem modification time the scanner already recorded.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use exif::{In, Tag, Value};
use tracing::debug;

use crate::models::MediaCategory;

/// Best-effort creation timestamp from embedded metadata. `None` means
/// "keep the mtime fallback"; extraction failures are never errors.
pub fn creation_datetime(path: &Path, category: MediaCategory) -> Option<NaiveDateTime> {
	match category {
		MediaCategory::ProcessedPicture | MediaCategory::RawPicture => {}
		// Video containers would need box parsing; mtime is the fallback.
		MediaCategory::Video | MediaCategory::RawVideo | MediaCategory::Sidecar => return None,
	}

	let file = match fs::File::open(path) {
		Ok(f) => f,
		Err(e) => {
			debug!(path = %path.display(), error = %e, "cannot open file for metadata");
			return None;
		}
	};

	let mut reader = BufReader::new(file);
	let exif = match exif::Reader::new().read_from_container(&mut reader) {
		Ok(exif) => exif,
		Err(e) => {
			debug!(path = %path.display(), error = %e, "no usable EXIF data");
			return None;
		}
	};

	for tag in [Tag::DateTimeOriginal, Tag::DateTimeDigitized] {
		if let Some(field) = exif.get_field(tag, In::PRIMARY) {
			if let Some(dt) = parse_exif_datetime(&field.value) {
				return Some(dt);
			}
		}
	}

	None
}

fn parse_exif_datetime(value: &Value) -> Option<NaiveDateTime> {
	let Value::Ascii(ref vec) = *value else {
		return None;
	};
	let bytes = vec.first()?;
	let dt = exif::DateTime::from_ascii(bytes).ok()?;
	NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
		.and_hms_opt(
			u32::from(dt.hour),
			u32::from(dt.minute),
			u32::from(dt.second),
		)
}
