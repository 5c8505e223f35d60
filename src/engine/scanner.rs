//! Source-tree enumeration.
//!
//! Walks the source directory, classifies each file as media or sidecar,
//! and produces the flat record list the planner consumes. Creation
//! timestamps start as filesystem mtime; picture files are upgraded from
//! EXIF where possible.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::engine::metadata;
use crate::models::media_types::extension_of;
use crate::models::sidecar::is_sidecar_extension;
use crate::models::{FileRecord, FileType, MediaCategory};

/// Directory names whose whole subtree is never media.
const SKIPPED_DIRS: [&str; 2] = [".Spotlight-V100", ".fseventsd"];

/// Path fragment marking camera-generated thumbnail trees.
const THUMBNAIL_MARKER: &str = "THMBNL";

#[derive(Debug, Error)]
pub enum ScanError {
	#[error("source directory does not exist: {0}")]
	SourceNotFound(String),

	#[error("source path is not a directory: {0}")]
	SourceNotDir(String),

	#[error("filesystem walk error: {0}")]
	Walk(#[from] walkdir::Error),
}

/// Enumerate and classify every media and sidecar file under the source
/// directory. Unreadable entries are skipped with a warning; non-media
/// files are skipped silently.
pub fn enumerate(cfg: &Config) -> Result<Vec<FileRecord>, ScanError> {
	let root = cfg.source_dir.as_path();
	if !root.exists() {
		return Err(ScanError::SourceNotFound(root.display().to_string()));
	}
	if !root.is_dir() {
		return Err(ScanError::SourceNotDir(root.display().to_string()));
	}

	let mut records = Vec::new();

	let walker = WalkDir::new(root)
		.follow_links(false)
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|entry| {
			let name = entry.file_name().to_string_lossy();
			if entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()) {
				return false;
			}
			if cfg.skip_thumbnails && entry.path().to_string_lossy().contains(THUMBNAIL_MARKER) {
				return false;
			}
			true
		});

	for result in walker {
		let entry = match result {
			Ok(e) => e,
			Err(e) => {
				warn!(error = %e, "skipping unreadable entry");
				continue;
			}
		};

		if entry.file_type().is_dir() || entry.file_type().is_symlink() {
			continue;
		}

		let name = match entry.file_name().to_str() {
			Some(n) => n.to_string(),
			None => {
				warn!(path = %entry.path().display(), "skipping non-UTF-8 filename");
				continue;
			}
		};

		let Some((category, file_type)) = classify(&name, cfg) else {
			debug!(path = %entry.path().display(), "skipping non-media file");
			continue;
		};

		let meta = match entry.metadata() {
			Ok(m) => m,
			Err(e) => {
				warn!(path = %entry.path().display(), error = %e, "skipping unreadable file");
				continue;
			}
		};

		let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
		let mut created = naive_local(mtime);
		if let Some(from_meta) = metadata::creation_datetime(entry.path(), category) {
			created = from_meta;
		}

		let parent = entry.path().parent().unwrap_or(root);
		records.push(FileRecord::new(
			parent,
			&name,
			meta.len(),
			created,
			category,
			file_type,
		));
	}

	Ok(records)
}

/// Extension-based classification under the configured sidecar override
/// map. `None` means the file is neither media nor sidecar.
fn classify(name: &str, cfg: &Config) -> Option<(MediaCategory, Option<FileType>)> {
	let ext = extension_of(name)?;
	if is_sidecar_extension(&ext, &cfg.sidecars) {
		return Some((MediaCategory::Sidecar, None));
	}
	let file_type = FileType::from_extension(&ext)?;
	Some((file_type.category(), Some(file_type)))
}

fn naive_local(t: SystemTime) -> NaiveDateTime {
	DateTime::<Local>::from(t).naive_local()
}
