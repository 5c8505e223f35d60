//! Import planning: destination resolution, duplicate detection, sidecar
//! linkage.
//!
//! Planning is strictly single-threaded and completes in full before any
//! copying starts. Two passes: parents (all non-sidecar records, in
//! enumeration order) get their destinations via the collision resolver
//! and feed the duplicate index; sidecars then inherit their parent's
//! resolved destination, or plan independently when orphaned.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::checksum::checksum_file;
use crate::models::media_types::extension_of;
use crate::models::sidecar::{resolve_action, SidecarAction};
use crate::models::{FileRecord, ImportStatus};

/// Highest `_NNN` suffix tried before a record is declared unnamable.
const MAX_SUFFIX: u32 = 999_999;

#[derive(Debug, Error)]
pub enum PlanError {
	/// A destination probe failed for a reason other than "not found".
	/// "Does not exist" and "inaccessible" must not be conflated.
	#[error("cannot stat {path}: {source}")]
	Stat {
		path: PathBuf,
		source: std::io::Error,
	},
}

/// In-memory multimap from (size, creation timestamp) to the indices of
/// previously planned parent records. Built monotonically during pass 1;
/// lives for exactly one run.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
	entries: HashMap<(u64, NaiveDateTime), Vec<usize>>,
}

impl DuplicateIndex {
	fn candidates(&self, size: u64, created: NaiveDateTime) -> Vec<usize> {
		self.entries
			.get(&(size, created))
			.cloned()
			.unwrap_or_default()
	}

	fn insert(&mut self, size: u64, created: NaiveDateTime, idx: usize) {
		self.entries.entry((size, created)).or_default().push(idx);
	}
}

/// Resolve destinations for every record. Mutates destination fields,
/// statuses, parent links and checksum caches in place.
pub fn plan(records: &mut [FileRecord], cfg: &Config) -> Result<(), PlanError> {
	let mut index = DuplicateIndex::default();

	// Pass 1: parents.
	for i in 0..records.len() {
		if records[i].is_sidecar() {
			continue;
		}
		records[i].dest_dir = destination_dir(cfg, records[i].created);
		let initial = initial_filename(&records[i], cfg);
		resolve_destination(records, i, &initial, cfg, Some(&index))?;
		if records[i].status != ImportStatus::Unnamable {
			index.insert(records[i].size, records[i].created, i);
		}
	}

	// Parent lookup: (source dir, lowercased base name) → first record
	// holding that key. First wins; later same-key parents are not aliased.
	let mut parents: HashMap<(PathBuf, String), usize> = HashMap::new();
	for (i, record) in records.iter().enumerate() {
		if record.is_sidecar() || record.status == ImportStatus::Unnamable {
			continue;
		}
		let key = (record.source_dir.clone(), record.base_name_key());
		parents.entry(key).or_insert(i);
	}

	// Pass 2: sidecars.
	for i in 0..records.len() {
		if !records[i].is_sidecar() {
			continue;
		}
		let ext = extension_of(&records[i].source_name).unwrap_or_default();
		match resolve_action(&ext, &cfg.sidecars, cfg.sidecar_default) {
			SidecarAction::Ignore => {
				records[i].status = ImportStatus::SidecarIgnored;
			}
			SidecarAction::Delete => {
				records[i].status = ImportStatus::SidecarDelete;
			}
			SidecarAction::Copy => {
				let key = (records[i].source_dir.clone(), records[i].base_name_key());
				if let Some(&pi) = parents.get(&key) {
					link_to_parent(records, i, pi, cfg)?;
				} else {
					// Orphan: planned like a parent, but never consults or
					// enters the duplicate index.
					debug!(name = %records[i].source_name, "orphan sidecar, planning independently");
					records[i].dest_dir = destination_dir(cfg, records[i].created);
					let initial = initial_filename(&records[i], cfg);
					resolve_destination(records, i, &initial, cfg, None)?;
				}
			}
		}
	}

	Ok(())
}

/// The sidecar keeps the parent's resolved directory and base name; only
/// the extension differs. A renamed or disambiguated parent thereby
/// carries its sidecar along without re-running collision resolution.
///
/// The anchored path is then probed once: a duplicate already at the
/// destination marks the sidecar `PreExisting`, so re-runs copy nothing.
/// A non-duplicate at the anchored path stays `Pending` and is
/// overwritten, since the name is bound to the parent and cannot move.
fn link_to_parent(
	records: &mut [FileRecord],
	i: usize,
	pi: usize,
	cfg: &Config,
) -> Result<(), PlanError> {
	let parent_dir = records[pi].dest_dir.clone();
	let parent_base = match records[pi].dest_name.rfind('.') {
		Some(idx) => records[pi].dest_name[..idx].to_string(),
		None => records[pi].dest_name.clone(),
	};
	let sidecar_ext = match records[i].source_name.rfind('.') {
		Some(idx) if idx > 0 => records[i].source_name[idx..].to_string(),
		_ => String::new(),
	};

	records[i].parent = Some(pi);
	records[i].dest_dir = parent_dir;
	records[i].dest_name = format!("{parent_base}{sidecar_ext}");

	let full = records[i].dest_path();
	if let Some(disk_size) = probe(&full)? {
		if is_duplicate_on_disk(records, i, &full, disk_size, cfg.checksum_duplicates) {
			records[i].status = ImportStatus::PreExisting;
		}
	}
	Ok(())
}

fn destination_dir(cfg: &Config, created: NaiveDateTime) -> PathBuf {
	if cfg.organize_by_date {
		cfg.dest_dir
			.join(created.format("%Y").to_string())
			.join(created.format("%m").to_string())
	} else {
		cfg.dest_dir.clone()
	}
}

fn initial_filename(record: &FileRecord, cfg: &Config) -> String {
	if cfg.rename_by_date_time {
		let ext = match record.source_name.rfind('.') {
			Some(idx) if idx > 0 => &record.source_name[idx..],
			_ => "",
		};
		format!("{}{ext}", record.created.format("%Y%m%d_%H%M%S"))
	} else {
		record.source_name.clone()
	}
}

/// §resolver: decide the final destination name for record `i`, or mark it
/// `PreExisting` (duplicate, nothing to write) or `Unnamable` (suffix
/// space exhausted). When `index` is given the record is first checked
/// against previously planned records sharing its (size, timestamp) key.
fn resolve_destination(
	records: &mut [FileRecord],
	i: usize,
	initial_name: &str,
	cfg: &Config,
	index: Option<&DuplicateIndex>,
) -> Result<(), PlanError> {
	resolve_with_limit(records, i, initial_name, cfg, index, MAX_SUFFIX)
}

fn resolve_with_limit(
	records: &mut [FileRecord],
	i: usize,
	initial_name: &str,
	cfg: &Config,
	index: Option<&DuplicateIndex>,
	max_suffix: u32,
) -> Result<(), PlanError> {
	let (base, ext) = normalized_parts(&records[i], initial_name, cfg);
	let initial = format!("{base}{ext}");

	if let Some(index) = index {
		let candidates = index.candidates(records[i].size, records[i].created);
		if is_duplicate_of_planned(records, i, &candidates, cfg.checksum_duplicates) {
			records[i].status = ImportStatus::PreExisting;
			records[i].dest_name = initial;
			return Ok(());
		}
	}

	let full = records[i].dest_dir.join(&initial);
	match probe(&full)? {
		None => {
			if !name_taken_by_earlier(records, i, &initial) {
				records[i].dest_name = initial;
				return Ok(());
			}
		}
		Some(disk_size) => {
			if is_duplicate_on_disk(records, i, &full, disk_size, cfg.checksum_duplicates) {
				records[i].status = ImportStatus::PreExisting;
				records[i].dest_name = initial;
				return Ok(());
			}
		}
	}

	for n in 1..=max_suffix {
		let candidate = format!("{base}_{n:03}{ext}");
		let full = records[i].dest_dir.join(&candidate);
		match probe(&full)? {
			None => {
				if !name_taken_by_earlier(records, i, &candidate) {
					records[i].dest_name = candidate;
					return Ok(());
				}
			}
			Some(disk_size) => {
				if is_duplicate_on_disk(records, i, &full, disk_size, cfg.checksum_duplicates) {
					records[i].status = ImportStatus::PreExisting;
					records[i].dest_name = candidate;
					return Ok(());
				}
			}
		}
	}

	warn!(
		name = %records[i].source_name,
		"no unique destination name after {max_suffix} attempts"
	);
	records[i].status = ImportStatus::Unnamable;
	Ok(())
}

/// Split `initial_name` into base and extension (with dot), normalizing
/// the extension to the file type's canonical one under
/// rename-by-date-time so mixed source spellings converge.
fn normalized_parts(record: &FileRecord, initial_name: &str, cfg: &Config) -> (String, String) {
	let (base, mut ext) = match initial_name.rfind('.') {
		Some(idx) if idx > 0 => (
			initial_name[..idx].to_string(),
			initial_name[idx..].to_string(),
		),
		_ => (initial_name.to_string(), String::new()),
	};
	if cfg.rename_by_date_time {
		if let Some(ft) = record.file_type {
			ext = format!(".{}", ft.canonical_extension());
		}
	}
	(base, ext)
}

/// Duplicate check against previously planned records sharing the (size,
/// timestamp) key. Content-only policy: with checksums disabled the key
/// match alone decides; filenames never participate.
fn is_duplicate_of_planned(
	records: &mut [FileRecord],
	i: usize,
	candidates: &[usize],
	checksum_duplicates: bool,
) -> bool {
	if candidates.is_empty() {
		return false;
	}
	if !checksum_duplicates {
		return true;
	}

	let current = match cached_checksum(records, i) {
		Ok(c) => c,
		Err(e) => {
			warn!(name = %records[i].source_name, error = %e, "checksum failed, treating as unique");
			return false;
		}
	};

	for &j in candidates {
		match cached_checksum(records, j) {
			Ok(previous) if previous == current => return true,
			Ok(_) => {}
			Err(e) => {
				warn!(name = %records[j].source_name, error = %e, "checksum failed, treating as unique");
			}
		}
	}
	false
}

/// Duplicate check against a file already on disk at the destination.
/// Size gates cheaply; checksum decides when enabled.
fn is_duplicate_on_disk(
	records: &mut [FileRecord],
	i: usize,
	dest: &Path,
	disk_size: u64,
	checksum_duplicates: bool,
) -> bool {
	if disk_size != records[i].size {
		return false;
	}
	if !checksum_duplicates {
		return true;
	}

	let src = match cached_checksum(records, i) {
		Ok(c) => c,
		Err(e) => {
			warn!(name = %records[i].source_name, error = %e, "checksum failed, treating as unique");
			return false;
		}
	};
	match checksum_file(dest) {
		Ok(dst) => src == dst,
		Err(e) => {
			warn!(path = %dest.display(), error = %e, "checksum failed, treating as unique");
			false
		}
	}
}

/// Lazily computed, cached source checksum. At most one computation per
/// record per run.
fn cached_checksum(records: &mut [FileRecord], i: usize) -> std::io::Result<String> {
	if let Some(c) = &records[i].checksum {
		return Ok(c.clone());
	}
	let c = checksum_file(&records[i].source_path())?;
	records[i].checksum = Some(c.clone());
	Ok(c)
}

/// Stat the candidate destination. `Ok(None)` means free; a stat failure
/// other than not-found propagates rather than masquerading as free.
fn probe(path: &Path) -> Result<Option<u64>, PlanError> {
	match std::fs::metadata(path) {
		Ok(meta) => Ok(Some(meta.len())),
		Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
		Err(source) => Err(PlanError::Stat {
			path: path.to_path_buf(),
			source,
		}),
	}
}

/// Whether an earlier record in this run already claimed (dest dir, name).
fn name_taken_by_earlier(records: &[FileRecord], i: usize, name: &str) -> bool {
	records[..i]
		.iter()
		.any(|r| r.dest_dir == records[i].dest_dir && r.dest_name == name)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use chrono::NaiveDate;

	use super::*;
	use crate::models::{FileType, MediaCategory};

	fn ts() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 3, 15)
			.unwrap()
			.and_hms_opt(14, 30, 0)
			.unwrap()
	}

	fn media_record(src_dir: &Path, name: &str, content: &[u8]) -> FileRecord {
		fs::write(src_dir.join(name), content).unwrap();
		let ext = extension_of(name).unwrap();
		let ft = FileType::from_extension(&ext).unwrap();
		FileRecord::new(
			src_dir,
			name,
			content.len() as u64,
			ts(),
			ft.category(),
			Some(ft),
		)
	}

	fn sidecar_record(src_dir: &Path, name: &str, content: &[u8]) -> FileRecord {
		fs::write(src_dir.join(name), content).unwrap();
		FileRecord::new(
			src_dir,
			name,
			content.len() as u64,
			ts(),
			MediaCategory::Sidecar,
			None,
		)
	}

	fn test_config(dest: &Path) -> Config {
		let mut cfg = Config::default();
		cfg.dest_dir = dest.to_path_buf();
		cfg
	}

	#[test]
	fn accepts_free_name() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[0].dest_name, "photo.jpg");
		assert_eq!(records[0].dest_dir, dest);
	}

	#[test]
	fn organize_by_date_builds_year_month_dirs() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		fs::create_dir_all(&src).unwrap();

		let mut cfg = test_config(&tmp.path().join("dest"));
		cfg.organize_by_date = true;
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(
			records[0].dest_dir,
			tmp.path().join("dest").join("2024").join("03")
		);
	}

	#[test]
	fn rename_by_date_time_normalizes_extension() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let mut cfg = test_config(&dest);
		cfg.rename_by_date_time = true;
		let mut records = vec![media_record(&src, "photo.JPEG", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].dest_name, "20240315_143000.jpg");
	}

	#[test]
	fn on_disk_collision_gets_numeric_suffix() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		// Same name, different content and size: a collision, not a dup.
		fs::write(dest.join("photo.jpg"), b"other content entirely").unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[0].dest_name, "photo_001.jpg");
	}

	#[test]
	fn same_size_on_disk_without_checksums_is_pre_existing() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		fs::write(dest.join("photo.jpg"), b"NINE BYTE").unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::PreExisting);
	}

	#[test]
	fn same_size_different_content_with_checksums_is_renamed() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		fs::write(dest.join("photo.jpg"), b"NINE BYTE").unwrap();

		let mut cfg = test_config(&dest);
		cfg.checksum_duplicates = true;
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[0].dest_name, "photo_001.jpg");
		// The source checksum was computed once and cached.
		assert!(records[0].checksum.is_some());
	}

	#[test]
	fn identical_content_with_checksums_is_pre_existing() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		fs::write(dest.join("photo.jpg"), b"jpeg data").unwrap();

		let mut cfg = test_config(&dest);
		cfg.checksum_duplicates = true;
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::PreExisting);
	}

	#[test]
	fn index_catches_in_run_duplicates_without_disk_probes() {
		let tmp = tempfile::tempdir().unwrap();
		let src_a = tmp.path().join("a");
		let src_b = tmp.path().join("b");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src_a).unwrap();
		fs::create_dir_all(&src_b).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let cfg = test_config(&dest);
		// Same size and timestamp, different directories and names.
		let mut records = vec![
			media_record(&src_a, "one.jpg", b"same data"),
			media_record(&src_b, "two.jpg", b"same data"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[1].status, ImportStatus::PreExisting);
	}

	#[test]
	fn index_duplicate_with_checksum_mismatch_is_kept() {
		let tmp = tempfile::tempdir().unwrap();
		let src_a = tmp.path().join("a");
		let src_b = tmp.path().join("b");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src_a).unwrap();
		fs::create_dir_all(&src_b).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let mut cfg = test_config(&dest);
		cfg.checksum_duplicates = true;
		// Same size + timestamp but different bytes: not duplicates.
		let mut records = vec![
			media_record(&src_a, "one.jpg", b"same size"),
			media_record(&src_b, "two.jpg", b"diff size".as_ref()),
		];
		records[1].size = records[0].size;
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[1].status, ImportStatus::Pending);
		// Both checksums were computed (and cached) for the comparison.
		assert!(records[0].checksum.is_some());
		assert!(records[1].checksum.is_some());
	}

	#[test]
	fn earlier_in_run_claim_forces_suffix() {
		let tmp = tempfile::tempdir().unwrap();
		let src_a = tmp.path().join("a");
		let src_b = tmp.path().join("b");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src_a).unwrap();
		fs::create_dir_all(&src_b).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let cfg = test_config(&dest);
		// Same destination name, different sizes: collision, not dup.
		let mut records = vec![
			media_record(&src_a, "photo.jpg", b"short"),
			media_record(&src_b, "photo.jpg", b"rather longer content"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].dest_name, "photo.jpg");
		assert_eq!(records[1].dest_name, "photo_001.jpg");
		assert_eq!(records[1].status, ImportStatus::Pending);
	}

	#[test]
	fn suffix_space_exhaustion_is_unnamable() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		// Occupy the base name and the first three suffixes with
		// different-size content so nothing counts as a duplicate.
		fs::write(dest.join("photo.jpg"), b"0").unwrap();
		for n in 1..=3 {
			fs::write(dest.join(format!("photo_{n:03}.jpg")), b"0").unwrap();
		}

		let cfg = test_config(&dest);
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];
		records[0].dest_dir = dest.clone();
		resolve_with_limit(&mut records, 0, "photo.jpg", &cfg, None, 3).unwrap();

		assert_eq!(records[0].status, ImportStatus::Unnamable);
		assert!(!dest.join("photo_004.jpg").exists());
	}

	#[test]
	fn unstatable_destination_propagates_error() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		fs::create_dir_all(&src).unwrap();
		// A regular file where a directory component is expected makes
		// every destination probe fail with ENOTDIR, not ENOENT.
		let blocker = tmp.path().join("dest");
		fs::write(&blocker, "not a directory").unwrap();

		let cfg = test_config(&blocker);
		let mut records = vec![media_record(&src, "photo.jpg", b"jpeg data")];

		let result = plan(&mut records, &cfg);
		assert!(matches!(result, Err(PlanError::Stat { .. })));
	}

	#[test]
	fn sidecar_inherits_renamed_parent_destination() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		// Force the parent into the _001 suffix.
		fs::write(dest.join("20240315_143000.jpg"), b"different bytes!!").unwrap();

		let mut cfg = test_config(&dest);
		cfg.rename_by_date_time = true;
		let mut records = vec![
			media_record(&src, "IMG_001.jpg", b"jpeg data"),
			sidecar_record(&src, "IMG_001.xmp", b"xmp data"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].dest_name, "20240315_143000_001.jpg");
		assert_eq!(records[1].dest_name, "20240315_143000_001.xmp");
		assert_eq!(records[1].dest_dir, dest);
		assert_eq!(records[1].parent, Some(0));
		assert_eq!(records[1].status, ImportStatus::Pending);
	}

	#[test]
	fn sidecar_already_at_destination_is_pre_existing() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		// Both parent and sidecar already imported.
		fs::write(dest.join("IMG_001.jpg"), b"jpeg data").unwrap();
		fs::write(dest.join("IMG_001.xmp"), b"xmp data").unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![
			media_record(&src, "IMG_001.jpg", b"jpeg data"),
			sidecar_record(&src, "IMG_001.xmp", b"xmp data"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::PreExisting);
		assert_eq!(records[1].status, ImportStatus::PreExisting);
		assert_eq!(records[1].parent, Some(0));
	}

	#[test]
	fn changed_sidecar_at_destination_stays_pending() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();
		// The on-disk sidecar differs in size from the source one.
		fs::write(dest.join("IMG_001.xmp"), b"stale and longer xmp body").unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![
			media_record(&src, "IMG_001.jpg", b"jpeg data"),
			sidecar_record(&src, "IMG_001.xmp", b"xmp data"),
		];
		plan(&mut records, &cfg).unwrap();

		// The name is bound to the parent, so the sidecar is re-copied
		// over the stale file rather than disambiguated.
		assert_eq!(records[1].status, ImportStatus::Pending);
		assert_eq!(records[1].dest_name, "IMG_001.xmp");
	}

	#[test]
	fn sidecar_parent_match_is_case_insensitive() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let cfg = test_config(&dest);
		let mut records = vec![
			media_record(&src, "IMG_001.JPG", b"jpeg data"),
			sidecar_record(&src, "img_001.xmp", b"xmp data"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[1].parent, Some(0));
		assert_eq!(records[1].dest_name, "IMG_001.xmp");
	}

	#[test]
	fn sidecar_actions_mark_statuses() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let mut cfg = test_config(&dest);
		cfg.sidecars
			.insert("log".to_string(), SidecarAction::Ignore);
		let mut records = vec![
			media_record(&src, "VID_001.mp4", b"video data"),
			sidecar_record(&src, "VID_001.thm", b"thumb data"),
			sidecar_record(&src, "VID_001.log", b"log data"),
		];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[1].status, ImportStatus::SidecarDelete);
		assert_eq!(records[2].status, ImportStatus::SidecarIgnored);
		assert!(records[1].dest_name.is_empty());
	}

	#[test]
	fn orphan_sidecar_plans_independently() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("src");
		let dest = tmp.path().join("dest");
		fs::create_dir_all(&src).unwrap();
		fs::create_dir_all(&dest).unwrap();

		let mut cfg = test_config(&dest);
		cfg.organize_by_date = true;
		let mut records = vec![sidecar_record(&src, "IMG_001.xmp", b"xmp data")];
		plan(&mut records, &cfg).unwrap();

		assert_eq!(records[0].status, ImportStatus::Pending);
		assert_eq!(records[0].parent, None);
		assert_eq!(records[0].dest_name, "IMG_001.xmp");
		assert_eq!(records[0].dest_dir, dest.join("2024").join("03"));
	}
}
