//! Per-file import state.
//!
//! One record per enumerated source file, mutated in place by the planner
//! and the copy phase. The basis for dedup, sidecar linkage and the final
//! run summary.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::media_types::{FileType, MediaCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
	// Identity, immutable after enumeration.
	pub source_dir: PathBuf,
	pub source_name: String,
	pub size: u64,
	pub created: NaiveDateTime,
	pub category: MediaCategory,
	/// None for sidecars.
	pub file_type: Option<FileType>,

	// Planning output.
	pub dest_dir: PathBuf,
	pub dest_name: String,
	/// Lazily computed source checksum; at most one computation per run.
	pub checksum: Option<String>,
	/// Index of the resolved parent record, sidecars only.
	pub parent: Option<usize>,
	pub status: ImportStatus,
}

impl FileRecord {
	pub fn new(
		source_dir: &Path,
		source_name: &str,
		size: u64,
		created: NaiveDateTime,
		category: MediaCategory,
		file_type: Option<FileType>,
	) -> Self {
		FileRecord {
			source_dir: source_dir.to_path_buf(),
			source_name: source_name.to_string(),
			size,
			created,
			category,
			file_type,
			dest_dir: PathBuf::new(),
			dest_name: String::new(),
			checksum: None,
			parent: None,
			status: ImportStatus::Pending,
		}
	}

	pub fn source_path(&self) -> PathBuf {
		self.source_dir.join(&self.source_name)
	}

	pub fn dest_path(&self) -> PathBuf {
		self.dest_dir.join(&self.dest_name)
	}

	/// Lowercased base name (without extension) of the source file, the
	/// key sidecars use to find their parent.
	pub fn base_name_key(&self) -> String {
		match self.source_name.rfind('.') {
			Some(0) | None => self.source_name.to_ascii_lowercase(),
			Some(idx) => self.source_name[..idx].to_ascii_lowercase(),
		}
	}

	pub fn is_sidecar(&self) -> bool {
		self.category == MediaCategory::Sidecar
	}
}

/// Terminal per-record outcome. Every consumption site (copy phase,
/// deletion phase, summary) matches exhaustively so a new status cannot
/// silently fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportStatus {
	/// Planned but not yet copied. The only non-terminal status; dry runs
	/// leave work-list records here on purpose.
	Pending,
	Copied,
	PreExisting,
	Failed,
	Unnamable,
	DirCreateFailed,
	/// Sidecar marked for deletion from the source; never copied.
	SidecarDelete,
	/// Sidecar dropped from further processing; neither copied nor deleted.
	SidecarIgnored,
}

impl fmt::Display for ImportStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ImportStatus::Pending => "pending",
			ImportStatus::Copied => "copied",
			ImportStatus::PreExisting => "pre-existing",
			ImportStatus::Failed => "failed",
			ImportStatus::Unnamable => "unnamable",
			ImportStatus::DirCreateFailed => "dir-create-failed",
			ImportStatus::SidecarDelete => "sidecar-deleted",
			ImportStatus::SidecarIgnored => "sidecar-ignored",
		};
		f.write_str(s)
	}
}
