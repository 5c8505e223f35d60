//! The import pipeline.
//!
//! Strict phase ordering: enumerate the source, plan every destination
//! (single-threaded), copy concurrently, then clean up originals and
//! optionally eject. Planning finishes completely before the first byte
//! is copied, so destination names never race.

pub mod checksum;
pub mod cleanup;
pub mod copier;
pub mod metadata;
pub mod planner;
pub mod scanner;
pub mod scheduler;

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::devices;
use crate::models::{FileRecord, ImportStatus};
use crate::util::human_size;

#[derive(Debug, Error)]
pub enum ImportError {
	#[error(transparent)]
	Scan(#[from] scanner::ScanError),

	#[error(transparent)]
	Plan(#[from] planner::PlanError),

	#[error(transparent)]
	Transfer(#[from] scheduler::TransferError),
}

/// Per-run outcome counts, reported at the end of every import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
	pub copied: u64,
	pub copied_bytes: u64,
	pub pre_existing: u64,
	pub failed: u64,
	pub unnamable: u64,
	pub sidecars_deleted: u64,
	pub sidecars_ignored: u64,
	pub originals_deleted: u64,
}

impl ImportSummary {
	fn from_records(records: &[FileRecord], originals_deleted: u64) -> Self {
		let mut summary = ImportSummary {
			originals_deleted,
			..ImportSummary::default()
		};
		for record in records {
			match record.status {
				ImportStatus::Copied => {
					summary.copied += 1;
					summary.copied_bytes += record.size;
				}
				ImportStatus::PreExisting => summary.pre_existing += 1,
				ImportStatus::Failed | ImportStatus::DirCreateFailed => summary.failed += 1,
				ImportStatus::Unnamable => summary.unnamable += 1,
				ImportStatus::SidecarDelete => summary.sidecars_deleted += 1,
				ImportStatus::SidecarIgnored => summary.sidecars_ignored += 1,
				ImportStatus::Pending => {}
			}
		}
		summary
	}
}

/// Run one full import. The copy-phase error, if any, is returned only
/// after cleanup has had its chance; ejection is skipped when anything
/// failed to copy.
pub fn run(cfg: &Config) -> Result<ImportSummary, ImportError> {
	let mut records = scanner::enumerate(cfg)?;
	info!(files = records.len(), "enumerated source");

	planner::plan(&mut records, cfg)?;

	let copy_result = scheduler::copy_pending(&mut records, cfg);

	let originals_deleted = if cfg.dry_run {
		0
	} else {
		cleanup::delete_originals(&records, cfg)
	};

	let summary = ImportSummary::from_records(&records, originals_deleted);
	info!(
		copied = summary.copied,
		bytes = %human_size(summary.copied_bytes),
		pre_existing = summary.pre_existing,
		failed = summary.failed + summary.unnamable,
		"import finished"
	);

	if cfg.auto_eject && !cfg.dry_run && copy_result.is_ok() {
		devices::macos::eject(&cfg.source_dir);
	}

	copy_result?;
	Ok(summary)
}
