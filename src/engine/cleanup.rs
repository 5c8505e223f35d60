//! Post-copy source cleanup.
//!
//! Two kinds of deletions, both best-effort: originals whose content is
//! safely at the destination (only when the user asked for it), and
//! sidecars planned for deletion (always, once the cleanup step runs).
//! Failures are warnings; cleanup never fails an import that copied.

use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{FileRecord, ImportStatus};

/// Number of source files deleted.
pub fn delete_originals(records: &[FileRecord], cfg: &Config) -> u64 {
	let mut deleted = 0;
	for record in records {
		let eligible = match record.status {
			// Content exists at the destination.
			ImportStatus::Copied | ImportStatus::PreExisting => cfg.delete_originals,
			// Planned for deletion regardless of the originals setting.
			ImportStatus::SidecarDelete => true,
			ImportStatus::Pending
			| ImportStatus::Failed
			| ImportStatus::Unnamable
			| ImportStatus::DirCreateFailed
			| ImportStatus::SidecarIgnored => false,
		};
		if !eligible {
			continue;
		}

		let path = record.source_path();
		match std::fs::remove_file(&path) {
			Ok(()) => {
				debug!(path = %path.display(), "deleted original");
				deleted += 1;
			}
			Err(e) => {
				warn!(path = %path.display(), error = %e, "cannot delete original");
			}
		}
	}
	deleted
}
