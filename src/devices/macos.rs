//! Removable-volume ejection via `diskutil`.
//!
//! Only meaningful on macOS; elsewhere the request is logged and
//! skipped. Ejection is fire-and-forget: a failure never changes the
//! import's outcome, since every file is already safely copied by the
//! time this runs.

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

/// Ask the OS to eject the volume holding `source_dir`. `diskutil`
/// resolves the mount point from any path inside the volume.
pub fn eject(source_dir: &Path) {
	if !cfg!(target_os = "macos") {
		info!("auto-eject requested but not on macOS, skipping");
		return;
	}

	match eject_command(source_dir).output() {
		Ok(output) if output.status.success() => {
			info!(path = %source_dir.display(), "ejected volume");
		}
		Ok(output) => {
			let stderr = String::from_utf8_lossy(&output.stderr);
			warn!(
				path = %source_dir.display(),
				error = %stderr.trim(),
				"diskutil eject failed"
			);
		}
		Err(e) => {
			warn!(path = %source_dir.display(), error = %e, "cannot run diskutil");
		}
	}
}

fn eject_command(source_dir: &Path) -> Command {
	let mut cmd = Command::new("diskutil");
	cmd.arg("eject").arg(source_dir);
	cmd
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn eject_command_targets_the_source_path() {
		let cmd = eject_command(Path::new("/Volumes/CARD"));
		assert_eq!(cmd.get_program(), "diskutil");
		let args: Vec<_> = cmd.get_args().collect();
		assert_eq!(args, ["eject", "/Volumes/CARD"]);
	}
}
