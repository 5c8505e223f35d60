//! Sidecar companion files and what to do with them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What the import does with a sidecar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SidecarAction {
	/// Leave it on the source, never copy, never delete.
	Ignore,
	/// Copy it next to its parent (or independently if orphaned).
	Copy,
	/// Mark it for deletion from the source; never copy.
	Delete,
}

/// Built-in action table. Product data, not derived: editing metadata and
/// subtitles travel with their parent, thumbnails/catalogs/logs are
/// regenerable junk. Any entry can be overridden from configuration.
pub fn builtin_action(ext: &str) -> Option<SidecarAction> {
	match ext {
		"xmp" | "srt" => Some(SidecarAction::Copy),
		"thm" | "ctg" | "log" => Some(SidecarAction::Delete),
		_ => None,
	}
}

/// Whether `ext` (lowercase, no dot) is treated as a sidecar extension
/// under the given override map.
pub fn is_sidecar_extension(ext: &str, overrides: &HashMap<String, SidecarAction>) -> bool {
	builtin_action(ext).is_some() || overrides.contains_key(ext)
}

/// Action precedence: per-extension override > built-in default > global default.
pub fn resolve_action(
	ext: &str,
	overrides: &HashMap<String, SidecarAction>,
	default: SidecarAction,
) -> SidecarAction {
	if let Some(action) = overrides.get(ext) {
		return *action;
	}
	builtin_action(ext).unwrap_or(default)
}
