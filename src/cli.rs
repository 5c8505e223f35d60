//! Command-line surface.
//!
//! Every toggle is an optional `--flag[=bool]` so the config layer can tell
//! "not given" apart from "explicitly disabled": a CLI option only
//! overrides the config file when it was actually provided.

use std::path::PathBuf;

use clap::Parser;

use crate::models::SidecarAction;

#[derive(Debug, Parser)]
#[command(
	name = "mediaimport",
	version,
	about = "Import media files from removable storage into an organized library"
)]
pub struct Cli {
	/// Source directory to import from
	pub source_dir: Option<PathBuf>,

	/// Destination directory for imported media
	#[arg(long = "dest", value_name = "DIR")]
	pub dest_dir: Option<PathBuf>,

	/// Path to the YAML config file
	#[arg(long = "config", value_name = "FILE")]
	pub config_file: Option<PathBuf>,

	/// Organize destination files into YYYY/MM directories
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub organize_by_date: Option<bool>,

	/// Rename files to their creation date and time
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub rename_by_date_time: Option<bool>,

	/// Compare checksums when deciding whether a file is a duplicate
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub checksum_duplicates: Option<bool>,

	/// Print per-file progress while copying
	#[arg(short, long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub verbose: Option<bool>,

	/// Plan the import but copy nothing
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub dry_run: Option<bool>,

	/// Skip thumbnail directories (paths containing THMBNL)
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub skip_thumbnails: Option<bool>,

	/// Delete original files after a successful import
	#[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub delete_originals: Option<bool>,

	/// Eject the source volume after a clean import (macOS)
	#[arg(long = "auto-eject", num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
	pub auto_eject: Option<bool>,

	/// Default action for sidecar extensions without an override
	#[arg(long, value_enum, value_name = "ACTION")]
	pub sidecar_default: Option<SidecarAction>,

	/// Number of concurrent copy workers (0 = default)
	#[arg(long, value_name = "N")]
	pub workers: Option<i64>,
}
