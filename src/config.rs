//! Resolved run configuration.
//!
//! Three layers, later wins: built-in defaults, the YAML config file
//! (`~/.mediaimportrc` unless overridden), then command-line options that
//! were actually provided. The engine only ever sees the merged result.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cli::Cli;
use crate::models::SidecarAction;

pub const DEFAULT_CONFIG_FILE: &str = ".mediaimportrc";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	ReadFile {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}: {source}")]
	ParseFile {
		path: PathBuf,
		source: serde_yaml::Error,
	},

	#[error("source directory is not specified")]
	MissingSource,

	#[error("destination directory is not specified")]
	MissingDest,

	#[error("source directory does not exist: {0}")]
	SourceNotFound(PathBuf),

	#[error("destination parent directory does not exist: {0}")]
	DestParentNotFound(PathBuf),

	#[error("worker count must not be negative, got {0}")]
	NegativeWorkers(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub source_dir: PathBuf,
	pub dest_dir: PathBuf,
	#[serde(skip)]
	pub config_file: PathBuf,
	pub organize_by_date: bool,
	pub rename_by_date_time: bool,
	pub checksum_duplicates: bool,
	pub verbose: bool,
	pub dry_run: bool,
	pub skip_thumbnails: bool,
	pub delete_originals: bool,
	pub auto_eject: bool,
	pub sidecar_default: SidecarAction,
	pub sidecars: HashMap<String, SidecarAction>,
	pub workers: i64,
}

impl Default for Config {
	fn default() -> Self {
		let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
		Config {
			source_dir: PathBuf::new(),
			dest_dir: home.join("Pictures"),
			config_file: home.join(DEFAULT_CONFIG_FILE),
			organize_by_date: false,
			rename_by_date_time: false,
			checksum_duplicates: false,
			verbose: false,
			dry_run: false,
			skip_thumbnails: false,
			delete_originals: false,
			auto_eject: false,
			sidecar_default: SidecarAction::Delete,
			sidecars: HashMap::new(),
			workers: 0,
		}
	}
}

impl Config {
	/// Defaults, then config file, then CLI. Does not validate.
	pub fn resolve(cli: &Cli) -> Result<Config, ConfigError> {
		let mut cfg = Config::default();
		if let Some(path) = &cli.config_file {
			cfg.config_file = path.clone();
		}
		cfg.load_file()?;
		cfg.apply_cli(cli);
		Ok(cfg)
	}

	/// Merge the YAML config file into `self`. A missing file is fine;
	/// an unreadable or unparsable one is not.
	fn load_file(&mut self) -> Result<(), ConfigError> {
		let path = self.config_file.clone();
		let data = match std::fs::read_to_string(&path) {
			Ok(data) => data,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!(path = %path.display(), "no config file, using defaults");
				return Ok(());
			}
			Err(source) => return Err(ConfigError::ReadFile { path, source }),
		};

		let file_cfg: Config =
			serde_yaml::from_str(&data).map_err(|source| ConfigError::ParseFile {
				path: path.clone(),
				source,
			})?;

		let defaults = Config::default();
		// Only fields the file actually changes away from the defaults are
		// meaningful here; copying everything is equivalent because the
		// file layer was itself deserialized on top of the defaults.
		let config_file = std::mem::take(&mut self.config_file);
		*self = file_cfg;
		self.config_file = config_file;
		if self.dest_dir.as_os_str().is_empty() {
			self.dest_dir = defaults.dest_dir;
		}
		Ok(())
	}

	/// Apply command-line overrides. Only options actually provided on the
	/// command line replace config-file values.
	fn apply_cli(&mut self, cli: &Cli) {
		if let Some(dir) = &cli.source_dir {
			self.source_dir = dir.clone();
		}
		if let Some(dir) = &cli.dest_dir {
			self.dest_dir = dir.clone();
		}
		if let Some(v) = cli.organize_by_date {
			self.organize_by_date = v;
		}
		if let Some(v) = cli.rename_by_date_time {
			self.rename_by_date_time = v;
		}
		if let Some(v) = cli.checksum_duplicates {
			self.checksum_duplicates = v;
		}
		if let Some(v) = cli.verbose {
			self.verbose = v;
		}
		if let Some(v) = cli.dry_run {
			self.dry_run = v;
		}
		if let Some(v) = cli.skip_thumbnails {
			self.skip_thumbnails = v;
		}
		if let Some(v) = cli.delete_originals {
			self.delete_originals = v;
		}
		if let Some(v) = cli.auto_eject {
			self.auto_eject = v;
		}
		if let Some(v) = cli.sidecar_default {
			self.sidecar_default = v;
		}
		if let Some(v) = cli.workers {
			self.workers = v;
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.source_dir.as_os_str().is_empty() {
			return Err(ConfigError::MissingSource);
		}
		if self.dest_dir.as_os_str().is_empty() {
			return Err(ConfigError::MissingDest);
		}
		if !self.source_dir.exists() {
			return Err(ConfigError::SourceNotFound(self.source_dir.clone()));
		}
		let dest_parent = self
			.dest_dir
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_else(|| self.dest_dir.clone());
		if !dest_parent.as_os_str().is_empty() && !dest_parent.exists() {
			return Err(ConfigError::DestParentNotFound(dest_parent));
		}
		if self.workers < 0 {
			return Err(ConfigError::NegativeWorkers(self.workers));
		}
		Ok(())
	}
}
