//! Concurrent copy phase.
//!
//! Pending records are ordered so large and small files interleave, then
//! handed to a fixed pool of worker threads over a pre-filled channel.
//! Workers never touch record state; they report (index, outcome) back
//! to the coordinator, which applies status transitions in completion
//! order. Every job runs even after a failure; the first error observed
//! is returned once the pool drains.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, TimeZone};
use crossbeam_channel::unbounded;
use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::copier::{self, CopyError};
use crate::models::{FileRecord, ImportStatus};
use crate::util::{human_duration, human_size};

const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Error)]
pub enum TransferError {
	#[error("cannot create directory {path}: {source}")]
	DirCreate { path: PathBuf, source: io::Error },

	#[error("cannot copy {source_path} to {dest_path}: {source}")]
	Copy {
		source_path: PathBuf,
		dest_path: PathBuf,
		source: CopyError,
	},
}

enum Outcome {
	Copied(u64),
	DirCreateFailed(TransferError),
	CopyFailed(TransferError),
}

/// Copy every record still marked pending. Statuses move to `Copied`,
/// `Failed` or `DirCreateFailed`; in dry-run mode nothing moves at all.
pub fn copy_pending(records: &mut [FileRecord], cfg: &Config) -> Result<(), TransferError> {
	let work = work_order(records);
	if work.is_empty() {
		info!("nothing to copy");
		return Ok(());
	}

	let total_bytes: u64 = work.iter().map(|&i| records[i].size).sum();

	if cfg.dry_run {
		for &i in &work {
			info!(
				"would copy {} to {}",
				records[i].source_path().display(),
				records[i].dest_path().display()
			);
		}
		info!(
			"dry run: {} files, {} total",
			work.len(),
			human_size(total_bytes)
		);
		return Ok(());
	}

	let workers = effective_workers(cfg.workers);
	let mut progress = Progress::new(total_bytes, work.len() as u64, cfg.verbose);

	let (job_tx, job_rx) = unbounded::<usize>();
	let (result_tx, result_rx) = unbounded::<(usize, Outcome)>();
	for &i in &work {
		// Cannot fail: the receiver outlives the scope below.
		let _ = job_tx.send(i);
	}
	drop(job_tx);

	let mut results: Vec<(usize, Outcome)> = Vec::with_capacity(work.len());

	std::thread::scope(|scope| {
		let shared: &[FileRecord] = records;
		for _ in 0..workers {
			let job_rx = job_rx.clone();
			let result_tx = result_tx.clone();
			scope.spawn(move || {
				for i in job_rx {
					let outcome = transfer(&shared[i]);
					if result_tx.send((i, outcome)).is_err() {
						return;
					}
				}
			});
		}
		drop(result_tx);

		for (i, outcome) in result_rx {
			progress.file_done(&shared[i], &outcome);
			results.push((i, outcome));
		}
	});

	progress.finish();

	let mut first_error = None;
	for (i, outcome) in results {
		match outcome {
			Outcome::Copied(_) => records[i].status = ImportStatus::Copied,
			Outcome::DirCreateFailed(e) => {
				records[i].status = ImportStatus::DirCreateFailed;
				first_error.get_or_insert(e);
			}
			Outcome::CopyFailed(e) => {
				records[i].status = ImportStatus::Failed;
				first_error.get_or_insert(e);
			}
		}
	}

	match first_error {
		Some(e) => Err(e),
		None => Ok(()),
	}
}

/// One worker job: make the destination directory, copy, restore the
/// creation timestamp. A failed copy leaves no partial destination.
fn transfer(record: &FileRecord) -> Outcome {
	if let Err(source) = std::fs::create_dir_all(&record.dest_dir) {
		return Outcome::DirCreateFailed(TransferError::DirCreate {
			path: record.dest_dir.clone(),
			source,
		});
	}

	let source_path = record.source_path();
	let dest_path = record.dest_path();
	match copier::copy_file(&source_path, &dest_path) {
		Ok(bytes) => {
			restore_mtime(record);
			Outcome::Copied(bytes)
		}
		Err(source) => {
			if let Err(e) = std::fs::remove_file(&dest_path) {
				if e.kind() != io::ErrorKind::NotFound {
					warn!(path = %dest_path.display(), error = %e, "cannot remove partial copy");
				}
			}
			Outcome::CopyFailed(TransferError::Copy {
				source_path,
				dest_path,
				source,
			})
		}
	}
}

/// Best-effort: stamp the destination with the record's creation time so
/// date-based tools downstream see the capture date, not the import date.
fn restore_mtime(record: &FileRecord) {
	let Some(local) = Local.from_local_datetime(&record.created).single() else {
		return;
	};
	let mtime = FileTime::from_system_time(local.into());
	if let Err(e) = filetime::set_file_mtime(record.dest_path(), mtime) {
		warn!(path = %record.dest_path().display(), error = %e, "cannot set modification time");
	}
}

/// Indices of pending records, largest first, then interleaved so the
/// queue alternates between the biggest and smallest remaining files.
/// Workers pulling adjacent jobs then tend to mix long and short copies
/// instead of all hitting the large files at once.
fn work_order(records: &[FileRecord]) -> Vec<usize> {
	let mut pending: Vec<usize> = records
		.iter()
		.enumerate()
		.filter(|(_, r)| r.status == ImportStatus::Pending)
		.map(|(i, _)| i)
		.collect();
	pending.sort_by(|&a, &b| {
		records[b]
			.size
			.cmp(&records[a].size)
			.then_with(|| a.cmp(&b))
	});
	interleave(pending)
}

fn interleave(sorted: Vec<usize>) -> Vec<usize> {
	let mut out = Vec::with_capacity(sorted.len());
	let mut front = 0usize;
	let mut back = sorted.len();
	let mut take_front = true;
	while front < back {
		if take_front {
			out.push(sorted[front]);
			front += 1;
		} else {
			back -= 1;
			out.push(sorted[back]);
		}
		take_front = !take_front;
	}
	out
}

/// Zero means "pick for me". Negative counts are rejected during config
/// validation before this is ever reached.
pub fn effective_workers(configured: i64) -> usize {
	if configured <= 0 {
		DEFAULT_WORKERS
	} else {
		configured as usize
	}
}

/// Copy-phase progress reporting, active only in verbose mode: a sticky
/// bar plus per-file lines on a terminal, append-only lines otherwise.
struct Progress {
	bar: Option<ProgressBar>,
	total_bytes: u64,
	total_files: u64,
	done_bytes: u64,
	done_files: u64,
	started: Instant,
	verbose: bool,
}

impl Progress {
	fn new(total_bytes: u64, total_files: u64, verbose: bool) -> Self {
		let bar = if verbose && console::Term::stdout().is_term() {
			let bar = ProgressBar::with_draw_target(
				Some(total_bytes),
				indicatif::ProgressDrawTarget::stdout(),
			);
			bar.set_style(
				ProgressStyle::with_template(
					"{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta} remaining)",
				)
				.unwrap_or_else(|_| ProgressStyle::default_bar()),
			);
			Some(bar)
		} else {
			None
		};
		Progress {
			bar,
			total_bytes,
			total_files,
			done_bytes: 0,
			done_files: 0,
			started: Instant::now(),
			verbose,
		}
	}

	fn file_done(&mut self, record: &FileRecord, outcome: &Outcome) {
		self.done_files += 1;
		if let Outcome::Copied(bytes) = outcome {
			self.done_bytes += bytes;
		}
		if !self.verbose {
			return;
		}

		let line = match outcome {
			Outcome::Copied(bytes) => format!(
				"copied {} ({})",
				record.dest_path().display(),
				human_size(*bytes)
			),
			Outcome::DirCreateFailed(e) | Outcome::CopyFailed(e) => {
				format!("failed {}: {e}", record.source_path().display())
			}
		};
		match &self.bar {
			Some(bar) => {
				bar.println(line);
				bar.set_position(self.done_bytes);
			}
			None => {
				println!("{line}");
				println!("{}", self.plain_line());
			}
		}
	}

	fn plain_line(&self) -> String {
		let percent = if self.total_bytes == 0 {
			100
		} else {
			self.done_bytes * 100 / self.total_bytes
		};
		let elapsed = self.started.elapsed().as_secs_f64();
		let rate = if elapsed > 0.0 {
			self.done_bytes as f64 / elapsed
		} else {
			0.0
		};
		let remaining = if rate > 0.0 && self.done_bytes < self.total_bytes {
			let secs = (self.total_bytes - self.done_bytes) as f64 / rate;
			human_duration(std::time::Duration::from_secs(secs as u64))
		} else {
			"0s".to_string()
		};
		format!(
			"{percent}% ({}/{}) files {}/{} {}/s, {remaining} remaining",
			human_size(self.done_bytes),
			human_size(self.total_bytes),
			self.done_files,
			self.total_files,
			human_size(rate as u64),
		)
	}

	fn finish(&self) {
		if let Some(bar) = &self.bar {
			bar.finish_and_clear();
		}
	}
}
