//! Single-file copy execution.
//!
//! Chunked read/write with error classification and a byte-count check
//! against the size recorded at enumeration time. Durability: the
//! destination is fsynced before close so close-time write errors
//! surface here instead of being swallowed.

use std::{
	fs,
	io::{self, Read, Write},
	path::Path,
};

use thiserror::Error;

const CHUNK_SIZE: usize = 256 * 1024; // 256KB

#[derive(Debug, Error)]
pub enum CopyError {
	#[error("source file not found: {0}")]
	SourceNotFound(String),

	#[error("permission denied: {0}")]
	PermissionDenied(String),

	#[error("disk full: {0}")]
	DiskFull(String),

	#[error("I/O error: {0}")]
	Io(String),

	#[error("size mismatch: expected {expected} bytes, copied {copied}")]
	SizeMismatch { expected: u64, copied: u64 },
}

/// Copy `source` to `dest`, returning the number of bytes written.
///
/// The file is re-statted at copy time; a source that changed size since
/// enumeration is reported as [`CopyError::SizeMismatch`].
///
/// Close errors: `File` cannot report them on drop, so `sync_all` is the
/// close check here. It flushes data and metadata to stable storage and
/// surfaces any delayed write-back failure; a close error after a clean
/// fsync carries no information about the written bytes.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64, CopyError> {
	let mut src = fs::File::open(source).map_err(|e| map_io_error(e, source))?;
	let expected = src
		.metadata()
		.map_err(|e| map_io_error(e, source))?
		.len();

	let mut dst = fs::File::create(dest).map_err(|e| map_io_error(e, dest))?;

	let mut buf = vec![0u8; CHUNK_SIZE];
	let mut copied: u64 = 0;

	loop {
		let n = src.read(&mut buf).map_err(|e| map_io_error(e, source))?;
		if n == 0 {
			break;
		}
		dst.write_all(&buf[..n]).map_err(|e| map_io_error(e, dest))?;
		copied += n as u64;
	}

	if copied != expected {
		return Err(CopyError::SizeMismatch { expected, copied });
	}

	// Durability barrier doubling as the close-error check; see above.
	dst.sync_all().map_err(|e| map_io_error(e, dest))?;
	drop(dst);

	Ok(copied)
}

fn map_io_error(err: io::Error, path: &Path) -> CopyError {
	let path = path.display().to_string();
	match err.kind() {
		io::ErrorKind::NotFound => CopyError::SourceNotFound(path),
		io::ErrorKind::PermissionDenied => CopyError::PermissionDenied(path),
		io::ErrorKind::StorageFull => CopyError::DiskFull(path),
		_ => CopyError::Io(format!("{path}: {err}")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn copies_small_file() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("source.txt");
		let dst = tmp.path().join("dest.txt");
		fs::write(&src, "hello world").unwrap();

		let copied = copy_file(&src, &dst).unwrap();
		assert_eq!(copied, 11);
		assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
	}

	#[test]
	fn copies_empty_file() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("empty");
		let dst = tmp.path().join("empty_copy");
		fs::write(&src, "").unwrap();

		assert_eq!(copy_file(&src, &dst).unwrap(), 0);
		assert!(dst.exists());
	}

	#[test]
	fn copies_multichunk_file() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("big.bin");
		let dst = tmp.path().join("big_copy.bin");
		let data = vec![42u8; CHUNK_SIZE * 3 + 1000];
		fs::write(&src, &data).unwrap();

		let copied = copy_file(&src, &dst).unwrap();
		assert_eq!(copied, data.len() as u64);
		assert_eq!(fs::read(&dst).unwrap(), data);
	}

	#[test]
	fn missing_source_is_classified() {
		let tmp = tempfile::tempdir().unwrap();
		let err = copy_file(
			Path::new("/tmp/mediaimport_definitely_not_real"),
			&tmp.path().join("out"),
		)
		.unwrap_err();
		assert!(matches!(err, CopyError::SourceNotFound(_)));
	}

	#[test]
	fn overwrites_existing_dest() {
		let tmp = tempfile::tempdir().unwrap();
		let src = tmp.path().join("source.txt");
		let dst = tmp.path().join("dest.txt");
		fs::write(&src, "new content").unwrap();
		fs::write(&dst, "old and considerably longer content").unwrap();

		copy_file(&src, &dst).unwrap();
		assert_eq!(fs::read_to_string(&dst).unwrap(), "new content");
	}
}
