//! Chunked CRC32 file checksums.
//!
//! CRC32-IEEE rendered as 8 lowercase hex digits. Not cryptographic; the
//! duplicate check only needs a cheap content tiebreaker after (size,
//! timestamp) already matched.

use std::fs;
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 256 * 1024; // 256KB

pub fn checksum_file(path: &Path) -> std::io::Result<String> {
	let mut file = fs::File::open(path)?;
	let mut hasher = crc32fast::Hasher::new();
	let mut buf = vec![0u8; CHUNK_SIZE];

	loop {
		let n = file.read(&mut buf)?;
		if n == 0 {
			break;
		}
		hasher.update(&buf[..n]);
	}

	Ok(format!("{:08x}", hasher.finalize()))
}
