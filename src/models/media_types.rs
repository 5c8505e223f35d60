//! Extension-based media classification.
//!
//! Every supported source extension maps to exactly one [`FileType`], and
//! every file type to one [`MediaCategory`] and one canonical output
//! extension. Classification is case-insensitive on the source side.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
	Jpeg,
	Jpeg2000,
	JpegXl,
	Png,
	Gif,
	Bmp,
	Tiff,
	Psd,
	Eps,
	Svg,
	Ico,
	Webp,
	Heif,
	Raw,
	Mp4,
	Avi,
	Mov,
	Wmv,
	Flv,
	Mkv,
	Webm,
	Ogv,
	M4v,
	ThreeGp,
	ThreeG2,
	Asf,
	Vob,
	Mts,
	RawVideo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
	ProcessedPicture,
	RawPicture,
	Video,
	RawVideo,
	Sidecar,
}

impl FileType {
	pub fn category(self) -> MediaCategory {
		use FileType::*;
		match self {
			Jpeg | Jpeg2000 | JpegXl | Png | Gif | Bmp | Tiff | Psd | Eps | Svg | Ico | Webp
			| Heif => MediaCategory::ProcessedPicture,
			Raw => MediaCategory::RawPicture,
			Mp4 | Avi | Mov | Wmv | Flv | Mkv | Webm | Ogv | M4v | ThreeGp | ThreeG2 | Asf
			| Vob | Mts => MediaCategory::Video,
			RawVideo => MediaCategory::RawVideo,
		}
	}

	/// The canonical destination extension for this type, used when
	/// rename-by-date-time normalizes mixed source spellings (jpe, jif, …).
	pub fn canonical_extension(self) -> &'static str {
		use FileType::*;
		match self {
			Jpeg => "jpg",
			Jpeg2000 => "jp2",
			JpegXl => "jxl",
			Png => "png",
			Gif => "gif",
			Bmp => "bmp",
			Tiff => "tiff",
			Psd => "psd",
			Eps => "eps",
			Svg => "svg",
			Ico => "ico",
			Webp => "webp",
			Heif => "heif",
			Raw => "raw",
			Mp4 => "mp4",
			Avi => "avi",
			Mov => "mov",
			Wmv => "wmv",
			Flv => "flv",
			Mkv => "mkv",
			Webm => "webm",
			Ogv => "ogv",
			M4v => "m4v",
			ThreeGp => "3gp",
			ThreeG2 => "3g2",
			Asf => "asf",
			Vob => "vob",
			Mts => "mts",
			RawVideo => "braw",
		}
	}

	pub fn from_extension(ext: &str) -> Option<FileType> {
		use FileType::*;
		let ft = match ext {
			"jpg" | "jpeg" | "jpe" | "jif" | "jfif" | "jfi" => Jpeg,
			"jp2" | "j2k" | "jpf" | "jpm" | "jpg2" | "j2c" | "jpc" | "jpx" | "mj2" => Jpeg2000,
			"jxl" => JpegXl,
			"png" => Png,
			"gif" => Gif,
			"bmp" => Bmp,
			"tiff" | "tif" => Tiff,
			"psd" => Psd,
			"eps" => Eps,
			"svg" => Svg,
			"ico" => Ico,
			"webp" => Webp,
			"heif" | "heifs" | "heic" | "heics" | "avci" | "avcs" | "hif" => Heif,
			"arw" | "cr2" | "cr3" | "crw" | "dng" | "erf" | "kdc" | "mrw" | "nef" | "orf"
			| "pef" | "raf" | "raw" | "rw2" | "sr2" | "srf" | "x3f" => Raw,
			"mp4" => Mp4,
			"avi" => Avi,
			"mov" => Mov,
			"wmv" => Wmv,
			"flv" => Flv,
			"mkv" => Mkv,
			"webm" => Webm,
			"ogv" => Ogv,
			"m4v" => M4v,
			"3gp" => ThreeGp,
			"3g2" => ThreeG2,
			"asf" => Asf,
			"vob" => Vob,
			"mts" | "m2ts" => Mts,
			"braw" | "r3d" | "ari" => RawVideo,
			_ => return None,
		};
		Some(ft)
	}
}

/// Lowercased extension of a filename, without the dot.
///
/// Unlike `Path::extension`, a leading-dot-only name like `.jpg` yields
/// `jpg`: camera card trees occasionally carry such names and the original
/// tool classified them by that extension.
pub fn extension_of(name: &str) -> Option<String> {
	let idx = name.rfind('.')?;
	let ext = &name[idx + 1..];
	if ext.is_empty() {
		return None;
	}
	Some(ext.to_ascii_lowercase())
}
