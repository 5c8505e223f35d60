pub mod file_record;
pub mod media_types;
pub mod sidecar;

pub use file_record::{FileRecord, ImportStatus};
pub use media_types::{extension_of, FileType, MediaCategory};
pub use sidecar::SidecarAction;
