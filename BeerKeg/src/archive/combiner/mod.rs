//! "ALPHA-HELIX COMBINER" archive format reader
//!
//! The archive is a fixed header followed by a flat directory table of
//! 24-byte records. Each record points at its payload by absolute offset;
//! payloads may sit anywhere in the file, in any order.

mod reader;
mod types;

pub use reader::ArchiveReader;
pub use types::*;

/// Type ID string at the start of every archive
pub const MAGIC: &[u8; MAGIC_LENGTH] = b"ALPHA-HELIX COMBINER VER 3.3";

/// Length of the type ID string
pub const MAGIC_LENGTH: usize = 28;

/// Size of the header: magic, two reserved u16 fields, u16 item count
pub const HEADER_SIZE: usize = MAGIC_LENGTH + 6;

/// Length of the NUL-padded name field in a directory record
pub const NAME_LENGTH: usize = 14;

/// Size of one directory record: name, u32 size, u16 flags, u32 offset
pub const DIRECTORY_ENTRY_SIZE: usize = NAME_LENGTH + 4 + 2 + 4;
