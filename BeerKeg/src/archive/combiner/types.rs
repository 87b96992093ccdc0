//! Types for combiner archive handling

use byteorder::{ByteOrder, LittleEndian};

use super::{DIRECTORY_ENTRY_SIZE, HEADER_SIZE, MAGIC, MAGIC_LENGTH, NAME_LENGTH};
use crate::formats::snd::SOUND_EXTENSION;
use crate::utils::file_extension;

/// Header of a combiner archive (after the magic string)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// Unknown; carried through untouched.
    pub reserved_a: u16,
    /// Unknown; carried through untouched.
    pub reserved_b: u16,
    /// Number of directory records that follow the header
    pub item_count: u16,
}

impl ArchiveHeader {
    /// Serialize the full header, magic included.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..MAGIC_LENGTH].copy_from_slice(MAGIC);
        LittleEndian::write_u16(&mut bytes[28..30], self.reserved_a);
        LittleEndian::write_u16(&mut bytes[30..32], self.reserved_b);
        LittleEndian::write_u16(&mut bytes[32..34], self.item_count);
        bytes
    }

    /// Size in bytes of the directory table this header declares.
    #[must_use]
    pub fn directory_size(&self) -> u64 {
        u64::from(self.item_count) * DIRECTORY_ENTRY_SIZE as u64
    }
}

/// One record of the directory table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Name trimmed at the first NUL
    pub name: String,
    /// The name field exactly as stored, padding included
    pub raw_name: [u8; NAME_LENGTH],
    /// Payload length in bytes
    pub size: u32,
    /// Unknown flags; carried through untouched
    pub flags: u16,
    /// Absolute position of the payload in the archive
    pub offset: u32,
}

impl DirectoryEntry {
    /// Parse a 24-byte directory record.
    #[must_use]
    pub fn parse(bytes: &[u8; DIRECTORY_ENTRY_SIZE]) -> Self {
        let mut raw_name = [0u8; NAME_LENGTH];
        raw_name.copy_from_slice(&bytes[..NAME_LENGTH]);

        let name_end = raw_name.iter().position(|&b| b == 0).unwrap_or(NAME_LENGTH);
        let name = String::from_utf8_lossy(&raw_name[..name_end]).into_owned();

        Self {
            name,
            raw_name,
            size: LittleEndian::read_u32(&bytes[14..18]),
            flags: LittleEndian::read_u16(&bytes[18..20]),
            offset: LittleEndian::read_u32(&bytes[20..24]),
        }
    }

    /// Build an entry from a plain name, NUL-padding (or truncating) it to 14 bytes.
    #[must_use]
    pub fn new(name: &str, size: u32, flags: u16, offset: u32) -> Self {
        let mut record = [0u8; DIRECTORY_ENTRY_SIZE];
        let len = name.len().min(NAME_LENGTH);
        record[..len].copy_from_slice(&name.as_bytes()[..len]);
        LittleEndian::write_u32(&mut record[14..18], size);
        LittleEndian::write_u16(&mut record[18..20], flags);
        LittleEndian::write_u32(&mut record[20..24], offset);
        Self::parse(&record)
    }

    /// Serialize back into the 24-byte record layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DIRECTORY_ENTRY_SIZE] {
        let mut bytes = [0u8; DIRECTORY_ENTRY_SIZE];
        bytes[..NAME_LENGTH].copy_from_slice(&self.raw_name);
        LittleEndian::write_u32(&mut bytes[14..18], self.size);
        LittleEndian::write_u16(&mut bytes[18..20], self.flags);
        LittleEndian::write_u32(&mut bytes[20..24], self.offset);
        bytes
    }

    /// One past the last payload byte.
    #[must_use]
    pub fn end_offset(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }

    /// Whether the entry carries the sound extension (case-sensitive).
    #[must_use]
    pub fn is_sound(&self) -> bool {
        file_extension(&self.name) == Some(SOUND_EXTENSION)
    }
}

/// Header plus directory of an archive, as returned by a full scan
#[derive(Debug, Clone)]
pub struct ArchiveDirectory {
    pub header: ArchiveHeader,
    pub entries: Vec<DirectoryEntry>,
}

/// Progress information during archive operations
#[derive(Debug, Clone)]
pub struct ArchiveProgress {
    /// Current operation phase
    pub phase: ArchivePhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current entry being processed (if applicable)
    pub current_file: Option<String>,
}

impl ArchiveProgress {
    #[must_use]
    pub fn new(phase: ArchivePhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with an entry name
    #[must_use]
    pub fn with_file(
        phase: ArchivePhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of an archive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivePhase {
    /// Checking the magic and reading the header
    ReadingHeader,
    /// Scanning the directory table
    ReadingDirectory,
    /// Extracting entries (and decoding their samples)
    ExtractingEntries,
    /// Operation complete
    Complete,
}

impl ArchivePhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingHeader => "Reading header",
            Self::ReadingDirectory => "Reading directory",
            Self::ExtractingEntries => "Extracting entries",
            Self::Complete => "Complete",
        }
    }
}
