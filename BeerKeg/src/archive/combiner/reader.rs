//! Combiner archive reader
//!
//! The reader keeps a single cursor for scanning the directory table.
//! Payload reads seek elsewhere and put the cursor back afterwards, so
//! scanning and extracting can be interleaved freely.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{
    ArchiveDirectory, ArchiveHeader, DirectoryEntry, DIRECTORY_ENTRY_SIZE, HEADER_SIZE, MAGIC,
    MAGIC_LENGTH,
};
use crate::error::{Error, Result};

/// Combiner archive reader over any `Read + Seek` source
pub struct ArchiveReader<R: Read + Seek> {
    reader: BufReader<R>,
    header: Option<ArchiveHeader>,
    source_len: Option<u64>,
    /// Directory records consumed by the current scan
    scanned: u16,
}

impl ArchiveReader<File> {
    /// Open an archive file from disk
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Create a new reader from a Read + Seek source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            header: None,
            source_len: None,
            scanned: 0,
        }
    }

    /// Total length of the source in bytes (measured once, then cached)
    pub fn source_len(&mut self) -> Result<u64> {
        if let Some(len) = self.source_len {
            return Ok(len);
        }
        let pos = self.reader.stream_position()?;
        let len = self.reader.seek(SeekFrom::End(0))?;
        self.reader.seek(SeekFrom::Start(pos))?;
        self.source_len = Some(len);
        Ok(len)
    }

    /// Check the 28-byte type ID string at the start of the source
    ///
    /// # Errors
    /// Returns [`Error::BadMagic`] on any mismatch, including a source shorter
    /// than the magic itself.
    pub fn verify_magic(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;

        let mut found = Vec::with_capacity(MAGIC_LENGTH);
        self.reader
            .by_ref()
            .take(MAGIC_LENGTH as u64)
            .read_to_end(&mut found)?;

        if found != MAGIC {
            return Err(Error::BadMagic {
                found: String::from_utf8_lossy(&found).into_owned(),
            });
        }
        Ok(())
    }

    /// Read the fields following the magic
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the source ends inside the header.
    pub fn read_header(&mut self) -> Result<ArchiveHeader> {
        self.reader.seek(SeekFrom::Start(MAGIC_LENGTH as u64))?;

        let reserved_a = self.reader.read_u16::<LittleEndian>()?;
        let reserved_b = self.reader.read_u16::<LittleEndian>()?;
        let item_count = self.reader.read_u16::<LittleEndian>()?;

        tracing::debug!(
            "Archive header: reserved_a={reserved_a:#06x} reserved_b={reserved_b:#06x} items={item_count}"
        );

        let header = ArchiveHeader {
            reserved_a,
            reserved_b,
            item_count,
        };
        self.header = Some(header);
        self.scanned = 0;
        Ok(header)
    }

    /// The header, reading it first if needed
    pub fn header(&mut self) -> Result<ArchiveHeader> {
        match self.header {
            Some(header) => Ok(header),
            None => self.read_header(),
        }
    }

    /// Position the scan cursor on the first directory record
    ///
    /// # Errors
    /// Returns [`Error::TruncatedDirectory`] if the source is too short to
    /// hold every record the header declares.
    pub fn rewind_directory(&mut self) -> Result<()> {
        let header = self.header()?;
        let source_len = self.source_len()?;

        let needed = header.directory_size();
        let available = source_len.saturating_sub(HEADER_SIZE as u64);
        if available < needed {
            return Err(Error::TruncatedDirectory {
                declared: header.item_count,
                needed,
                available,
            });
        }

        self.reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        self.scanned = 0;
        Ok(())
    }

    /// Read the next directory record of the current scan
    ///
    /// Returns `Ok(None)` once all declared records have been read.
    /// Call [`Self::rewind_directory`] first to start (or restart) a scan.
    pub fn next_entry(&mut self) -> Result<Option<DirectoryEntry>> {
        let header = self.header()?;
        if self.scanned >= header.item_count {
            return Ok(None);
        }

        let mut record = [0u8; DIRECTORY_ENTRY_SIZE];
        self.reader.read_exact(&mut record)?;
        self.scanned += 1;

        Ok(Some(DirectoryEntry::parse(&record)))
    }

    /// Scan the whole directory table from the start
    ///
    /// # Errors
    /// Returns [`Error::TruncatedDirectory`] if the table is cut short.
    pub fn entries(&mut self) -> Result<Vec<DirectoryEntry>> {
        self.rewind_directory()?;

        let mut entries = Vec::with_capacity(usize::from(self.header()?.item_count));
        while let Some(entry) = self.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Verify the magic, then read header and directory in one go
    pub fn read_directory(&mut self) -> Result<ArchiveDirectory> {
        self.verify_magic()?;
        let header = self.read_header()?;
        let entries = self.entries()?;
        Ok(ArchiveDirectory { header, entries })
    }

    /// Read an entry's payload by its absolute offset
    ///
    /// The scan cursor is restored afterwards.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if the payload extends past the end of
    /// the source.
    pub fn extract(&mut self, entry: &DirectoryEntry) -> Result<Vec<u8>> {
        let source_len = self.source_len()?;
        let out_of_range = || Error::OutOfRange {
            name: entry.name.clone(),
            offset: u64::from(entry.offset),
            size: u64::from(entry.size),
            source_len,
        };

        if entry.end_offset() > source_len {
            return Err(out_of_range());
        }

        let saved = self.reader.stream_position()?;
        self.reader.seek(SeekFrom::Start(u64::from(entry.offset)))?;

        let mut data = vec![0u8; entry.size as usize];
        let read = self.reader.read_exact(&mut data);
        self.reader.seek(SeekFrom::Start(saved))?;

        match read {
            Ok(()) => Ok(data),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(out_of_range()),
            Err(e) => Err(e.into()),
        }
    }
}
