//! SND container parsing and per-sample decoding

use byteorder::{ByteOrder, LittleEndian};

use super::{WAV_EXTENSION, decode_adpcm};
use crate::error::{Error, Result};
use crate::formats::wav::encode_wav;
use crate::utils::{ByteCursor, file_stem, wildcard_match};

/// Entry names matching this pattern carry several samples
pub const MULTI_SAMPLE_PATTERN: &str = "LEVEL*";

/// priority, rate code, flags (u16 each) and data size (u32)
pub const SAMPLE_HEADER_SIZE: usize = 10;

/// Flag bit marking an ADPCM payload
const FLAG_ADPCM: u16 = 0x0001;

/// How samples are laid out inside an SND entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundLayout {
    /// One record starting at byte 0
    Single,
    /// Sample count, opaque per-sample table, then that many records
    Multi,
}

impl SoundLayout {
    /// Pick the layout from the entry name (case-sensitive `LEVEL*` match).
    #[must_use]
    pub fn classify(entry_name: &str) -> Self {
        if wildcard_match(MULTI_SAMPLE_PATTERN, entry_name) {
            Self::Multi
        } else {
            Self::Single
        }
    }
}

/// Payload encoding of a sample record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCodec {
    /// Unsigned 8-bit PCM, stored as-is
    Pcm,
    /// 4-bit ADPCM with a raw seed byte
    Adpcm,
}

impl SampleCodec {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pcm => "PCM",
            Self::Adpcm => "ADPCM",
        }
    }
}

/// One sample record, borrowing its payload from the container bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord<'a> {
    /// Playback priority (unused)
    pub priority: u16,
    /// Sample rate in kHz
    pub rate_code: u16,
    pub flags: u16,
    pub data: &'a [u8],
}

impl<'a> SampleRecord<'a> {
    /// Parse the record at the cursor and advance past its payload.
    ///
    /// `name` and `index` only feed the error message.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedSample`] if the header or the declared payload
    /// does not fit in the remaining bytes.
    pub fn parse(name: &str, index: usize, cursor: &mut ByteCursor<'a>) -> Result<Self> {
        let truncated = |needed: usize, available: usize| Error::TruncatedSample {
            name: name.to_string(),
            index,
            needed,
            available,
        };

        let available = cursor.remaining();
        let header = cursor
            .take(SAMPLE_HEADER_SIZE)
            .ok_or_else(|| truncated(SAMPLE_HEADER_SIZE, available))?;

        let priority = LittleEndian::read_u16(&header[0..2]);
        let rate_code = LittleEndian::read_u16(&header[2..4]);
        let flags = LittleEndian::read_u16(&header[4..6]);
        let data_size = LittleEndian::read_u32(&header[6..10]) as usize;

        let available = cursor.remaining();
        let data = cursor
            .take(data_size)
            .ok_or_else(|| truncated(data_size, available))?;

        Ok(Self {
            priority,
            rate_code,
            flags,
            data,
        })
    }

    #[must_use]
    pub fn codec(&self) -> SampleCodec {
        if self.flags & FLAG_ADPCM != 0 {
            SampleCodec::Adpcm
        } else {
            SampleCodec::Pcm
        }
    }

    /// Sample rate in Hz
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        u32::from(self.rate_code) * 1000
    }

    /// Decode the payload into unsigned 8-bit PCM.
    #[must_use]
    pub fn decode(&self) -> DecodedSample {
        let pcm = match self.codec() {
            SampleCodec::Adpcm => decode_adpcm(self.data),
            SampleCodec::Pcm => self.data.to_vec(),
        };
        DecodedSample {
            sample_rate: self.sample_rate(),
            pcm,
        }
    }
}

/// A parsed SND entry
#[derive(Debug, Clone)]
pub struct SoundContainer<'a> {
    pub layout: SoundLayout,
    /// Opaque per-sample values from the multi-sample prologue (empty for `Single`)
    pub sample_table: Vec<u32>,
    pub records: Vec<SampleRecord<'a>>,
}

impl<'a> SoundContainer<'a> {
    /// Parse an SND entry's payload. The layout is chosen from `entry_name`.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedSampleTable`] if a multi-sample prologue is
    /// cut short, or [`Error::TruncatedSample`] if any record is.
    pub fn parse(entry_name: &str, data: &'a [u8]) -> Result<Self> {
        let layout = SoundLayout::classify(entry_name);
        let mut cursor = ByteCursor::new(data);

        let (sample_count, sample_table) = match layout {
            SoundLayout::Single => (1, Vec::new()),
            SoundLayout::Multi => {
                let truncated = |needed: usize| Error::TruncatedSampleTable {
                    name: entry_name.to_string(),
                    needed,
                    available: data.len(),
                };

                let count = usize::from(cursor.read_u16().ok_or_else(|| truncated(2))?);
                let table = cursor
                    .take(count * 4)
                    .ok_or_else(|| truncated(2 + count * 4))?;
                let table: Vec<u32> = table.chunks_exact(4).map(LittleEndian::read_u32).collect();

                tracing::debug!("{entry_name}: {count} samples, table {table:08x?}");
                (count, table)
            }
        };

        let records = (0..sample_count)
            .map(|index| SampleRecord::parse(entry_name, index, &mut cursor))
            .collect::<Result<Vec<_>>>()?;

        if cursor.remaining() > 0 {
            tracing::debug!(
                "{entry_name}: {} trailing bytes after last sample",
                cursor.remaining()
            );
        }

        Ok(Self {
            layout,
            sample_table,
            records,
        })
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.records.len()
    }

    /// Output file name for the record at `index`.
    #[must_use]
    pub fn sample_file_name(&self, entry_name: &str, index: usize) -> String {
        sample_file_name(entry_name, index, self.sample_count())
    }
}

/// Name of a decoded sample file: the entry's stem, plus a two-digit
/// zero-based index when the container holds more than one sample.
///
/// ```
/// use beerkeg::formats::snd::sample_file_name;
///
/// assert_eq!(sample_file_name("LEVEL1.SND", 0, 3), "LEVEL1_00.WAV");
/// assert_eq!(sample_file_name("TEST.SND", 0, 1), "TEST.WAV");
/// ```
#[must_use]
pub fn sample_file_name(entry_name: &str, index: usize, count: usize) -> String {
    let stem = file_stem(entry_name);
    if count > 1 {
        format!("{stem}_{index:02}.{WAV_EXTENSION}")
    } else {
        format!("{stem}.{WAV_EXTENSION}")
    }
}

/// Decoded mono 8-bit unsigned PCM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSample {
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub pcm: Vec<u8>,
}

impl DecodedSample {
    pub const CHANNELS: u16 = 1;
    pub const BITS_PER_SAMPLE: u16 = 8;

    /// Get duration in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.pcm.len() as f32 / self.sample_rate as f32
    }

    /// Wrap the samples in a WAVE container.
    #[must_use]
    pub fn to_wav(&self) -> Vec<u8> {
        encode_wav(&self.pcm, self.sample_rate)
    }
}
