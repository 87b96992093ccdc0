//! SND sound container format
//!
//! SND entries hold one sample, or (for `LEVEL*` entries) several samples
//! behind a short prologue. Each sample is either raw unsigned 8-bit PCM or
//! a 4-bit ADPCM stream that expands to twice its size.
//!
//! ## Layout
//!
//! ```text
//! [LEVEL* only] u16 sample_count
//! [LEVEL* only] sample_count x u32 (unknown per-sample table)
//! sample_count x {
//!     u16 priority
//!     u16 rate_code      Hz = rate_code * 1000
//!     u16 flags          bit 0 set = ADPCM, else raw PCM
//!     u32 data_size
//!     data_size bytes
//! }
//! ```

mod adpcm;
mod container;

pub use adpcm::{AdpcmDecoder, decode_adpcm, decoded_len};
pub use container::{
    DecodedSample, SampleCodec, SampleRecord, SoundContainer, SoundLayout, sample_file_name,
    MULTI_SAMPLE_PATTERN, SAMPLE_HEADER_SIZE,
};

/// Extension marking an archive entry as a sound container
pub const SOUND_EXTENSION: &str = "SND";

/// Extension of decoded sample files
pub const WAV_EXTENSION: &str = "WAV";
