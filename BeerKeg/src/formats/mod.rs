//! File format modules
//!
//! This module contains parsers and codecs for the payload formats found
//! inside combiner archives.

pub mod snd;
pub mod wav;

pub use snd::{DecodedSample, SampleRecord, SoundContainer, SoundLayout};
pub use wav::{encode_wav, write_wav};
