//! 4-bit ADPCM decoder (Creative-style 8-to-4 bit variant)
//!
//! The first byte is an uncompressed seed sample. Every following byte packs
//! two nibbles, high nibble first. Each nibble is a sign bit plus a 3-bit
//! magnitude that is scaled by an adaptive shift in `0..=3`.

/// Highest value of the adaptive shift
const MAX_STEP: u8 = 3;

/// Magnitudes at or above this grow the step
const STEP_UP_THRESHOLD: u8 = 5;

/// Output value used when there is no seed byte at all
const SILENCE: u8 = 0x80;

/// Decoder state for one sample stream.
///
/// Create a fresh decoder for every stream; state never carries over.
#[derive(Debug, Clone)]
pub struct AdpcmDecoder {
    predictor: i32,
    step: u8,
}

impl AdpcmDecoder {
    /// Start a stream from its seed sample.
    #[must_use]
    pub fn new(seed: u8) -> Self {
        Self {
            predictor: i32::from(seed),
            step: 0,
        }
    }

    /// Current adaptive shift (always in `0..=3`)
    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Decode one nibble (only the low 4 bits are used) into the next sample.
    pub fn decode_nibble(&mut self, nibble: u8) -> u8 {
        let magnitude = nibble & 0x07;
        let delta = i32::from(magnitude) << self.step;

        let target = if nibble & 0x08 == 0 {
            self.predictor + delta
        } else {
            self.predictor - delta
        };
        self.predictor = target.clamp(0, 255);

        if magnitude >= STEP_UP_THRESHOLD {
            self.step = (self.step + 1).min(MAX_STEP);
        } else if magnitude == 0 {
            self.step = self.step.saturating_sub(1);
        }

        self.predictor as u8
    }
}

/// Number of PCM samples produced from `input_len` ADPCM bytes.
#[must_use]
pub fn decoded_len(input_len: usize) -> usize {
    if input_len <= 1 {
        1
    } else {
        2 * (input_len - 1) + 1
    }
}

/// Decode a whole ADPCM stream into unsigned 8-bit PCM.
///
/// An empty input yields a single silent sample.
#[must_use]
pub fn decode_adpcm(input: &[u8]) -> Vec<u8> {
    let Some((&seed, packed)) = input.split_first() else {
        return vec![SILENCE];
    };

    let mut pcm = Vec::with_capacity(decoded_len(input.len()));
    pcm.push(seed);

    let mut decoder = AdpcmDecoder::new(seed);
    for &byte in packed {
        pcm.push(decoder.decode_nibble(byte >> 4));
        pcm.push(decoder.decode_nibble(byte & 0x0F));
    }

    pcm
}
