//! RIFF/WAVE writer for mono unsigned 8-bit PCM
//!
//! Produces the canonical 44-byte header (`RIFF`, `fmt ` with 16 bytes of
//! PCM format data, `data`) followed by the samples.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

/// Size of the RIFF/WAVE header written before the samples
pub const WAV_HEADER_SIZE: usize = 44;

const FORMAT_PCM: u16 = 1;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 8;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Write a WAVE container for `pcm` to any writer.
///
/// # Errors
/// Returns the writer's IO error if it rejects the write.
pub fn write_wav<W: Write>(writer: &mut W, pcm: &[u8], sample_rate: u32) -> std::io::Result<()> {
    let data_size = pcm.len() as u32;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(data_size.wrapping_add(36))?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(16)?;
    writer.write_u16::<LittleEndian>(FORMAT_PCM)?;
    writer.write_u16::<LittleEndian>(CHANNELS)?;
    writer.write_u32::<LittleEndian>(sample_rate)?;
    writer.write_u32::<LittleEndian>(sample_rate * u32::from(BLOCK_ALIGN))?; // byte rate
    writer.write_u16::<LittleEndian>(BLOCK_ALIGN)?;
    writer.write_u16::<LittleEndian>(BITS_PER_SAMPLE)?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_size)?;
    writer.write_all(pcm)?;

    Ok(())
}

/// Build a WAVE container in memory.
#[must_use]
pub fn encode_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + pcm.len());
    // Writing into a Vec cannot fail
    let _ = write_wav(&mut out, pcm, sample_rate);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_sample_container() {
        let wav = encode_wav(&[0x80], 8000);

        let mut expected = Vec::new();
        expected.extend_from_slice(b"RIFF");
        expected.extend_from_slice(&37u32.to_le_bytes());
        expected.extend_from_slice(b"WAVE");
        expected.extend_from_slice(b"fmt ");
        expected.extend_from_slice(&16u32.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&8000u32.to_le_bytes());
        expected.extend_from_slice(&8000u32.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes());
        expected.extend_from_slice(&8u16.to_le_bytes());
        expected.extend_from_slice(b"data");
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.push(0x80);

        assert_eq!(wav.len(), 45);
        assert_eq!(wav, expected);
    }

    #[test]
    fn test_empty_payload() {
        let wav = encode_wav(&[], 22_000);
        assert_eq!(wav.len(), WAV_HEADER_SIZE);
        assert_eq!(&wav[4..8], &36u32.to_le_bytes());
        assert_eq!(&wav[40..44], &0u32.to_le_bytes());
    }

    #[test]
    fn test_sink_error_propagates() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_wav(&mut Full, &[1, 2, 3], 8000).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
