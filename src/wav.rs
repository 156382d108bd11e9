//! WAV bounce of mix buffers.

use std::path::Path;

use anyhow::{Context, Result};

/// Write a mono f32 buffer as a 16-bit PCM WAV file.
pub fn write_wav_16bit(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tone;

    #[test]
    fn written_file_reads_back_with_same_shape() {
        let path = std::env::temp_dir().join("noteline-wav-test.wav");
        let samples = tone::synthesize(440.0, 0.1, 8_000, 0.5);
        write_wav_16bit(&path, &samples, 8_000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 8_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(reader.len() as usize, samples.len());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let path = std::env::temp_dir().join("noteline-wav-clamp-test.wav");
        write_wav_16bit(&path, &[2.0, -2.0], 8_000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let values: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(values, vec![i16::MAX, i16::MIN + 1]);
        std::fs::remove_file(&path).ok();
    }
}
