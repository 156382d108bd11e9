//! Mixing and normalization of sounding tones.
//!
//! The mix is recomputed from scratch on every change to the sounding
//! set. Sounding sets are small (markers a user placed on screen), so a
//! full pass is cheap and avoids incremental-sum drift.

use crate::error::EngineError;
use crate::utils::helpers::normalize_samples;

/// Sum equal-length buffers sample-wise and normalize the result to
/// full scale. An empty input yields a silent buffer of `frame_len`
/// samples; a silent sum is returned as-is rather than divided by its
/// zero peak. Buffers of the wrong length fail with `ShapeMismatch`.
pub fn mix(buffers: &[&[f32]], frame_len: usize) -> Result<Vec<f32>, EngineError> {
    let mut out = vec![0.0f32; frame_len];

    for buffer in buffers {
        if buffer.len() != frame_len {
            return Err(EngineError::ShapeMismatch {
                expected: frame_len,
                actual: buffer.len(),
            });
        }
        for (acc, &sample) in out.iter_mut().zip(buffer.iter()) {
            *acc += sample;
        }
    }

    normalize_samples(&mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tone;
    use approx::assert_relative_eq;

    #[test]
    fn zero_buffers_yield_silence() {
        let mixed = mix(&[], 64).unwrap();
        assert_eq!(mixed.len(), 64);
        assert!(mixed.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn silent_inputs_stay_silent() {
        let quiet = vec![0.0f32; 64];
        let mixed = mix(&[&quiet, &quiet], 64).unwrap();
        assert!(mixed.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn single_buffer_normalizes_to_full_scale() {
        let buffer = tone::synthesize(200.0, 0.1, 8_000, 0.5);
        let mixed = mix(&[&buffer], buffer.len()).unwrap();
        let peak = mixed.iter().fold(0.0f32, |max, &s| max.max(s.abs()));
        assert_relative_eq!(peak, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn normalization_is_scale_invariant() {
        // k identical buffers normalize to the same result as one.
        let buffer = tone::synthesize(440.0, 0.05, 8_000, 0.5);
        let one = mix(&[&buffer], buffer.len()).unwrap();
        let three = mix(&[&buffer, &buffer, &buffer], buffer.len()).unwrap();
        for (a, b) in one.iter().zip(three.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn two_tone_mix_saturates_to_full_scale() {
        let a = tone::synthesize(200.0, 0.1, 8_000, 0.5);
        let b = tone::synthesize(400.0, 0.1, 8_000, 0.5);
        let mixed = mix(&[&a, &b], a.len()).unwrap();
        let peak = mixed.iter().fold(0.0f32, |max, &s| max.max(s.abs()));
        assert_relative_eq!(peak, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn length_disagreement_is_a_shape_mismatch() {
        let short = vec![0.1f32; 32];
        let err = mix(&[&short], 64).unwrap_err();
        assert_eq!(err, EngineError::ShapeMismatch { expected: 64, actual: 32 });
    }
}
