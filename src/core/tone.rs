//! Sine tone synthesis.

use std::f32::consts::TAU;

/// Render a sine tone at `frequency` Hz into a fresh buffer of
/// `round(sample_rate * duration_secs)` samples. Cost is linear in the
/// buffer length; callers synthesize once per (re)tune, not per
/// playback. Non-positive frequency, duration, or sample rate is a
/// caller bug.
pub fn synthesize(frequency: f32, duration_secs: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    debug_assert!(frequency > 0.0, "frequency must be positive");
    debug_assert!(duration_secs > 0.0, "duration must be positive");
    debug_assert!(sample_rate > 0, "sample rate must be positive");

    let len = (sample_rate as f32 * duration_secs).round() as usize;
    let step = TAU * frequency / sample_rate as f32;
    (0..len).map(|i| amplitude * (step * i as f32).sin()).collect()
}
