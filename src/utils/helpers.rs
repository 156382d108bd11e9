/// Normalize a buffer of audio samples to the range [-1.0, 1.0]
pub fn normalize_samples(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }

    // Find the maximum absolute value
    let max_abs = samples.iter().fold(0.0f32, |max, &sample| max.max(sample.abs()));

    if max_abs > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= max_abs;
        }
    }
}

/// Format a frequency value with appropriate unit suffix (Hz, kHz)
pub fn format_frequency(freq: f32) -> String {
    if freq >= 1000.0 {
        format!("{:.2} kHz", freq / 1000.0)
    } else {
        format!("{:.2} Hz", freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_scales_peak_to_one() {
        let mut samples = vec![0.1, -0.4, 0.2];
        normalize_samples(&mut samples);
        assert_eq!(samples[1], -1.0);
        assert!((samples[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn normalize_leaves_silence_untouched() {
        let mut samples = vec![0.0; 8];
        normalize_samples(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));

        let mut empty: Vec<f32> = Vec::new();
        normalize_samples(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn frequency_formatting_picks_units() {
        assert_eq!(format_frequency(369.994), "369.99 Hz");
        assert_eq!(format_frequency(1046.5), "1.05 kHz");
    }
}
