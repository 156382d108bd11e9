//! Position-to-frequency mapping along the note line.

/// Map a line coordinate to a frequency between `min_freq` and
/// `max_freq`. Out-of-range positions saturate at the line ends; the
/// interpolation is logarithmic so equal distances on the line are equal
/// pitch intervals.
pub fn position_to_freq(
    position: f32,
    line_start: f32,
    line_end: f32,
    min_freq: f32,
    max_freq: f32,
) -> f32 {
    if !(line_end > line_start) {
        return min_freq;
    }
    let x = position.clamp(line_start, line_end);
    let norm = (x - line_start) / (line_end - line_start);
    let log_min = min_freq.log2();
    let log_max = max_freq.log2();
    2.0f32.powf(log_min + norm * (log_max - log_min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MIN_FREQ: f32 = 130.81;
    const MAX_FREQ: f32 = 1046.50;

    fn map(x: f32) -> f32 {
        position_to_freq(x, 50.0, 750.0, MIN_FREQ, MAX_FREQ)
    }

    #[test]
    fn endpoints_hit_the_range_limits() {
        assert_relative_eq!(map(50.0), MIN_FREQ, max_relative = 1e-5);
        assert_relative_eq!(map(750.0), MAX_FREQ, max_relative = 1e-5);
    }

    #[test]
    fn midpoint_is_the_geometric_mean() {
        // log midpoint of C3..C6 lands between F#4 and G4, ~369.99 Hz.
        let expected = (MIN_FREQ * MAX_FREQ).sqrt();
        assert_relative_eq!(map(400.0), expected, max_relative = 1e-4);
        assert_relative_eq!(map(400.0), 369.99, max_relative = 1e-3);
    }

    #[test]
    fn monotonically_non_decreasing() {
        let mut last = 0.0f32;
        let mut x = 0.0f32;
        while x <= 800.0 {
            let f = map(x);
            // Tolerance of one milli-Hz absorbs powf rounding.
            assert!(f >= last - 1e-3, "freq fell from {last} to {f} at x={x}");
            last = f;
            x += 1.0;
        }
    }

    #[test]
    fn out_of_range_positions_saturate() {
        assert_eq!(map(-1000.0), map(50.0));
        assert_eq!(map(0.0), map(50.0));
        assert_eq!(map(751.0), map(750.0));
        assert_eq!(map(f32::INFINITY), map(750.0));
    }

    #[test]
    fn degenerate_line_yields_min_freq() {
        assert_eq!(position_to_freq(10.0, 50.0, 50.0, MIN_FREQ, MAX_FREQ), MIN_FREQ);
    }
}
