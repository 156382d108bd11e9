use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Engine configuration. All tone buffers share one sample rate and
/// duration, so every buffer in a registry has the same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Seconds a triggered note keeps sounding.
    pub duration_secs: f32,
    /// Per-tone amplitude, kept below 1.0 to leave mixing headroom.
    pub amplitude: f32,
    /// Low end of the pitch range in Hz (C3).
    pub min_freq: f32,
    /// High end of the pitch range in Hz (C6).
    pub max_freq: f32,
    /// Leftmost marker position.
    pub line_start: f32,
    /// Rightmost marker position.
    pub line_end: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration_secs: 0.3,
            amplitude: 0.5,
            min_freq: 130.81,
            max_freq: 1046.50,
            line_start: 50.0,
            line_end: 750.0,
        }
    }
}

impl EngineConfig {
    /// Number of samples in one tone buffer.
    pub fn frame_len(&self) -> usize {
        (self.sample_rate as f32 * self.duration_secs).round() as usize
    }

    /// Load the saved configuration, falling back to defaults when no
    /// file exists yet.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Ok(Self::load_from(&path)?.sanitized())
        } else {
            Ok(Self::default())
        }
    }

    /// Persist the configuration as pretty JSON.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        path.push("noteline");
        path.push("config.json");
        Ok(path)
    }

    /// Replace unusable loaded values with their defaults. A hand-edited
    /// config must never give the engine a zero-length buffer or an
    /// inverted range.
    pub(crate) fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.sample_rate == 0 {
            log::warn!("config: sample_rate 0, using {}", d.sample_rate);
            self.sample_rate = d.sample_rate;
        }
        if !(self.duration_secs > 0.0) {
            log::warn!("config: bad duration {}, using {}", self.duration_secs, d.duration_secs);
            self.duration_secs = d.duration_secs;
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            log::warn!("config: bad amplitude {}, using {}", self.amplitude, d.amplitude);
            self.amplitude = d.amplitude;
        }
        if !(self.min_freq > 0.0 && self.max_freq > self.min_freq) {
            log::warn!("config: bad frequency range, using {}..{}", d.min_freq, d.max_freq);
            self.min_freq = d.min_freq;
            self.max_freq = d.max_freq;
        }
        if !(self.line_end > self.line_start) {
            log::warn!("config: bad line extent, using {}..{}", d.line_start, d.line_end);
            self.line_start = d.line_start;
            self.line_end = d.line_end;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame_len_matches_rate_times_duration() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_len(), 13_230); // 44_100 * 0.3
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join("noteline-config-test.json");
        let config = EngineConfig {
            duration_secs: 1.5,
            line_end: 900.0,
            ..EngineConfig::default()
        };
        config.save_to(&path).unwrap();
        let loaded = EngineConfig::load_from(&path).unwrap();
        assert_eq!(loaded.sample_rate, config.sample_rate);
        assert_eq!(loaded.duration_secs, 1.5);
        assert_eq!(loaded.line_end, 900.0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn sanitize_restores_defaults_for_bad_fields() {
        let bad = EngineConfig {
            sample_rate: 0,
            duration_secs: -1.0,
            amplitude: 4.0,
            min_freq: 500.0,
            max_freq: 100.0,
            line_start: 750.0,
            line_end: 50.0,
        };
        let fixed = bad.sanitized();
        let d = EngineConfig::default();
        assert_eq!(fixed.sample_rate, d.sample_rate);
        assert_eq!(fixed.duration_secs, d.duration_secs);
        assert_eq!(fixed.amplitude, d.amplitude);
        assert_eq!(fixed.min_freq, d.min_freq);
        assert_eq!(fixed.max_freq, d.max_freq);
        assert!(fixed.line_end > fixed.line_start);
    }

    #[test]
    fn sanitize_keeps_good_values() {
        let config = EngineConfig {
            duration_secs: 3.0,
            ..EngineConfig::default()
        };
        let fixed = config.sanitized();
        assert_eq!(fixed.duration_secs, 3.0);
    }
}
