//! Runtime configuration, defaulting to the tuning constants.

use crate::constants::*;

/// Time constants (seconds) for the exponential approach used when a live
/// parameter changes. Wind LFO rate is applied instantly and has no entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Smoothing {
    pub rain_gain: f64,
    pub rain_cutoff: f64,
    pub wind_gain: f64,
    pub pad_gain: f64,
    pub pad_freq: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            rain_gain: RAIN_GAIN_TAU_SEC,
            rain_cutoff: RAIN_CUTOFF_TAU_SEC,
            wind_gain: WIND_GAIN_TAU_SEC,
            pad_gain: PAD_GAIN_TAU_SEC,
            pad_freq: PAD_FREQ_TAU_SEC,
        }
    }
}

/// Session envelope and mix settings.
///
/// - `master_level`: fixed gain of the bus every layer feeds
/// - `pad_fade_in` / `pad_fade_out`: linear pad envelope durations
/// - `teardown_delay`: wait between starting the fade-out and stopping
///   sources; must be longer than `pad_fade_out`
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub master_level: f32,
    pub pad_fade_in: f64,
    pub pad_fade_out: f64,
    pub teardown_delay: f64,
    pub smoothing: Smoothing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_level: MASTER_LEVEL,
            pad_fade_in: PAD_FADE_IN_SEC,
            pad_fade_out: PAD_FADE_OUT_SEC,
            teardown_delay: TEARDOWN_DELAY_SEC,
            smoothing: Smoothing::default(),
        }
    }
}

/// What to do when the stored preset blob does not parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Log a warning and treat the store as empty.
    #[default]
    FailOpen,
    /// Surface [`PresetError::Corrupt`](crate::error::PresetError::Corrupt).
    Strict,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PresetConfig {
    pub storage_key: String,
    pub policy: ParsePolicy,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            storage_key: PRESET_STORAGE_KEY.to_string(),
            policy: ParsePolicy::default(),
        }
    }
}
