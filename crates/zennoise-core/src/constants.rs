// Shared audio tuning constants for the three ambient layers and the session.

// Noise source
pub const NOISE_SECONDS: f32 = 2.0; // length of each looping noise buffer

// Master bus
pub const MASTER_LEVEL: f32 = 0.9;

// Wind layer topology
pub const WIND_BANDPASS_HZ: f32 = 400.0;
pub const WIND_BANDPASS_Q: f32 = 0.6;
pub const WIND_LFO_DEPTH: f32 = 0.15; // gain swing around the base wind level

// Pad layer topology
pub const PAD_LOWPASS_HZ: f32 = 1200.0;

// Biquad Q used where a layer does not set one explicitly (WebAudio default)
pub const DEFAULT_FILTER_Q: f32 = 1.0;

// Session envelope (seconds)
pub const PAD_FADE_IN_SEC: f64 = 2.0;
pub const PAD_FADE_OUT_SEC: f64 = 1.2;
pub const TEARDOWN_DELAY_SEC: f64 = 1.4; // must exceed PAD_FADE_OUT_SEC

// Smoothing time constants for live parameter changes (seconds)
pub const RAIN_GAIN_TAU_SEC: f64 = 0.05;
pub const RAIN_CUTOFF_TAU_SEC: f64 = 0.1;
pub const WIND_GAIN_TAU_SEC: f64 = 0.08;
pub const PAD_GAIN_TAU_SEC: f64 = 0.2;
pub const PAD_FREQ_TAU_SEC: f64 = 0.2;

// Randomisation ranges (inclusive)
pub const RAIN_VOL_RANGE: (f32, f32) = (0.15, 0.85);
pub const RAIN_DAMP_RANGE: (f32, f32) = (400.0, 3000.0);
pub const WIND_VOL_RANGE: (f32, f32) = (0.05, 0.65);
pub const WIND_RATE_RANGE: (f32, f32) = (0.05, 1.55);
pub const PAD_VOL_RANGE: (f32, f32) = (0.05, 0.65);
pub const PAD_FREQ_RANGE: (f32, f32) = (80.0, 440.0);

// Preset persistence
pub const PRESET_STORAGE_KEY: &str = "zennoise-presets";

// Control ranges accepted by the UI (inclusive)
pub const VOLUME_RANGE: (f32, f32) = (0.0, 1.0);
pub const RAIN_DAMP_CONTROL_RANGE: (f32, f32) = (100.0, 8000.0);
pub const WIND_RATE_CONTROL_RANGE: (f32, f32) = (0.01, 2.0);
pub const PAD_FREQ_CONTROL_RANGE: (f32, f32) = (40.0, 880.0);
