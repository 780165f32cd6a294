//! The six tunable parameters and the record that snapshots them.

use crate::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Snapshot of every tunable parameter.
///
/// Serialized with the camelCase field names used by the persisted preset
/// blob (`rainVol`, `rainDamp`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub rain_vol: f32,
    pub rain_damp: f32,
    pub wind_vol: f32,
    pub wind_rate: f32,
    pub pad_vol: f32,
    pub pad_freq: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rain_vol: 0.5,
            rain_damp: 1200.0,
            wind_vol: 0.3,
            wind_rate: 0.25,
            pad_vol: 0.3,
            pad_freq: 220.0,
        }
    }
}

impl Settings {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::RainVol => self.rain_vol,
            Param::RainDamp => self.rain_damp,
            Param::WindVol => self.wind_vol,
            Param::WindRate => self.wind_rate,
            Param::PadVol => self.pad_vol,
            Param::PadFreq => self.pad_freq,
        }
    }

    pub fn set(&mut self, param: Param, value: f32) {
        let slot = match param {
            Param::RainVol => &mut self.rain_vol,
            Param::RainDamp => &mut self.rain_damp,
            Param::WindVol => &mut self.wind_vol,
            Param::WindRate => &mut self.wind_rate,
            Param::PadVol => &mut self.pad_vol,
            Param::PadFreq => &mut self.pad_freq,
        };
        *slot = value;
    }

    /// Copy with every field clamped into its control range.
    /// Non-finite values fall back to the default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Settings::default();
        let mut out = *self;
        for param in Param::ALL {
            let (lo, hi) = param.control_range();
            let v = self.get(param);
            let v = if v.is_finite() {
                v.clamp(lo, hi)
            } else {
                defaults.get(param)
            };
            out.set(param, v);
        }
        out
    }

    /// Draw every parameter independently and uniformly from its range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut out = Settings::default();
        for param in Param::ALL {
            let (lo, hi) = param.random_range();
            out.set(param, rng.gen_range(lo..=hi));
        }
        out
    }
}

/// Identifies one of the six tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    RainVol,
    RainDamp,
    WindVol,
    WindRate,
    PadVol,
    PadFreq,
}

impl Param {
    pub const ALL: [Param; 6] = [
        Param::RainVol,
        Param::RainDamp,
        Param::WindVol,
        Param::WindRate,
        Param::PadVol,
        Param::PadFreq,
    ];

    /// Field name in the persisted JSON and id of the matching UI control.
    pub fn key(self) -> &'static str {
        match self {
            Param::RainVol => "rainVol",
            Param::RainDamp => "rainDamp",
            Param::WindVol => "windVol",
            Param::WindRate => "windRate",
            Param::PadVol => "padVol",
            Param::PadFreq => "padFreq",
        }
    }

    pub fn from_key(key: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Inclusive range the UI control accepts.
    pub fn control_range(self) -> (f32, f32) {
        match self {
            Param::RainVol | Param::WindVol | Param::PadVol => VOLUME_RANGE,
            Param::RainDamp => RAIN_DAMP_CONTROL_RANGE,
            Param::WindRate => WIND_RATE_CONTROL_RANGE,
            Param::PadFreq => PAD_FREQ_CONTROL_RANGE,
        }
    }

    /// Inclusive range used by [`Settings::random`]; always inside
    /// [`Param::control_range`].
    pub fn random_range(self) -> (f32, f32) {
        match self {
            Param::RainVol => RAIN_VOL_RANGE,
            Param::RainDamp => RAIN_DAMP_RANGE,
            Param::WindVol => WIND_VOL_RANGE,
            Param::WindRate => WIND_RATE_RANGE,
            Param::PadVol => PAD_VOL_RANGE,
            Param::PadFreq => PAD_FREQ_RANGE,
        }
    }
}
