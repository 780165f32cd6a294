use crate::constants::*;
use crate::graph::{Edge, NodeSpec, ParamKind, Role, Topology};
use crate::settings::Settings;

/// The three fixed ambient layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Rain,
    Wind,
    Pad,
}

/// Rain: looping noise -> lowpass (cutoff = rainDamp) -> gain (rainVol).
pub fn rain(settings: &Settings, noise: Vec<f32>, sample_rate: f32) -> Topology {
    Topology {
        kind: LayerKind::Rain,
        stages: vec![
            (
                Role::Source,
                NodeSpec::NoiseLoop {
                    samples: noise,
                    sample_rate,
                },
            ),
            (
                Role::Filter,
                NodeSpec::Lowpass {
                    frequency: settings.rain_damp,
                    q: DEFAULT_FILTER_Q,
                },
            ),
            (
                Role::Amp,
                NodeSpec::Gain {
                    level: settings.rain_vol,
                },
            ),
        ],
        edges: vec![
            Edge::Audio {
                from: Role::Source,
                to: Role::Filter,
            },
            Edge::Audio {
                from: Role::Filter,
                to: Role::Amp,
            },
        ],
        output: Role::Amp,
    }
}

/// Wind: looping noise -> bandpass (400 Hz, Q 0.6) -> gain (windVol), with a
/// sine LFO at windRate driving a fixed-depth gain summed into the main
/// gain's level.
pub fn wind(settings: &Settings, noise: Vec<f32>, sample_rate: f32) -> Topology {
    Topology {
        kind: LayerKind::Wind,
        stages: vec![
            (
                Role::Source,
                NodeSpec::NoiseLoop {
                    samples: noise,
                    sample_rate,
                },
            ),
            (
                Role::Filter,
                NodeSpec::Bandpass {
                    frequency: WIND_BANDPASS_HZ,
                    q: WIND_BANDPASS_Q,
                },
            ),
            (
                Role::Amp,
                NodeSpec::Gain {
                    level: settings.wind_vol,
                },
            ),
            (
                Role::Lfo,
                NodeSpec::Sine {
                    frequency: settings.wind_rate,
                },
            ),
            (
                Role::LfoDepth,
                NodeSpec::Gain {
                    level: WIND_LFO_DEPTH,
                },
            ),
        ],
        edges: vec![
            Edge::Audio {
                from: Role::Source,
                to: Role::Filter,
            },
            Edge::Audio {
                from: Role::Filter,
                to: Role::Amp,
            },
            Edge::Audio {
                from: Role::Lfo,
                to: Role::LfoDepth,
            },
            Edge::Modulate {
                from: Role::LfoDepth,
                to: Role::Amp,
                param: ParamKind::Gain,
            },
        ],
        output: Role::Amp,
    }
}

/// Pad: sine (padFreq) -> lowpass (1200 Hz) -> gain starting silent. The
/// session applies the audible envelope.
pub fn pad(settings: &Settings) -> Topology {
    Topology {
        kind: LayerKind::Pad,
        stages: vec![
            (
                Role::Source,
                NodeSpec::Sine {
                    frequency: settings.pad_freq,
                },
            ),
            (
                Role::Filter,
                NodeSpec::Lowpass {
                    frequency: PAD_LOWPASS_HZ,
                    q: DEFAULT_FILTER_Q,
                },
            ),
            (Role::Amp, NodeSpec::Gain { level: 0.0 }),
        ],
        edges: vec![
            Edge::Audio {
                from: Role::Source,
                to: Role::Filter,
            },
            Edge::Audio {
                from: Role::Filter,
                to: Role::Amp,
            },
        ],
        output: Role::Amp,
    }
}
