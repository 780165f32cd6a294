use crate::config::Smoothing;
use crate::error::EngineResult;
use crate::graph::{AudioHost, ParamKind, Role};
use crate::session::Session;
use crate::settings::Settings;

/// Which pad targets a retarget pass may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadGain {
    Follow,
    /// Leave the pad gain alone so an in-flight fade-out is not disturbed.
    Hold,
}

/// Move every live node parameter towards `settings`.
///
/// Gains, the rain cutoff and the pad pitch approach their targets
/// exponentially with the per-parameter time constants in `smoothing`; the
/// wind LFO rate jumps.
pub fn retarget<H: AudioHost>(
    host: &mut H,
    session: &Session<H::Node>,
    settings: &Settings,
    smoothing: &Smoothing,
    pad_gain: PadGain,
) -> EngineResult<()> {
    let now = host.current_time();

    let rain_amp = session.rain.node(Role::Amp)?;
    host.set_target_at_time(
        rain_amp,
        ParamKind::Gain,
        settings.rain_vol,
        now,
        smoothing.rain_gain,
    )?;
    let rain_filter = session.rain.node(Role::Filter)?;
    host.set_target_at_time(
        rain_filter,
        ParamKind::Frequency,
        settings.rain_damp,
        now,
        smoothing.rain_cutoff,
    )?;

    let wind_amp = session.wind.node(Role::Amp)?;
    host.set_target_at_time(
        wind_amp,
        ParamKind::Gain,
        settings.wind_vol,
        now,
        smoothing.wind_gain,
    )?;
    let wind_lfo = session.wind.node(Role::Lfo)?;
    host.set_param(wind_lfo, ParamKind::Frequency, settings.wind_rate);

    if pad_gain == PadGain::Follow {
        let pad_amp = session.pad.node(Role::Amp)?;
        // A pending fade-in ramp would otherwise land on the old level
        let held = host.param_value(pad_amp, ParamKind::Gain);
        host.cancel_scheduled_values(pad_amp, ParamKind::Gain, now)?;
        host.set_value_at_time(pad_amp, ParamKind::Gain, held, now)?;
        host.set_target_at_time(
            pad_amp,
            ParamKind::Gain,
            settings.pad_vol,
            now,
            smoothing.pad_gain,
        )?;
    }
    let pad_osc = session.pad.node(Role::Source)?;
    host.set_target_at_time(
        pad_osc,
        ParamKind::Frequency,
        settings.pad_freq,
        now,
        smoothing.pad_freq,
    )?;

    log::debug!("[bridge] retargeted session {}", session.generation);
    Ok(())
}
