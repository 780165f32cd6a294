//! Session lifecycle: build and start the three layers, fade the pad in and
//! out, and release everything after the fade.
//!
//! ```text
//! Idle --start--> Playing --stop--> Stopping --finish_stop--> Idle
//!                    ^                  |
//!                    +------start-------+
//! ```
//!
//! `stop` does not release nodes itself. It returns a [`Teardown`] token the
//! caller hands back to [`SessionController::finish_stop`] once
//! `Teardown::delay` has elapsed. Each session start or revival takes a new
//! generation number, so a token from a superseded stop is ignored.

use crate::bridge::{self, PadGain};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::graph::{realize, AudioHost, LayerHandle, NodeSpec, ParamKind, Role};
use crate::layers;
use crate::noise::white_noise;
use crate::settings::Settings;
use rand::prelude::*;
use std::fmt;
use std::time::Duration;

/// Status shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackStatus::Stopped => f.write_str("Stopped"),
            PlaybackStatus::Playing => f.write_str("Playing"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Playing,
    /// Pad is fading out; sources are still running until teardown.
    Stopping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyPlaying,
    /// A fading session was brought back to Playing.
    Revived,
}

/// Deferred release of a stopping session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Teardown {
    pub generation: u64,
    pub delay: Duration,
}

/// The live set of layers plus the master bus they feed.
#[derive(Debug)]
pub struct Session<N> {
    pub generation: u64,
    pub rain: LayerHandle<N>,
    pub wind: LayerHandle<N>,
    pub pad: LayerHandle<N>,
    pub master: N,
    stopping: bool,
}

impl<N> Session<N> {
    pub fn layers(&self) -> [&LayerHandle<N>; 3] {
        [&self.rain, &self.wind, &self.pad]
    }

    pub fn sources(&self) -> impl Iterator<Item = &N> {
        self.layers().into_iter().flat_map(|l| l.sources().iter())
    }
}

/// Owns the host and at most one [`Session`].
pub struct SessionController<H: AudioHost> {
    host: H,
    config: EngineConfig,
    session: Option<Session<H::Node>>,
    status: PlaybackStatus,
    next_generation: u64,
    rng: StdRng,
}

impl<H: AudioHost> SessionController<H> {
    pub fn new(host: H, config: EngineConfig, seed: u64) -> Self {
        Self {
            host,
            config,
            session: None,
            status: PlaybackStatus::Stopped,
            next_generation: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn session(&self) -> Option<&Session<H::Node>> {
        self.session.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::Idle,
            Some(s) if s.stopping => SessionState::Stopping,
            Some(_) => SessionState::Playing,
        }
    }

    fn take_generation(&mut self) -> u64 {
        let g = self.next_generation;
        self.next_generation += 1;
        g
    }

    /// Build, start and connect the three layers, then fade the pad in.
    ///
    /// The output device must already be running; the web front-end awaits
    /// `AudioContext.resume()` before calling this.
    pub fn start(&mut self, settings: &Settings) -> EngineResult<StartOutcome> {
        match self.state() {
            SessionState::Playing => return Ok(StartOutcome::AlreadyPlaying),
            SessionState::Stopping => return self.revive(settings),
            SessionState::Idle => {}
        }
        if self.host.is_suspended() {
            log::warn!("[session] starting while the output device is suspended");
        }

        let sr = self.host.sample_rate();
        let rain_noise = white_noise(sr, &mut self.rng);
        let wind_noise = white_noise(sr, &mut self.rng);
        let rain = realize(&mut self.host, &layers::rain(settings, rain_noise, sr))?;
        let wind = realize(&mut self.host, &layers::wind(settings, wind_noise, sr))?;
        let pad = realize(&mut self.host, &layers::pad(settings))?;
        let master = self.host.create(&NodeSpec::Gain {
            level: self.config.master_level,
        })?;

        let session = Session {
            generation: self.take_generation(),
            rain,
            wind,
            pad,
            master,
            stopping: false,
        };
        if let Err(e) = self.launch(&session, settings) {
            log::error!("[session] start failed: {}", e);
            release(&mut self.host, &session);
            return Err(e);
        }

        log::info!("[session] playing (generation {})", session.generation);
        self.session = Some(session);
        self.status = PlaybackStatus::Playing;
        Ok(StartOutcome::Started)
    }

    fn launch(&mut self, session: &Session<H::Node>, settings: &Settings) -> EngineResult<()> {
        for src in session.sources() {
            self.host.start(src)?;
        }
        self.host.connect_output(&session.master)?;
        for layer in session.layers() {
            self.host.connect(layer.output(), &session.master)?;
        }
        let now = self.host.current_time();
        let pad_amp = session.pad.node(Role::Amp)?;
        self.host.set_value_at_time(pad_amp, ParamKind::Gain, 0.0, now)?;
        self.host.linear_ramp_to_value_at_time(
            pad_amp,
            ParamKind::Gain,
            settings.pad_vol,
            now + self.config.pad_fade_in,
        )
    }

    fn revive(&mut self, settings: &Settings) -> EngineResult<StartOutcome> {
        let generation = self.take_generation();
        let fade_in = self.config.pad_fade_in;
        let Some(session) = self.session.as_mut() else {
            return Ok(StartOutcome::AlreadyPlaying);
        };
        let pad_amp = session.pad.node(Role::Amp)?.clone();
        let now = self.host.current_time();
        let held = self.host.param_value(&pad_amp, ParamKind::Gain);
        self.host
            .cancel_scheduled_values(&pad_amp, ParamKind::Gain, now)?;
        self.host
            .set_value_at_time(&pad_amp, ParamKind::Gain, held, now)?;
        self.host.linear_ramp_to_value_at_time(
            &pad_amp,
            ParamKind::Gain,
            settings.pad_vol,
            now + fade_in,
        )?;
        session.generation = generation;
        session.stopping = false;
        self.status = PlaybackStatus::Playing;
        log::info!("[session] revived during fade-out (generation {})", generation);
        Ok(StartOutcome::Revived)
    }

    /// Begin the pad fade-out. Returns `None` unless a session is Playing.
    pub fn stop(&mut self) -> EngineResult<Option<Teardown>> {
        if self.state() != SessionState::Playing {
            return Ok(None);
        }
        let fade_out = self.config.pad_fade_out;
        let delay = Duration::from_secs_f64(self.config.teardown_delay);
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let pad_amp = session.pad.node(Role::Amp)?.clone();
        let now = self.host.current_time();
        let held = self.host.param_value(&pad_amp, ParamKind::Gain);
        self.host
            .cancel_scheduled_values(&pad_amp, ParamKind::Gain, now)?;
        self.host
            .set_value_at_time(&pad_amp, ParamKind::Gain, held, now)?;
        self.host
            .linear_ramp_to_value_at_time(&pad_amp, ParamKind::Gain, 0.0, now + fade_out)?;
        session.stopping = true;
        log::info!(
            "[session] fading out generation {} (teardown in {:?})",
            session.generation,
            delay
        );
        Ok(Some(Teardown {
            generation: session.generation,
            delay,
        }))
    }

    /// Stop every source and drop the session, if `token` still refers to
    /// the current Stopping session. Returns whether anything was released.
    pub fn finish_stop(&mut self, token: Teardown) -> bool {
        let current = match &self.session {
            Some(s) if s.stopping && s.generation == token.generation => true,
            _ => false,
        };
        if !current {
            log::debug!(
                "[session] ignoring stale teardown for generation {}",
                token.generation
            );
            return false;
        }
        if let Some(session) = self.session.take() {
            release(&mut self.host, &session);
            log::info!("[session] stopped generation {}", session.generation);
        }
        self.status = PlaybackStatus::Stopped;
        true
    }

    /// Push `settings` onto the live nodes. No-op while Idle.
    pub fn update(&mut self, settings: &Settings) -> EngineResult<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let pad_gain = if session.stopping {
            PadGain::Hold
        } else {
            PadGain::Follow
        };
        bridge::retarget(
            &mut self.host,
            session,
            settings,
            &self.config.smoothing,
            pad_gain,
        )
    }
}

/// Stop all sources and detach the master bus. Already-stopped sources are
/// tolerated.
fn release<H: AudioHost>(host: &mut H, session: &Session<H::Node>) {
    for src in session.sources() {
        match host.stop(src) {
            Ok(()) => {}
            Err(EngineError::AlreadyStopped) => {
                log::debug!("[session] source already stopped");
            }
            Err(e) => log::warn!("[session] failed to stop source: {}", e),
        }
    }
    for layer in session.layers() {
        for node in layer.nodes() {
            host.disconnect(node);
        }
    }
    host.disconnect(&session.master);
}
