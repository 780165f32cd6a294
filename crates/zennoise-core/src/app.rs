//! Glue between the controls, the session and the preset store.
//!
//! Every handler runs on the single UI thread; the web front-end keeps one
//! `ZenNoise` behind `Rc<RefCell<_>>` and calls into it from DOM events and
//! from the teardown timer.

use crate::config::{EngineConfig, PresetConfig};
use crate::error::PresetError;
use crate::graph::AudioHost;
use crate::presets::{KeyValueStore, PresetMap, PresetStore};
use crate::session::{PlaybackStatus, SessionController, SessionState, StartOutcome, Teardown};
use crate::settings::Settings;
use crate::surface::{apply_settings, read_settings, ControlSurface, Notice};
use rand::Rng;

pub struct ZenNoise<H: AudioHost, S: KeyValueStore, U: ControlSurface> {
    controller: SessionController<H>,
    presets: PresetStore<S>,
    surface: U,
}

impl<H: AudioHost, S: KeyValueStore, U: ControlSurface> ZenNoise<H, S, U> {
    pub fn new(
        host: H,
        storage: S,
        surface: U,
        engine: EngineConfig,
        preset_config: PresetConfig,
        seed: u64,
    ) -> Self {
        let mut app = Self {
            controller: SessionController::new(host, engine, seed),
            presets: PresetStore::new(storage, preset_config),
            surface,
        };
        app.surface.show_status(PlaybackStatus::Stopped);
        app.refresh_presets();
        app
    }

    pub fn controller(&self) -> &SessionController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController<H> {
        &mut self.controller
    }

    pub fn presets(&self) -> &PresetStore<S> {
        &self.presets
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    pub fn state(&self) -> SessionState {
        self.controller.state()
    }

    /// Current control values.
    pub fn current_settings(&self) -> Settings {
        read_settings(&self.surface)
    }

    /// Write `settings` to the controls and push them to any live session.
    pub fn apply_settings(&mut self, settings: &Settings) {
        apply_settings(&mut self.surface, settings);
        self.param_changed();
    }

    pub fn play(&mut self) -> Option<StartOutcome> {
        let settings = self.current_settings();
        match self.controller.start(&settings) {
            Ok(outcome) => {
                self.surface.show_status(self.controller.status());
                Some(outcome)
            }
            Err(e) => {
                self.surface.notify(Notice::AudioFailed(e.to_string()));
                None
            }
        }
    }

    /// Start the fade-out. The caller must invoke [`ZenNoise::finish_stop`]
    /// with the returned token after `Teardown::delay`.
    pub fn stop(&mut self) -> Option<Teardown> {
        match self.controller.stop() {
            Ok(token) => token,
            Err(e) => {
                self.surface.notify(Notice::AudioFailed(e.to_string()));
                None
            }
        }
    }

    pub fn finish_stop(&mut self, token: Teardown) -> bool {
        let released = self.controller.finish_stop(token);
        if released {
            self.surface.show_status(self.controller.status());
        }
        released
    }

    /// A control moved: retarget the live nodes.
    pub fn param_changed(&mut self) {
        let settings = self.current_settings();
        if let Err(e) = self.controller.update(&settings) {
            log::warn!("[app] live update failed: {}", e);
        }
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Settings {
        let settings = Settings::random(rng);
        self.apply_settings(&settings);
        settings
    }

    pub fn refresh_presets(&mut self) -> PresetMap {
        let map = match self.presets.list() {
            Ok(map) => map,
            Err(e) => {
                log::warn!("[app] could not list presets: {}", e);
                PresetMap::new()
            }
        };
        self.show_presets(&map);
        map
    }

    fn show_presets(&mut self, map: &PresetMap) {
        let names: Vec<String> = map.keys().cloned().collect();
        self.surface.show_presets(&names);
    }

    pub fn save_preset(&mut self, name: &str) -> bool {
        let settings = self.current_settings();
        let result = self.presets.save(name, &settings);
        self.finish_mutation(result, |n| Notice::Saved(n.trim().to_string()), name)
    }

    pub fn delete_preset(&mut self, name: &str) -> bool {
        let result = self.presets.delete(name);
        self.finish_mutation(result, |n| Notice::Deleted(n.trim().to_string()), name)
    }

    fn finish_mutation(
        &mut self,
        result: Result<PresetMap, PresetError>,
        ok: impl FnOnce(&str) -> Notice,
        name: &str,
    ) -> bool {
        match result {
            Ok(map) => {
                self.show_presets(&map);
                self.surface.notify(ok(name));
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Apply the named preset to the controls and the live session.
    pub fn load_preset(&mut self, name: &str) -> Option<Settings> {
        match self.presets.load(name) {
            Ok(settings) => {
                let settings = settings.clamped();
                self.apply_settings(&settings);
                log::info!("[app] loaded preset {:?}", name.trim());
                Some(settings)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    fn report(&mut self, err: PresetError) {
        let notice = match err {
            PresetError::EmptyName => Notice::EmptyName,
            PresetError::NotFound(name) => Notice::NotFound(name),
            PresetError::Corrupt(e) => Notice::StorageFailed(e.to_string()),
            PresetError::Storage(reason) => Notice::StorageFailed(reason),
        };
        log::warn!("[app] {}", notice);
        self.surface.notify(notice);
    }
}
