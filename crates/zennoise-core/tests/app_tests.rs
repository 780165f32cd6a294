// End-to-end behaviour of the app facade with mock host, storage and controls.

use std::cell::Cell;

use rand::rngs::StdRng;
use rand::SeedableRng;
use zennoise_core::graph::{ParamKind, Role};
use zennoise_core::mock::{MockHost, MockSurface};
use zennoise_core::presets::{KeyValueStore, MemoryStore};
use zennoise_core::{
    ControlSurface, EngineConfig, Notice, Param, ParsePolicy, PlaybackStatus, PresetConfig,
    PresetResult, SessionState, Settings, StartOutcome, ZenNoise, PRESET_STORAGE_KEY,
};

type App = ZenNoise<MockHost, MemoryStore, MockSurface>;

fn app_with(storage: MemoryStore, preset_config: PresetConfig) -> App {
    ZenNoise::new(
        MockHost::default(),
        storage,
        MockSurface::default(),
        EngineConfig::default(),
        preset_config,
        9,
    )
}

fn app() -> App {
    app_with(MemoryStore::default(), PresetConfig::default())
}

fn dusk() -> Settings {
    Settings {
        rain_vol: 0.2,
        rain_damp: 800.0,
        wind_vol: 0.35,
        wind_rate: 0.1,
        pad_vol: 0.5,
        pad_freq: 146.0,
    }
}

#[test]
fn starts_stopped_with_empty_preset_list() {
    let a = app();
    assert_eq!(a.surface().status, Some(PlaybackStatus::Stopped));
    assert!(a.surface().presets.is_empty());
    assert_eq!(a.current_settings(), Settings::default());
}

#[test]
fn apply_then_read_round_trips() {
    let mut a = app();
    a.apply_settings(&dusk());
    assert_eq!(a.current_settings(), dusk());

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let s = Settings::random(&mut rng);
        a.apply_settings(&s);
        assert_eq!(a.current_settings(), s);
    }
}

#[test]
fn play_and_stop_drive_status() {
    let mut a = app();
    assert_eq!(a.play(), Some(StartOutcome::Started));
    assert_eq!(a.surface().status, Some(PlaybackStatus::Playing));

    let token = a.stop().expect("teardown token");
    // Still playing until the fade delay elapses
    assert_eq!(a.status(), PlaybackStatus::Playing);
    assert_eq!(a.surface().status, Some(PlaybackStatus::Playing));

    a.controller_mut().host_mut().advance(token.delay.as_secs_f64());
    assert!(a.finish_stop(token));
    assert_eq!(a.surface().status, Some(PlaybackStatus::Stopped));
    assert_eq!(a.state(), SessionState::Idle);
}

#[test]
fn double_play_keeps_one_session() {
    let mut a = app();
    a.play();
    assert_eq!(a.play(), Some(StartOutcome::AlreadyPlaying));
    assert_eq!(a.controller().host().nodes.len(), 12);
    assert_eq!(a.controller().host().running_sources(), 4);
}

#[test]
fn stop_when_idle_changes_nothing() {
    let mut a = app();
    assert!(a.stop().is_none());
    assert_eq!(a.surface().status, Some(PlaybackStatus::Stopped));
    assert!(a.surface().notices.is_empty());
}

#[test]
fn session_starts_from_current_controls() {
    let mut a = app();
    a.apply_settings(&dusk());
    a.play();
    let session = a.controller().session().unwrap();
    let filter = *session.rain.node(Role::Filter).unwrap();
    let osc = *session.pad.node(Role::Source).unwrap();
    assert_eq!(a.controller().host().value(&filter, ParamKind::Frequency), 800.0);
    assert_eq!(a.controller().host().value(&osc, ParamKind::Frequency), 146.0);
}

#[test]
fn control_change_reaches_live_session() {
    let mut a = app();
    a.play();
    a.controller_mut().host_mut().advance(3.0);
    a.surface_mut().set_value(Param::RainDamp, 2000.0);
    a.param_changed();
    a.controller_mut().host_mut().advance(2.0);

    let filter = *a.controller().session().unwrap().rain.node(Role::Filter).unwrap();
    let cutoff = a.controller().host().value(&filter, ParamKind::Frequency);
    assert!((cutoff - 2000.0).abs() < 0.5, "cutoff {cutoff}");
}

#[test]
fn randomize_stays_in_documented_ranges() {
    let mut a = app();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let s = a.randomize(&mut rng);
        assert_eq!(a.current_settings(), s);
        assert!(s.rain_vol >= 0.15 && s.rain_vol <= 0.85);
        assert!(s.rain_damp >= 400.0 && s.rain_damp <= 3000.0);
        assert!(s.wind_vol >= 0.05 && s.wind_vol <= 0.65);
        assert!(s.wind_rate >= 0.05 && s.wind_rate <= 1.55);
        assert!(s.pad_vol >= 0.05 && s.pad_vol <= 0.65);
        assert!(s.pad_freq >= 80.0 && s.pad_freq <= 440.0);
    }
}

#[test]
fn randomize_while_playing_retargets_session() {
    let mut a = app();
    a.play();
    let mut rng = StdRng::seed_from_u64(12);
    let s = a.randomize(&mut rng);
    let lfo = *a.controller().session().unwrap().wind.node(Role::Lfo).unwrap();
    assert_eq!(a.controller().host().value(&lfo, ParamKind::Frequency), s.wind_rate);
}

#[test]
fn save_and_delete_refresh_displayed_list() {
    let mut a = app();
    a.apply_settings(&dusk());
    assert!(a.save_preset("dusk"));
    assert_eq!(a.surface().presets, vec!["dusk".to_string()]);
    assert_eq!(
        a.surface().notices.last(),
        Some(&Notice::Saved("dusk".to_string()))
    );

    assert!(a.delete_preset("dusk"));
    assert!(a.surface().presets.is_empty());
}

#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    reads: Cell<usize>,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PresetResult<()> {
        self.inner.set(key, value)
    }
}

#[test]
fn save_and_delete_show_the_list_they_reread() {
    let mut a = ZenNoise::new(
        MockHost::default(),
        CountingStore::default(),
        MockSurface::default(),
        EngineConfig::default(),
        PresetConfig::default(),
        4,
    );
    let reads = |a: &ZenNoise<MockHost, CountingStore, MockSurface>| a.presets().storage().reads.get();

    let before = reads(&a);
    assert!(a.save_preset("dusk"));
    assert_eq!(reads(&a) - before, 2);
    assert_eq!(a.surface().presets, vec!["dusk".to_string()]);

    let before = reads(&a);
    assert!(a.delete_preset("dusk"));
    assert_eq!(reads(&a) - before, 2);
    assert!(a.surface().presets.is_empty());
}

#[test]
fn save_with_empty_name_prompts_and_keeps_list() {
    let mut a = app();
    assert!(a.save_preset("keep"));
    assert!(!a.save_preset(""));
    assert_eq!(a.surface().notices.last(), Some(&Notice::EmptyName));
    assert_eq!(a.surface().presets, vec!["keep".to_string()]);
    assert_eq!(a.presets().names().unwrap(), vec!["keep".to_string()]);
}

#[test]
fn load_missing_preset_leaves_controls_alone() {
    let mut a = app();
    a.apply_settings(&dusk());
    assert_eq!(a.load_preset("nonexistent"), None);
    assert_eq!(
        a.surface().notices.last(),
        Some(&Notice::NotFound("nonexistent".to_string()))
    );
    assert_eq!(a.current_settings(), dusk());
}

#[test]
fn delete_missing_preset_notifies() {
    let mut a = app();
    assert!(!a.delete_preset("ghost"));
    assert_eq!(
        a.surface().notices.last(),
        Some(&Notice::NotFound("ghost".to_string()))
    );
}

#[test]
fn load_applies_preset_to_controls() {
    let mut a = app();
    a.apply_settings(&dusk());
    a.save_preset("dusk");
    a.apply_settings(&Settings::default());
    assert_eq!(a.load_preset("dusk"), Some(dusk()));
    assert_eq!(a.current_settings(), dusk());
}

#[test]
fn load_clamps_out_of_range_values() {
    let mut storage = MemoryStore::default();
    let raw = r#"{"loud":{"rainVol":3.0,"rainDamp":1000,"windVol":0.2,"windRate":0.2,"padVol":0.2,"padFreq":5000}}"#;
    storage.set(PRESET_STORAGE_KEY, raw).unwrap();
    let mut a = app_with(storage, PresetConfig::default());
    assert_eq!(a.surface().presets, vec!["loud".to_string()]);

    let s = a.load_preset("loud").unwrap();
    assert_eq!(s.rain_vol, 1.0);
    assert_eq!(s.pad_freq, 880.0);
    assert_eq!(a.current_settings(), s);
}

#[test]
fn corrupt_storage_shows_empty_list_without_notice() {
    let mut storage = MemoryStore::default();
    storage.set(PRESET_STORAGE_KEY, "{{{").unwrap();
    let a = app_with(storage, PresetConfig::default());
    assert!(a.surface().presets.is_empty());
    assert!(a.surface().notices.is_empty());
}

#[test]
fn strict_policy_reports_corruption_on_save() {
    let mut storage = MemoryStore::default();
    storage.set(PRESET_STORAGE_KEY, "{{{").unwrap();
    let mut a = app_with(
        storage,
        PresetConfig {
            policy: ParsePolicy::Strict,
            ..PresetConfig::default()
        },
    );
    assert!(a.surface().presets.is_empty());
    assert!(!a.save_preset("x"));
    assert!(matches!(
        a.surface().notices.last(),
        Some(Notice::StorageFailed(_))
    ));
}

#[test]
fn audio_failure_is_reported() {
    let mut host = MockHost::default();
    host.fail_create = Some("gain");
    let mut a = ZenNoise::new(
        host,
        MemoryStore::default(),
        MockSurface::default(),
        EngineConfig::default(),
        PresetConfig::default(),
        1,
    );
    assert_eq!(a.play(), None);
    assert!(matches!(
        a.surface().notices.last(),
        Some(Notice::AudioFailed(_))
    ));
    assert_eq!(a.surface().status, Some(PlaybackStatus::Stopped));
}
