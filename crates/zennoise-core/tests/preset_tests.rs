// Preset store contract: list/save/load/delete over an in-memory key-value store.

use zennoise_core::presets::{KeyValueStore, MemoryStore, PresetStore};
use zennoise_core::{ParsePolicy, PresetConfig, PresetError, Settings, PRESET_STORAGE_KEY};

fn store() -> PresetStore<MemoryStore> {
    PresetStore::new(MemoryStore::default(), PresetConfig::default())
}

fn strict_store() -> PresetStore<MemoryStore> {
    PresetStore::new(
        MemoryStore::default(),
        PresetConfig {
            policy: ParsePolicy::Strict,
            ..PresetConfig::default()
        },
    )
}

fn storm() -> Settings {
    Settings {
        rain_vol: 0.85,
        rain_damp: 2900.0,
        wind_vol: 0.6,
        wind_rate: 1.4,
        pad_vol: 0.1,
        pad_freq: 92.5,
    }
}

#[test]
fn empty_storage_lists_nothing() {
    assert!(store().list().unwrap().is_empty());
}

#[test]
fn save_then_list_contains_entry() {
    let mut s = store();
    let listed = s.save("storm", &storm()).unwrap();
    assert_eq!(listed.get("storm"), Some(&storm()));
    assert_eq!(s.list().unwrap().get("storm"), Some(&storm()));
}

#[test]
fn save_overwrites_existing_name() {
    let mut s = store();
    s.save("a", &Settings::default()).unwrap();
    s.save("a", &storm()).unwrap();
    let map = s.list().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"], storm());
}

#[test]
fn delete_then_list_lacks_entry() {
    let mut s = store();
    s.save("a", &storm()).unwrap();
    s.save("b", &Settings::default()).unwrap();
    let listed = s.delete("a").unwrap();
    assert!(!listed.contains_key("a"));
    assert!(listed.contains_key("b"));
    assert!(!s.list().unwrap().contains_key("a"));
}

#[test]
fn empty_name_is_rejected_without_writing() {
    let mut s = store();
    assert!(matches!(
        s.save("", &storm()),
        Err(PresetError::EmptyName)
    ));
    assert!(matches!(
        s.save("   ", &storm()),
        Err(PresetError::EmptyName)
    ));
    assert!(s.storage().entries.is_empty());
    assert!(s.list().unwrap().is_empty());
}

#[test]
fn delete_rejects_empty_and_missing_names() {
    let mut s = store();
    s.save("keep", &storm()).unwrap();
    assert!(matches!(s.delete(""), Err(PresetError::EmptyName)));
    match s.delete("gone") {
        Err(PresetError::NotFound(name)) => assert_eq!(name, "gone"),
        other => panic!("expected NotFound, got {:?}", other.map(|m| m.len())),
    }
    assert!(s.list().unwrap().contains_key("keep"));
}

#[test]
fn load_returns_settings_or_not_found() {
    let mut s = store();
    s.save("storm", &storm()).unwrap();
    assert_eq!(s.load("storm").unwrap(), storm());
    assert!(matches!(s.load("nonexistent"), Err(PresetError::NotFound(_))));
}

#[test]
fn corrupt_json_fails_open_to_empty() {
    let mut s = store();
    s.storage_mut().set(PRESET_STORAGE_KEY, "{not json").unwrap();
    assert!(s.list().unwrap().is_empty());
    assert!(s.names().unwrap().is_empty());
}

#[test]
fn wrong_shape_fails_open_to_empty() {
    let mut s = store();
    s.storage_mut()
        .set(PRESET_STORAGE_KEY, r#"{"a": {"rainVol": "loud"}}"#)
        .unwrap();
    assert!(s.list().unwrap().is_empty());
}

#[test]
fn strict_policy_surfaces_corruption() {
    let mut s = strict_store();
    assert_eq!(s.policy(), ParsePolicy::Strict);
    s.storage_mut().set(PRESET_STORAGE_KEY, "[1, 2").unwrap();
    assert!(matches!(s.list(), Err(PresetError::Corrupt(_))));
    assert!(matches!(s.save("x", &storm()), Err(PresetError::Corrupt(_))));
}

#[test]
fn save_over_corrupt_store_replaces_it_when_failing_open() {
    let mut s = store();
    s.storage_mut().set(PRESET_STORAGE_KEY, "garbage").unwrap();
    s.save("fresh", &storm()).unwrap();
    assert_eq!(s.names().unwrap(), vec!["fresh".to_string()]);
}

#[test]
fn mutations_keep_entries_written_elsewhere() {
    let mut s = store();
    s.save("mine", &Settings::default()).unwrap();

    // Another tab rewrites the blob with an extra preset
    let mut other = s.list().unwrap();
    other.insert("theirs".to_string(), storm());
    let raw = serde_json::to_string(&other).unwrap();
    s.storage_mut().set(PRESET_STORAGE_KEY, &raw).unwrap();

    let listed = s.save("later", &storm()).unwrap();
    assert_eq!(
        listed.keys().cloned().collect::<Vec<_>>(),
        vec!["later", "mine", "theirs"]
    );
}

#[test]
fn reads_blob_written_by_hand() {
    let mut s = store();
    let raw = r#"{"dusk":{"rainVol":0.2,"rainDamp":800,"windVol":0.3,"windRate":0.1,"padVol":0.5,"padFreq":146.8}}"#;
    s.storage_mut().set(PRESET_STORAGE_KEY, raw).unwrap();
    let dusk = s.load("dusk").unwrap();
    assert_eq!(dusk.rain_damp, 800.0);
    assert!((dusk.pad_freq - 146.8).abs() < 1e-4);
}
