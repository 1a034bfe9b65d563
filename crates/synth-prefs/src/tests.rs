use crate::{PreferenceStore, Theme, UserPreferences, SIDEBAR_KEY, THEME_KEY};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("synth-prefs-{}", Uuid::new_v4()))
        .join("prefs.json")
}

#[test]
fn missing_file_yields_defaults() {
    let store = PreferenceStore::open(scratch_path());
    assert_eq!(store.preferences(), UserPreferences::default());
    assert_eq!(store.theme(), Theme::Dark);
    assert!(store.sidebar_open());
}

#[test]
fn preferences_survive_reopen() {
    let path = scratch_path();
    let mut store = PreferenceStore::open(&path);
    store.set_theme(Theme::Light).expect("write theme");
    store.set_sidebar_open(false).expect("write sidebar");

    let reopened = PreferenceStore::open(&path);
    assert_eq!(reopened.theme(), Theme::Light);
    assert!(!reopened.sidebar_open());
    let _ = fs::remove_dir_all(path.parent().expect("has parent"));
}

#[test]
fn garbage_values_fall_back_to_defaults() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    let raw = format!(r#"{{"{THEME_KEY}": "neon", "{SIDEBAR_KEY}": "maybe"}}"#);
    fs::write(&path, raw).expect("seed file");

    let store = PreferenceStore::open(&path);
    assert_eq!(store.theme(), Theme::Dark);
    assert!(store.sidebar_open());
    let _ = fs::remove_dir_all(path.parent().expect("has parent"));
}

#[test]
fn corrupt_file_opens_empty() {
    let path = scratch_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(&path, "not json at all").expect("seed file");

    let store = PreferenceStore::open(&path);
    assert_eq!(store.preferences(), UserPreferences::default());
    let _ = fs::remove_dir_all(path.parent().expect("has parent"));
}

#[test]
fn clear_all_forgets_stored_values() {
    let path = scratch_path();
    let mut store = PreferenceStore::open(&path);
    store.set_theme(Theme::Light).expect("write theme");
    store.clear_all().expect("clear");
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(PreferenceStore::open(&path).theme(), Theme::Dark);
    let _ = fs::remove_dir_all(path.parent().expect("has parent"));
}

#[test]
fn temp_dir_is_writable() {
    let path = scratch_path();
    let store = PreferenceStore::open(&path);
    assert!(store.is_available());
    let _ = fs::remove_dir_all(path.parent().expect("has parent"));
}
