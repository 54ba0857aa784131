use super::{load_settings_with_env, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(label: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("artworks_browser_{label}_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("browser.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_with_env(Path::new("/nonexistent/browser.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.api_base_url, "https://api.artic.edu/api/v1");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "file_values",
        "api_base_url = \"http://localhost:9000/api/v1\"\nstart_page = 4\nrequest_timeout_secs = 0\n",
    );

    let settings = load_settings_with_env(&path, no_env);
    assert_eq!(settings.api_base_url, "http://localhost:9000/api/v1");
    assert_eq!(settings.start_page, 4);
    assert_eq!(settings.request_timeout(), None);
    assert_eq!(settings.column_width, Settings::default().column_width);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_settings_file("env_overrides", "start_page = 4\ncolumn_width = 40\n");
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ARTWORKS_API_URL", "http://legacy.example/api/v1"),
        ("APP__API_BASE_URL", "http://mirror.example/api/v1"),
        ("APP__START_PAGE", "9"),
        ("APP__COLUMN_WIDTH", "not-a-number"),
    ]);

    let settings = load_settings_with_env(&path, |key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(settings.api_base_url, "http://mirror.example/api/v1");
    assert_eq!(settings.start_page, 9);
    assert_eq!(settings.column_width, 40);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unreadable_file_is_ignored() {
    let path = temp_settings_file("unreadable", "start_page = \"first\"\n");

    let settings = load_settings_with_env(&path, no_env);
    assert_eq!(settings, Settings::default());

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
