//! Tests for configuration loading.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use tempfile::TempDir;
use vision_form::config::{ClientConfig, ConfigFile, BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
use vision_form::error::FormError;
use vision_form::types::Endpoint;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 2] = [BASE_URL_ENV, TIMEOUT_ENV];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> EnvGuard {
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    guard
}

#[test]
fn defaults_have_no_timeout() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.timeout(), None);
    assert_eq!(
        config.endpoint_url(Endpoint::GenerateCaption).unwrap(),
        "http://127.0.0.1:5000/generate_caption"
    );
}

#[test]
fn load_reads_explicit_file() {
    let _lock = env_lock_guard();
    let _env = clean_env();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vision-form.toml");
    std::fs::write(&path, "base_url = \"http://gpu-box:8080\"\ntimeout_secs = 45\n").unwrap();

    let config = ClientConfig::load(Some(&path)).unwrap();
    assert_eq!(config.base_url(), "http://gpu-box:8080");
    assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
}

#[test]
fn env_wins_over_file() {
    let _lock = env_lock_guard();
    let _env = clean_env();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vision-form.toml");
    std::fs::write(&path, "base_url = \"http://from-file:1\"\n").unwrap();
    std::env::set_var(BASE_URL_ENV, "http://from-env:2");
    std::env::set_var(TIMEOUT_ENV, "3");

    let config = ClientConfig::load(Some(&path)).unwrap();
    assert_eq!(config.base_url(), "http://from-env:2");
    assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let _lock = env_lock_guard();
    let _env = clean_env();

    let dir = TempDir::new().unwrap();
    let err = ClientConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, FormError::Io(_)));
}

#[test]
fn malformed_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

    let err = ConfigFile::read(&path).unwrap_err();
    assert!(matches!(err, FormError::Configuration(msg) if msg.contains("broken.toml")));
}

#[test]
fn code_overrides_apply_last() {
    let config = ClientConfig::default()
        .with_base_url("http://override:9")
        .with_timeout(Some(Duration::from_millis(750)));
    assert_eq!(config.base_url(), "http://override:9");
    assert_eq!(config.timeout(), Some(Duration::from_millis(750)));
}
