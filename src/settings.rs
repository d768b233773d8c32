//! Runtime configuration: optional JSON file plus environment overrides.
//!
//! `TETRIS_CONFIG` names a JSON file holding any subset of
//! [`GameConfig`](crate::core::GameConfig) fields. Individual fields can then
//! be overridden with `TETRIS_BOARD_WIDTH`, `TETRIS_BOARD_HEIGHT`,
//! `TETRIS_DROP_MS`, `TETRIS_TARGET_TIMEOUT_MS`, `TETRIS_TARGET_MODE` and
//! `TETRIS_SEED`.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::core::GameConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Load configuration from the process environment.
pub fn load() -> Result<GameConfig, SettingsError> {
    let path = std::env::var("TETRIS_CONFIG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    load_with(path.as_deref().map(Path::new), |key| std::env::var(key).ok())
}

/// Load from an optional file, then apply overrides from `lookup`.
pub fn load_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<GameConfig, SettingsError> {
    let mut config = match path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    if let Some(v) = parse_var(&lookup, "TETRIS_BOARD_WIDTH")? {
        config.board_width = v;
    }
    if let Some(v) = parse_var(&lookup, "TETRIS_BOARD_HEIGHT")? {
        config.board_height = v;
    }
    if let Some(v) = parse_var(&lookup, "TETRIS_DROP_MS")? {
        config.drop_interval_ms = v;
    }
    if let Some(v) = parse_var(&lookup, "TETRIS_TARGET_TIMEOUT_MS")? {
        config.target_timeout_ms = v;
    }
    if let Some(raw) = lookup("TETRIS_TARGET_MODE") {
        config.target_mode = parse_flag("TETRIS_TARGET_MODE", &raw)?;
    }
    if let Some(v) = parse_var(&lookup, "TETRIS_SEED")? {
        config.seed = Some(v);
    }

    config.validate().map_err(SettingsError::Invalid)?;
    Ok(config)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, SettingsError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| SettingsError::Invalid(format!("{key}={raw:?}")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(SettingsError::Invalid(format!("{key}={raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = load_with(None, env(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn env_overrides_apply() {
        let config = load_with(
            None,
            env(&[
                ("TETRIS_BOARD_WIDTH", "12"),
                ("TETRIS_DROP_MS", "350"),
                ("TETRIS_TARGET_MODE", "off"),
                ("TETRIS_SEED", "77"),
            ]),
        )
        .unwrap();
        assert_eq!(config.board_width, 12);
        assert_eq!(config.drop_interval_ms, 350);
        assert!(!config.target_mode);
        assert_eq!(config.seed, Some(77));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = load_with(None, env(&[("TETRIS_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = load_with(None, env(&[("TETRIS_BOARD_WIDTH", "3")])).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = load_with(None, env(&[("TETRIS_TARGET_MODE", "maybe")])).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn file_then_env() {
        let path = std::env::temp_dir().join(format!("target-tetris-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"board_height": 24, "target_timeout_ms": 2500}}"#).unwrap();
        drop(file);

        let config = load_with(Some(path.as_path()), env(&[("TETRIS_BOARD_HEIGHT", "30")])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.board_height, 30);
        assert_eq!(config.target_timeout_ms, 2500);
        assert_eq!(config.board_width, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_with(Some(Path::new("/nonexistent/target-tetris.json")), env(&[])).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
