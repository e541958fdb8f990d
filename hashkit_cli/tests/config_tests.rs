//! Layered configuration loading
//!
//! Each test points a `ConfigManager` at its own temporary file. Tests that
//! touch environment variables use keys no other test reads.

use hashkit_cli::config::{AppConfig, ConfigManager};
use hashkit_cli::output::OutputFormat;
use hashkit_core::{HashAlgorithm, LetterCase};
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir, contents: Option<&str>) -> ConfigManager {
    let config_path = temp_dir.path().join("config.toml");
    if let Some(contents) = contents {
        fs::write(&config_path, contents).unwrap();
    }
    ConfigManager::with_path(config_path)
}

#[test]
fn test_defaults_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir, None);

    let config = manager.load().unwrap();
    assert_eq!(config.hashing.chunk_size, 4096);
    assert_eq!(config.hashing.letter_case, LetterCase::Lower);
    assert_eq!(config.default_algorithm().unwrap(), HashAlgorithm::MD5);
    assert_eq!(config.default_format().unwrap(), OutputFormat::Text);
}

#[test]
fn test_file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(
        &temp_dir,
        Some(
            r#"
[hashing]
chunk_size = 65536

[output]
default_algorithm = "sha-512"
default_format = "json"
"#,
        ),
    );

    let config = manager.load().unwrap();
    assert_eq!(config.hashing.chunk_size, 65536);
    // Unset keys keep their defaults
    assert_eq!(config.hashing.progress_capacity, 100);
    assert!(config.output.color_enabled);
    assert_eq!(config.default_algorithm().unwrap(), HashAlgorithm::SHA512);
    assert_eq!(config.default_format().unwrap(), OutputFormat::Json);
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let manager = create_test_config_manager(&temp_dir, Some("[hashing]\nchunk_size = 0\n"));
    assert!(manager.load().is_err());

    let manager = create_test_config_manager(
        &temp_dir,
        Some("[output]\ndefault_algorithm = \"whirlpool\"\n"),
    );
    let err = manager.load().unwrap_err();
    assert!(format!("{err:#}").contains("default_algorithm"));

    let manager =
        create_test_config_manager(&temp_dir, Some("[hashing]\nletter_case = \"mixed\"\n"));
    assert!(manager.load().is_err());
}

#[test]
fn test_get_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let manager =
        create_test_config_manager(&temp_dir, Some("[output]\nprogress_enabled = false\n"));

    assert_eq!(manager.get("output.progress_enabled").unwrap(), "false");
    assert_eq!(manager.get("hashing.chunk_size").unwrap(), "4096");
    assert!(manager.get("hashing.missing").is_err());
    assert!(manager.get("hashing.chunk_size.deeper").is_err());

    let items = manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(key, _)| key.as_str()).collect();
    assert!(keys.contains(&"hashing.letter_case"));
    assert!(keys.contains(&"output.default_format"));
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_toml_rendering_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir, None);

    let rendered = manager.to_toml_string().unwrap();
    let parsed: AppConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, manager.load().unwrap());
}

#[test]
fn test_cli_overrides() {
    let mut config = AppConfig::default();
    config.apply_cli_overrides(Some(1), true);
    assert_eq!(config.hashing.chunk_size, 1);
    assert_eq!(config.hashing.letter_case, LetterCase::Upper);

    let mut config = AppConfig::default();
    config.apply_cli_overrides(None, false);
    assert_eq!(config, AppConfig::default());
}
