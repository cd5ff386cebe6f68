use super::builder::default_config_contents;
use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_contents_parse_and_validate() {
    let config: Config = toml::from_str(&default_config_contents()).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.quote_url(), DEFAULT_QUOTE_URL);
    assert_eq!(config.location(), DEFAULT_LOCATION);
    assert_eq!(config.timezone(), None);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::default();
    assert_eq!(
        config.request_timeout(),
        std::time::Duration::from_secs(DEFAULT_REQUEST_TIMEOUT)
    );
}

#[test]
fn test_load_from_path_reads_all_fields() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"
quote_url = "http://localhost:8080/quote"
request_timeout = 3
location = "Lisbon, Portugal"
timezone = "Europe/Lisbon"
"#,
    );

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.quote_url(), "http://localhost:8080/quote");
    assert_eq!(config.request_timeout().as_secs(), 3);
    assert_eq!(config.location(), "Lisbon, Portugal");
    assert_eq!(config.timezone(), Some(chrono_tz::Europe::Lisbon));
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let config = Config {
        request_timeout: Some(MAXIMUM_REQUEST_TIMEOUT + 1),
        ..Config::default()
    };
    let error = validate_config(&config).unwrap_err().to_string();
    assert!(error.contains("request_timeout"), "{error}");

    let config = Config {
        quote_url: Some("ftp://quotes.example".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());

    let config = Config {
        location: Some("   ".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());

    let config = Config {
        timezone: Some("Nowhere/Special".to_string()),
        ..Config::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_unknown_keys_are_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = write_config(temp_dir.path(), "night_temp = 3300\n");
    assert!(load_from_path(&path).is_err());

    // The mode timer always follows the minute; there is no interval knob
    let path = write_config(temp_dir.path(), "tick_interval = 300\n");
    assert!(load_from_path(&path).is_err());
}

#[test]
#[serial]
fn test_load_creates_default_config() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("Config::load() failed: {e:?}");
    }
    let expected: Config = toml::from_str(&default_config_contents()).unwrap();
    assert_eq!(result.unwrap(), expected);
    assert!(config_path.exists());
}
