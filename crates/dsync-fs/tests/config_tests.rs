use dsync_fs::{ConfigStore, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "name = \"test\"\ncount = 42").unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config.name, "test");
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, r#"{"name": "test", "count": 42}"#).unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_yml_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.YML");
    fs::write(&file_path, "name: test\ncount: 42").unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config.count, 42);
}

#[test]
fn test_load_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let result: dsync_fs::Result<TestConfig> =
        ConfigStore::new().load(&temp.path().join("absent.toml"));

    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, "{ not json").unwrap();

    let result: dsync_fs::Result<TestConfig> = ConfigStore::new().load(&file_path);

    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "JSON"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_unsupported_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.xyz");
    fs::write(&file_path, "data").unwrap();

    let result: dsync_fs::Result<TestConfig> = ConfigStore::new().load(&file_path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_roundtrip_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");

    let original = TestConfig { name: "roundtrip".into(), count: 123 };
    let store = ConfigStore::new();

    store.save(&file_path, &original).unwrap();
    let loaded: TestConfig = store.load(&file_path).unwrap();

    assert_eq!(original, loaded);
}
