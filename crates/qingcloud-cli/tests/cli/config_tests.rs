use qingcloud::QingCloudError;
use qingcloud_cli::config::{ConfigFile, ConfigLoader, DEMO_CONFIG};
use test_log::test;

use super::test_utilities::TempConfig;

fn demo() -> ConfigFile {
    ConfigFile {
        qy_access_key_id: Some("QYACCESSKEYIDEXAMPLE".to_string()),
        qy_secret_access_key: Some("SECRETACCESSKEY".to_string()),
        zone: Some("pek3".to_string()),
    }
}

#[test]
fn yaml_file_loads() {
    let config = TempConfig::write(".qingcloud.yaml", DEMO_CONFIG).unwrap();
    assert_eq!(ConfigLoader::from_path(&config.path).unwrap(), demo());
}

#[test]
fn json_file_loads() {
    let json = r#"{"qy_access_key_id":"QYACCESSKEYIDEXAMPLE","qy_secret_access_key":"SECRETACCESSKEY","zone":"pek3"}"#;
    let config = TempConfig::write("creds.json", json).unwrap();
    assert_eq!(ConfigLoader::from_path(&config.path).unwrap(), demo());
}

#[test]
fn unknown_extension_falls_back_to_yaml() {
    let config = TempConfig::write("qingcloud.conf", DEMO_CONFIG).unwrap();
    assert_eq!(ConfigLoader::from_path(&config.path).unwrap(), demo());
}

#[test]
fn empty_file_is_an_empty_config() {
    let config = TempConfig::write(".qingcloud.yaml", "\n").unwrap();
    assert_eq!(ConfigLoader::from_path(&config.path).unwrap(), ConfigFile::default());
}

#[test]
fn malformed_file_is_rejected() {
    let config = TempConfig::write("broken.json", "{\"zone\": ").unwrap();
    let err = ConfigLoader::from_path(&config.path).unwrap_err();
    assert!(matches!(err, QingCloudError::InvalidConfiguration { .. }));
}

#[test]
fn explicit_path_must_exist() {
    let config = TempConfig::write(".qingcloud.yaml", DEMO_CONFIG).unwrap();
    let missing = config.dir.path().join("absent.yaml");
    assert!(ConfigLoader::load(Some(&missing)).is_err());
}

#[test]
fn default_names_found_in_home() {
    let config = TempConfig::write(".qingcloud.yml", DEMO_CONFIG).unwrap();
    assert_eq!(ConfigLoader::find_in(config.dir.path()), Some(config.path.clone()));

    let empty = tempfile::tempdir().unwrap();
    assert_eq!(ConfigLoader::find_in(empty.path()), None);
}
