use qingcloud::QingCloudError;
use qingcloud::binder::{bind_parameters, bind_parameters_into};
use qingcloud::query::ParameterSet;
use test_log::test;

use super::test_records::{LaunchRecord, MixedRecord, SentinelRecord};

#[test]
fn record_values_become_parameters() {
    let record = SentinelRecord {
        image_id: "centos73x64".to_string(),
        load_15_min: 2,
        volumes: vec!["v1".to_string(), "v2".to_string(), "v3".to_string()],
        auto_startup: true,
        negative_field: -2,
    };

    let params = bind_parameters(&record).unwrap();

    assert_eq!(params.get("image_id"), Some("centos73x64"));
    assert_eq!(params.get("load_15_min"), Some("2"));
    assert_eq!(params.get("auto_startup"), Some("1"));
    for (index, volume) in record.volumes.iter().enumerate() {
        assert_eq!(params.get(&format!("volumes.{}", index + 1)), Some(volume.as_str()));
    }
    assert!(!params.contains_key("negative_field"));
}

#[test]
fn zero_values_are_sparse() {
    let params = bind_parameters(&SentinelRecord::default()).unwrap();

    assert!(!params.contains_key("image_id"));
    assert!(!params.contains_key("load_15_min"));
    assert!(!params.contains_key("negative_field"));
    assert!(params.keys().all(|key| !key.starts_with("volumes")));
    assert_eq!(params.get("auto_startup"), Some("0"));
    assert_eq!(params.len(), 1);
}

#[test]
fn list_keys_are_contiguous_and_ordered() {
    let volumes: Vec<String> = ["vol-c", "vol-a", "vol-b", "vol-a"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let record = LaunchRecord {
        volumes: volumes.clone(),
        ..LaunchRecord::default()
    };

    let params = bind_parameters(&record).unwrap();
    let list_keys: Vec<&str> = params
        .keys()
        .filter(|key| key.starts_with("volumes."))
        .collect();

    assert_eq!(list_keys, vec!["volumes.1", "volumes.2", "volumes.3", "volumes.4"]);
    for (index, volume) in volumes.iter().enumerate() {
        assert_eq!(params.get_all(&format!("volumes.{}", index + 1)), [volume.clone()]);
    }
}

#[test]
fn unsupported_field_discards_partial_set() {
    let record = MixedRecord {
        name: "web".to_string(),
        ratio: 0.5,
        count: 3,
    };
    let mut params: ParameterSet = [("action", "RunInstances")].into_iter().collect();

    let err = bind_parameters_into(&record, &mut params).unwrap_err();

    assert_eq!(
        err,
        QingCloudError::UnsupportedFieldType {
            field: "ratio".to_string(),
            kind: "f64".to_string(),
        }
    );
    assert_eq!(params.len(), 1);
    assert!(!params.contains_key("name"));
}
