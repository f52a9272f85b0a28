use clap::{Arg, Command};
use qingcloud::QingCloudError;
use qingcloud::binder::{Bindable, bind_flags};
use test_log::test;

use super::test_records::{LaunchRecord, MixedRecord, UnsupportedRecord};

fn find<'a>(command: &'a Command, name: &str) -> Option<&'a Arg> {
    command
        .get_arguments()
        .find(|arg| arg.get_id().as_str() == name)
}

#[test]
fn flags_carry_descriptor_metadata() {
    let surface = bind_flags::<LaunchRecord>(Command::new("test-cmd")).unwrap();
    let command = surface.command();

    let image = find(command, "image_id").expect("image_id flag");
    assert!(image.is_required_set());
    assert_eq!(
        image.get_help().map(ToString::to_string).as_deref(),
        Some("the image id you expected to create")
    );
    let image_field = surface.table().get("image_id").unwrap();
    assert_eq!(image_field.descriptor().default_value, Some("centos73x64"));

    for (name, help) in [
        ("load_15_min", "load"),
        ("volumes", "volumes"),
        ("auto_startup", "auto startup"),
    ] {
        let arg = find(command, name).unwrap_or_else(|| panic!("{name} flag"));
        assert!(!arg.is_required_set(), "{name} must not be required");
        assert_eq!(arg.get_help().map(ToString::to_string).as_deref(), Some(help));
    }
}

#[test]
fn cli_arguments_populate_record() {
    let surface = bind_flags::<LaunchRecord>(Command::new("test-cmd")).unwrap();
    let mut record = LaunchRecord::default();

    surface
        .try_parse_from(
            [
                "test-cmd",
                "--image_id=expImage123456",
                "--load_15_min=3",
                "--volumes=v1",
                "--volumes=v2",
                "--volumes=v3",
                "--volumes=v4",
                "--auto_startup=false",
            ],
            &mut record,
        )
        .unwrap();

    assert_eq!(record.image_id, "expImage123456");
    assert_eq!(record.load_15_min, 3);
    assert_eq!(record.volumes, vec!["v1", "v2", "v3", "v4"]);
    assert!(!record.auto_startup);
}

#[test]
fn missing_required_flag_is_rejected() {
    let surface = bind_flags::<LaunchRecord>(Command::new("test-cmd")).unwrap();
    let mut record = LaunchRecord::default();

    let err = surface
        .try_parse_from(["test-cmd", "--load_15_min=3"], &mut record)
        .unwrap_err();

    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert!(record.image_id.is_empty());
}

#[test]
fn unsupported_field_fails_binding() {
    let err = bind_flags::<UnsupportedRecord>(Command::new("test-cmd"))
        .err()
        .expect("binding must fail");

    assert_eq!(
        err,
        QingCloudError::UnsupportedFieldType {
            field: "unsupported_field".to_string(),
            kind: "i32".to_string(),
        }
    );
}

#[test]
fn unsupported_field_registers_no_flags() {
    let table = MixedRecord::field_table();
    assert_eq!(table.len(), 3);

    let result = qingcloud::binder::build_args(&table);
    assert!(matches!(
        result,
        Err(QingCloudError::UnsupportedFieldType { ref field, .. }) if field == "ratio"
    ));

    // the original command never sees a partial flag set
    let command = Command::new("test-cmd");
    assert!(bind_flags::<MixedRecord>(command.clone()).is_err());
    assert_eq!(command.get_arguments().count(), 0);
}
