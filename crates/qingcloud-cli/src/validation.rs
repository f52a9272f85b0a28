//! Accepted values for fields the API only takes from fixed lists.

use std::fmt::{Debug, Display};

use qingcloud::QingCloudError;

pub const VALID_ZONES: &[&str] = &["pek3", "pek3a", "sh1a", "gd2", "ap2a"];
pub const VALID_INSTANCE_CLASSES: &[&str] = &["0", "1", "101", "201"];
pub const VALID_CPU_NUMBERS: &[i64] = &[1, 2, 4, 8, 6];
pub const VALID_MEMORY_SIZES: &[i64] = &[1024, 2048, 4096, 6144, 8192, 12288, 16384, 24576, 32768];
pub const VALID_INSTANCE_TYPES: &[&str] = &[
    "c1m1", "c1m2", "c1m4", "c2m2", "c2m4", "c2m8", "c4m4", "c4m8", "c4m16",
];
pub const VALID_CPU_MODELS: &[&str] = &["Westmere", "SandyBridge", "IvyBridge", "Haswell", "Broadwell"];
pub const VALID_GPU_CLASSES: &[&str] = &["0", "1"];
pub const VALID_USERDATA_TYPES: &[&str] = &["plain", "exec", "tar"];

/// Fails with a validation error naming `field` unless `value` is listed.
pub fn ensure_one_of<T>(field: &str, value: &T, valid: &[T]) -> Result<(), QingCloudError>
where
    T: PartialEq + Debug + Display,
{
    if valid.contains(value) {
        Ok(())
    } else {
        Err(QingCloudError::validation(
            field,
            format!("'{value}' is invalid, must be one of {valid:?}"),
        ))
    }
}

/// Like [`ensure_one_of`], skipping the check for an empty value.
pub fn ensure_one_of_if_set(field: &str, value: &str, valid: &[&str]) -> Result<(), QingCloudError> {
    if value.is_empty() {
        return Ok(());
    }
    ensure_one_of(field, &value, valid)
}
