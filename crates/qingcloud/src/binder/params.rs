//! Builds query parameters from a record's current field values.

use super::field::{Bindable, FieldTable, Slot};
use crate::error::QingCloudError;
use crate::query::ParameterSet;
use crate::trace;

/// Reads every bound field of `record` into a new parameter set.
///
/// Empty text, integers `<= 0` and empty lists are left out; callers use
/// those values (including negative sentinels) to mean "not set". Booleans
/// are always sent, as `1` or `0`. A list `name` becomes `name.1 … name.N`.
pub fn bind_parameters<R: Bindable>(record: &R) -> Result<ParameterSet, QingCloudError> {
    bind_table(&R::field_table(), record)
}

/// Like [`bind_parameters`], merging into `params` only when every field
/// bound successfully.
pub fn bind_parameters_into<R: Bindable>(
    record: &R,
    params: &mut ParameterSet,
) -> Result<(), QingCloudError> {
    let bound = bind_parameters(record)?;
    params.extend_from(bound);
    Ok(())
}

pub fn bind_table<R>(table: &FieldTable<R>, record: &R) -> Result<ParameterSet, QingCloudError> {
    table.ensure_supported()?;

    let mut params = ParameterSet::new();
    for field in table {
        let name = field.wire_name();
        match field.slot {
            Slot::Text { get, .. } => {
                let value = get(record);
                if !value.is_empty() {
                    params.add(name, value);
                }
            }
            Slot::Integer { get, .. } => {
                let value = get(record);
                if value > 0 {
                    params.add(name, value.to_string());
                }
            }
            Slot::Boolean { get, .. } => {
                params.add(name, if get(record) { "1" } else { "0" });
            }
            Slot::TextList { get, .. } => {
                for (index, value) in get(record).into_iter().enumerate() {
                    params.add(format!("{name}.{}", index + 1), value);
                }
            }
            Slot::Unsupported { .. } => {}
        }
    }
    trace!("Bound {} query parameters", params.len());
    Ok(params)
}
