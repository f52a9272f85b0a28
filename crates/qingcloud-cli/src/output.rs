//! Response rendering.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Re-indents a JSON body with four spaces, keeping key order. Bodies that
/// are not JSON come back verbatim (lossily decoded).
pub fn pretty_json(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return String::from_utf8_lossy(body).into_owned();
    };

    let mut out = Vec::with_capacity(body.len() * 2);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
