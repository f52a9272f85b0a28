//! Field tables: one declaration per record drives both the flag surface and
//! the query parameters.

use crate::error::QingCloudError;
use crate::warn;

/// The value shapes the binder knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    TextList,
    /// Declared in a table, but of a Rust type with no flag or wire mapping.
    Unsupported(&'static str),
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "String",
            FieldKind::Integer => "i64",
            FieldKind::Boolean => "bool",
            FieldKind::TextList => "Vec<String>",
            FieldKind::Unsupported(name) => *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Flag name and query key.
    pub wire_name: &'static str,
    pub required: bool,
    /// Coerced to the field's kind when flags are bound.
    pub default_value: Option<&'static str>,
    pub help: &'static str,
    /// Shell completion suggestions. Values outside the list still parse.
    pub candidates: Vec<String>,
}

pub(crate) enum Slot<R> {
    Text {
        get: fn(&R) -> String,
        set: fn(&mut R, String),
    },
    Integer {
        get: fn(&R) -> i64,
        set: fn(&mut R, i64),
    },
    Boolean {
        get: fn(&R) -> bool,
        set: fn(&mut R, bool),
    },
    TextList {
        get: fn(&R) -> Vec<String>,
        set: fn(&mut R, Vec<String>),
    },
    Unsupported {
        type_name: &'static str,
    },
}

pub struct Field<R> {
    descriptor: FieldDescriptor,
    pub(crate) slot: Slot<R>,
}

impl<R> Field<R> {
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn wire_name(&self) -> &'static str {
        self.descriptor.wire_name
    }

    pub fn kind(&self) -> FieldKind {
        match self.slot {
            Slot::Text { .. } => FieldKind::Text,
            Slot::Integer { .. } => FieldKind::Integer,
            Slot::Boolean { .. } => FieldKind::Boolean,
            Slot::TextList { .. } => FieldKind::TextList,
            Slot::Unsupported { type_name } => FieldKind::Unsupported(type_name),
        }
    }

    /// Descriptor default for text fields, empty when unset.
    pub fn text_default(&self) -> String {
        self.descriptor.default_value.unwrap_or_default().to_string()
    }

    pub fn integer_default(&self) -> i64 {
        self.descriptor
            .default_value
            .map(|text| parse_integer_default(self.descriptor.wire_name, text))
            .unwrap_or(0)
    }

    pub fn boolean_default(&self) -> bool {
        self.descriptor.default_value.is_some_and(boolean_default)
    }
}

/// Ordered field declarations for a record type `R`.
///
/// `required`, `default_value` and `candidates` apply to the most recently
/// declared field.
pub struct FieldTable<R> {
    fields: Vec<Field<R>>,
}

impl<R> Default for FieldTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FieldTable<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn push(mut self, wire_name: &'static str, help: &'static str, slot: Slot<R>) -> Self {
        self.fields.push(Field {
            descriptor: FieldDescriptor {
                wire_name,
                required: false,
                default_value: None,
                help,
                candidates: Vec::new(),
            },
            slot,
        });
        self
    }

    pub fn text(
        self,
        wire_name: &'static str,
        help: &'static str,
        get: fn(&R) -> String,
        set: fn(&mut R, String),
    ) -> Self {
        self.push(wire_name, help, Slot::Text { get, set })
    }

    pub fn integer(
        self,
        wire_name: &'static str,
        help: &'static str,
        get: fn(&R) -> i64,
        set: fn(&mut R, i64),
    ) -> Self {
        self.push(wire_name, help, Slot::Integer { get, set })
    }

    pub fn boolean(
        self,
        wire_name: &'static str,
        help: &'static str,
        get: fn(&R) -> bool,
        set: fn(&mut R, bool),
    ) -> Self {
        self.push(wire_name, help, Slot::Boolean { get, set })
    }

    pub fn text_list(
        self,
        wire_name: &'static str,
        help: &'static str,
        get: fn(&R) -> Vec<String>,
        set: fn(&mut R, Vec<String>),
    ) -> Self {
        self.push(wire_name, help, Slot::TextList { get, set })
    }

    /// Declares a field of type `T` that the binder will refuse.
    pub fn unsupported<T: ?Sized>(self, wire_name: &'static str, help: &'static str) -> Self {
        self.push(
            wire_name,
            help,
            Slot::Unsupported {
                type_name: std::any::type_name::<T>(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.descriptor.required = true;
        }
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.descriptor.default_value = Some(value);
        }
        self
    }

    pub fn candidates<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        if let Some(field) = self.fields.last_mut() {
            field.descriptor.candidates = values.into_iter().map(|v| v.to_string()).collect();
        }
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<R>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, wire_name: &str) -> Option<&Field<R>> {
        self.fields
            .iter()
            .find(|field| field.descriptor.wire_name == wire_name)
    }

    /// First field the binder cannot map, if any.
    pub fn unsupported_field(&self) -> Option<&Field<R>> {
        self.fields
            .iter()
            .find(|field| matches!(field.slot, Slot::Unsupported { .. }))
    }

    /// Fails on the first field the binder cannot map. Both binding
    /// operations call this before touching any field.
    pub fn ensure_supported(&self) -> Result<(), QingCloudError> {
        match self.unsupported_field() {
            Some(field) => Err(QingCloudError::UnsupportedFieldType {
                field: field.wire_name().to_string(),
                kind: field.kind().type_name().to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<'a, R> IntoIterator for &'a FieldTable<R> {
    type Item = &'a Field<R>;
    type IntoIter = std::slice::Iter<'a, Field<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// A record whose fields are bound to flags and query parameters through its
/// [`FieldTable`]. Members left out of the table are never bound.
pub trait Bindable: Sized {
    fn field_table() -> FieldTable<Self>;
}

/// Base-10 parse of an integer default. Unparsable text yields 0.
pub fn parse_integer_default(wire_name: &str, text: &str) -> i64 {
    text.parse().unwrap_or_else(|_| {
        warn!("Default '{text}' for integer field '{wire_name}' is not a number, using 0");
        0
    })
}

/// Only the exact literal `"true"` turns a boolean default on.
pub fn boolean_default(text: &str) -> bool {
    text == "true"
}
