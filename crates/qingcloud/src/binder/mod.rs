//! Declarative binding of record fields to command-line flags and query
//! parameters.
//!
//! A record implements [`Bindable`] by returning a [`FieldTable`]. The same
//! table drives [`bind_flags`] (the clap surface) and [`bind_parameters`]
//! (the wire payload), so a flag and its query key can never drift apart.

pub mod field;
pub mod flags;
pub mod params;

pub use field::{
    Bindable, Field, FieldDescriptor, FieldKind, FieldTable, boolean_default,
    parse_integer_default,
};
pub use flags::{FlagSurface, apply_matches, bind_flags, build_args, value_candidates};
pub use params::{bind_parameters, bind_parameters_into, bind_table};
