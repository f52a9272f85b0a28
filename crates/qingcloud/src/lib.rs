//! Core of the QingCloud IaaS command-line client: declarative field binding,
//! query parameter encoding and request signing.

pub mod binder;
pub mod error;
pub mod query;
pub mod signer;
pub mod telemetry;

pub use binder::{Bindable, FieldTable, FlagSurface, bind_flags, bind_parameters};
pub use error::QingCloudError;
pub use query::ParameterSet;
pub use signer::{SignatureMethod, assemble_url, sign};

// Re-export logging macros for consistent usage across the crate
pub use log::{debug, error, info, trace, warn};
