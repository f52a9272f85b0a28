//! Instance lifecycle commands. Each record's field table defines both its
//! subcommand flags and the query parameters it sends.

pub mod describe;
pub mod run;
pub mod terminate;

use qingcloud::{Bindable, QingCloudError};

pub use describe::DescribeInstances;
pub use run::RunInstances;
pub use terminate::TerminateInstances;

/// One API action exposed as one subcommand.
pub trait InstanceCommand: Bindable + Default {
    /// Subcommand name.
    const NAME: &'static str;
    /// Value of the `action` query parameter.
    const ACTION: &'static str;
    const ABOUT: &'static str;

    /// Rejects values the API would refuse and normalises the rest in place.
    fn validate(&mut self) -> Result<(), QingCloudError> {
        Ok(())
    }
}
