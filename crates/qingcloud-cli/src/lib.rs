//! QingCloud IaaS command-line client: instance commands, configuration
//! loading and request dispatch.

pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod output;
pub mod validation;

pub use cli::{build_cli, run};
pub use config::{Config, ConfigLoader};
pub use dispatch::{ApiResponse, Dispatcher};
