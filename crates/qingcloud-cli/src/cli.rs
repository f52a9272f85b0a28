//! Command tree and subcommand routing.

use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};
use clap_complete::Shell;
use qingcloud::binder::{apply_matches, value_candidates};
use qingcloud::{QingCloudError, bind_flags, debug};

use crate::commands::{DescribeInstances, InstanceCommand, RunInstances, TerminateInstances};
use crate::completion::{instance_id_completer, write_registration};
use crate::config::{Config, DEMO_CONFIG};
use crate::dispatch::Dispatcher;
use crate::validation::VALID_ZONES;

pub const BIN_NAME: &str = "qingcloud-cli";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the whole command tree. Fails only when a command record declares a
/// field the binder cannot map.
pub fn build_cli() -> Result<Command, QingCloudError> {
    let root = Command::new(BIN_NAME)
        .about("qingcloud-cli is a cli utility, you can run, describe, terminate instance")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("config file (default is $HOME/.qingcloud.yaml)"),
        )
        .arg(
            Arg::new("zone")
                .long("zone")
                .global(true)
                .value_name("ZONE")
                .help("specified the zone, overwrite the config file value")
                .add(value_candidates(VALID_ZONES.iter().copied())),
        )
        .subcommand(Command::new("version").about("Print the version number of qingcloud-cli"))
        .subcommand(
            Command::new("echo-demo-config")
                .about("Print a demo config file")
                .long_about("Print a demo config file, e.g. qingcloud-cli echo-demo-config > $HOME/.qingcloud.yaml"),
        )
        .subcommand(
            Command::new("completion")
                .about("Generate a shell completion script")
                .long_about("Generate a shell completion script, e.g. source <(qingcloud-cli completion bash)")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        );

    let terminate = instance_subcommand::<TerminateInstances>()?
        .mut_arg("instances", |arg| arg.add(instance_id_completer()));

    Ok(root
        .subcommand(instance_subcommand::<DescribeInstances>()?)
        .subcommand(instance_subcommand::<RunInstances>()?)
        .subcommand(terminate))
}

/// Command tree for completion requests. Falls back to a bare root command
/// when the tree cannot be built, so completion degrades instead of failing.
pub fn completion_command() -> Command {
    build_cli().unwrap_or_else(|_| Command::new(BIN_NAME))
}

fn instance_subcommand<C: InstanceCommand>() -> Result<Command, QingCloudError> {
    let surface = bind_flags::<C>(Command::new(C::NAME).about(C::ABOUT))?;
    Ok(surface.into_command())
}

/// Runs the selected subcommand, writing its output to `out`.
pub fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<(), QingCloudError> {
    match matches.subcommand() {
        Some(("version", _)) => {
            writeln!(out, "{BIN_NAME} version is {VERSION}").map_err(write_error)
        }
        Some(("echo-demo-config", _)) => out.write_all(DEMO_CONFIG.as_bytes()).map_err(write_error),
        Some(("completion", sub)) => {
            let Some(shell) = sub.get_one::<Shell>("shell").copied() else {
                return Ok(());
            };
            write_registration(shell, BIN_NAME, out)
        }
        Some((name, sub)) if name == DescribeInstances::NAME => {
            run_instance_command::<DescribeInstances, W>(sub, out)
        }
        Some((name, sub)) if name == RunInstances::NAME => {
            run_instance_command::<RunInstances, W>(sub, out)
        }
        Some((name, sub)) if name == TerminateInstances::NAME => {
            run_instance_command::<TerminateInstances, W>(sub, out)
        }
        _ => Ok(()),
    }
}

fn run_instance_command<C: InstanceCommand, W: Write>(
    matches: &ArgMatches,
    out: &mut W,
) -> Result<(), QingCloudError> {
    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let zone = matches.get_one::<String>("zone").map(String::as_str);
    let config = Config::load(config_path, zone)?;
    debug!("Running {} in zone '{}'", C::ACTION, config.zone);

    let mut command = C::default();
    apply_matches(&C::field_table(), matches, &mut command);

    let dispatcher = Dispatcher::new(config)?;
    dispatcher.dispatch(&mut command, out)?;
    Ok(())
}

fn write_error(e: std::io::Error) -> QingCloudError {
    QingCloudError::from_transport_error(e, "writing output")
}
