//! Shell completion through clap_complete's dynamic engine.
//!
//! The shell calls the binary back with `COMPLETE=<shell>` set; candidates for
//! enumerated flags come from the field tables, and `--instances` on
//! terminate-instances asks the API for the caller's instance ids.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use clap::Command;
use clap_complete::Shell;
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};
use clap_complete::env::{CompleteEnv, Shells};
use qingcloud::{QingCloudError, debug};
use serde::Deserialize;

use crate::commands::DescribeInstances;
use crate::config::Config;
use crate::dispatch::Dispatcher;

/// Environment variable the registration scripts set when calling back.
pub const COMPLETE_VAR: &str = "COMPLETE";

/// Largest page the API returns for one DescribeInstances call.
const INSTANCE_PAGE: i64 = 100;

#[derive(Debug, Deserialize)]
struct InstanceListing {
    #[serde(default)]
    instance_set: Vec<InstanceSummary>,
}

#[derive(Debug, Deserialize)]
struct InstanceSummary {
    instance_id: String,
    #[serde(default)]
    instance_name: String,
}

/// Answers a completion request and exits when the process was started by a
/// registration script. Returns normally otherwise.
pub fn complete_from_env(factory: fn() -> Command) {
    CompleteEnv::with_factory(factory).var(COMPLETE_VAR).complete();
}

/// Writes the script that hooks `bin_name` into `shell`.
pub fn write_registration<W: Write>(
    shell: Shell,
    bin_name: &str,
    out: &mut W,
) -> Result<(), QingCloudError> {
    let name = shell.to_string();
    let shells = Shells::builtins();
    let completer = shells.completer(&name).ok_or_else(|| {
        QingCloudError::validation("shell", format!("'{name}' has no dynamic completion support"))
    })?;
    completer
        .write_registration(COMPLETE_VAR, bin_name, bin_name, bin_name, out)
        .map_err(|e| QingCloudError::from_transport_error(e, "writing completion script"))
}

/// Live instance ids for `--instances`, using the `--config` and `--zone`
/// already typed on the command line.
pub fn instance_id_completer() -> ArgValueCandidates {
    ArgValueCandidates::new(|| {
        let args: Vec<String> = std::env::args().collect();
        let config_path = flag_value(&args, "--config").map(PathBuf::from);
        let zone = flag_value(&args, "--zone");

        let Ok(config) = Config::load(config_path.as_deref(), zone) else {
            return Vec::new();
        };
        let Ok(dispatcher) = Dispatcher::new(config) else {
            return Vec::new();
        };
        fetch_instance_candidates(&dispatcher).unwrap_or_else(|e| {
            debug!("Instance completion unavailable: {e}");
            Vec::new()
        })
    })
}

/// One signed DescribeInstances call, turned into completion candidates.
pub fn fetch_instance_candidates(
    dispatcher: &Dispatcher,
) -> Result<Vec<CompletionCandidate>, QingCloudError> {
    let mut describe = DescribeInstances {
        exclude_reserved: true,
        limit: INSTANCE_PAGE,
        ..DescribeInstances::default()
    };
    let url = dispatcher.prepare(&mut describe, Utc::now())?;
    let response = dispatcher.send(&url)?;
    if !response.status.is_success() {
        return Err(QingCloudError::TransportFailure {
            context: "instance completion".to_string(),
            reason: format!("HTTP status {}", response.status),
        });
    }
    instance_candidates(&response.body)
}

/// Instance ids from a DescribeInstances reply, with the instance name as help.
pub fn instance_candidates(body: &[u8]) -> Result<Vec<CompletionCandidate>, QingCloudError> {
    let listing: InstanceListing = serde_json::from_slice(body)
        .map_err(|e| QingCloudError::from_transport_error(e, "DescribeInstances reply"))?;

    Ok(listing
        .instance_set
        .into_iter()
        .map(|instance| {
            let help = (!instance.instance_name.is_empty()).then(|| instance.instance_name.into());
            CompletionCandidate::new(instance.instance_id).help(help)
        })
        .collect())
}

/// Value of `--name value` or `--name=value` in `args`; the last one wins.
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let mut found = None;
    let mut words = args.iter();
    while let Some(word) = words.next() {
        if word == name {
            found = words.next().map(String::as_str).or(found);
        } else if let Some(value) = word
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
        {
            found = Some(value);
        }
    }
    found.filter(|value| !value.is_empty())
}
