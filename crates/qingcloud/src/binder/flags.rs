//! Derives a clap flag surface from a record's field table.

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use super::field::{Bindable, Field, FieldKind, FieldTable, Slot};
use crate::debug;
use crate::error::QingCloudError;

/// A command whose flags were derived from `R`'s field table.
pub struct FlagSurface<R> {
    command: Command,
    table: FieldTable<R>,
}

impl<R: Bindable> FlagSurface<R> {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn into_command(self) -> Command {
        self.command
    }

    pub fn table(&self) -> &FieldTable<R> {
        &self.table
    }

    /// Writes every bound field of `record` from `matches`.
    pub fn apply(&self, matches: &ArgMatches, record: &mut R) {
        apply_matches(&self.table, matches, record);
    }

    /// Parses `args` (binary name first) and applies the result to `record`.
    pub fn try_parse_from<I, T>(&self, args: I, record: &mut R) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(args)?;
        self.apply(&matches, record);
        Ok(matches)
    }
}

/// Adds one long flag per field of `R` to `command`.
///
/// Every field is converted before any flag is attached, so a table with an
/// unsupported field leaves `command` untouched and returns the error.
pub fn bind_flags<R: Bindable>(command: Command) -> Result<FlagSurface<R>, QingCloudError> {
    let table = R::field_table();
    let args = build_args(&table)?;
    debug!(
        "Bound {} flags onto command '{}'",
        args.len(),
        command.get_name()
    );
    Ok(FlagSurface {
        command: command.args(args),
        table,
    })
}

pub fn build_args<R>(table: &FieldTable<R>) -> Result<Vec<Arg>, QingCloudError> {
    table.ensure_supported()?;
    table.iter().map(build_arg).collect()
}

/// Completion suggestions for an argument. Attaching them never narrows what
/// the argument accepts.
pub fn value_candidates<I, T>(values: I) -> ArgValueCandidates
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    ArgValueCandidates::new(move || {
        values
            .iter()
            .map(|value| CompletionCandidate::new(value.as_str()))
            .collect::<Vec<_>>()
    })
}

fn build_arg<R>(field: &Field<R>) -> Result<Arg, QingCloudError> {
    let descriptor = field.descriptor();
    let name = descriptor.wire_name;
    // clap refuses a default on a required argument
    let with_default = !descriptor.required;

    let mut arg = Arg::new(name).long(name).help(descriptor.help);
    arg = match field.kind() {
        FieldKind::Text => {
            let arg = arg
                .action(ArgAction::Set)
                .value_parser(value_parser!(String))
                .value_name("TEXT");
            match descriptor.default_value {
                Some(default) if with_default => arg.default_value(default),
                _ => arg,
            }
        }
        FieldKind::Integer => {
            let arg = arg
                .action(ArgAction::Set)
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .value_name("NUMBER");
            if with_default {
                arg.default_value(field.integer_default().to_string())
            } else {
                arg
            }
        }
        FieldKind::Boolean => {
            // `--name` alone means true; an explicit value needs `=` so the
            // next word is never taken as the flag's value.
            let arg = arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new())
                .value_name("BOOL");
            if with_default {
                arg.default_value(if field.boolean_default() { "true" } else { "false" })
            } else {
                arg
            }
        }
        FieldKind::TextList => arg
            .action(ArgAction::Append)
            .value_parser(value_parser!(String))
            .value_name("VALUE"),
        FieldKind::Unsupported(kind) => {
            return Err(QingCloudError::UnsupportedFieldType {
                field: name.to_string(),
                kind: kind.to_string(),
            });
        }
    };

    if descriptor.required {
        arg = arg.required(true);
    }
    if !descriptor.candidates.is_empty() {
        arg = arg.add(value_candidates(descriptor.candidates.iter().cloned()));
    }
    Ok(arg)
}

/// Writes each field of `record` from `matches`, falling back to the field's
/// descriptor default and then to the kind's zero value.
pub fn apply_matches<R>(table: &FieldTable<R>, matches: &ArgMatches, record: &mut R) {
    for field in table {
        let name = field.wire_name();
        match field.slot {
            Slot::Text { set, .. } => {
                let value = matches
                    .try_get_one::<String>(name)
                    .ok()
                    .flatten()
                    .cloned()
                    .unwrap_or_else(|| field.text_default());
                set(record, value);
            }
            Slot::Integer { set, .. } => {
                let value = matches
                    .try_get_one::<i64>(name)
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or_else(|| field.integer_default());
                set(record, value);
            }
            Slot::Boolean { set, .. } => {
                let value = matches
                    .try_get_one::<bool>(name)
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or_else(|| field.boolean_default());
                set(record, value);
            }
            Slot::TextList { set, .. } => {
                let values = matches
                    .try_get_many::<String>(name)
                    .ok()
                    .flatten()
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                set(record, values);
            }
            Slot::Unsupported { .. } => {}
        }
    }
}
