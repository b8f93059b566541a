//! The argument-processing pipeline.
//!
//! ```text
//! argv → tokenize → route ─┬─ help / version ─────────────→ Outcome::*Displayed
//!                          └─ command → resolve names → reject unknown
//!                                     → normalize arrays → validate options
//!                                     → validate positionals → Outcome::Success
//! ```
//!
//! Nothing here exits the process: help and version are written to the sink
//! and reported as outcomes, failures come back as [`ProcessError`].

use std::io::Write;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ProcessError, Result};
use crate::help::{emit, render_command_help, render_top_help, render_version};
use crate::normalize::normalize_arrays;
use crate::registry::{CommandDefinition, Registry};
use crate::resolve::resolve_names;
use crate::route::{Route, route};
use crate::tokenize::tokenize;
use crate::types::{FlagBag, Tokens};
use crate::unknown::reject_unknown;

/// Validated result of a successful invocation.
#[derive(Debug)]
pub struct ProcessResult<'r, A> {
    /// Registered name of the command; `None` for a standalone default.
    pub name: Option<&'r str>,
    pub command: &'r CommandDefinition<A>,
    /// Validated options; an empty object when the command has no schema.
    pub options: Value,
    /// Validated positionals; the raw string array when the command has no
    /// positional schema.
    pub args: Value,
}

/// Terminal outcome of [`process`].
#[derive(Debug)]
pub enum Outcome<'r, A> {
    Success(ProcessResult<'r, A>),
    /// Help text was written to the sink.
    HelpDisplayed,
    /// Version line was written to the sink.
    VersionDisplayed,
}

impl<'r, A> Outcome<'r, A> {
    /// The result, if the invocation selected a command.
    pub fn success(self) -> Option<ProcessResult<'r, A>> {
        match self {
            Self::Success(result) => Some(result),
            Self::HelpDisplayed | Self::VersionDisplayed => None,
        }
    }
}

/// Processes `argv` (program name excluded) against `registry`.
///
/// Help and version text go to `sink`. For [`ProcessError::NoCommand`] and
/// [`ProcessError::UnknownCommand`] the top-level help is written before the
/// error is returned.
///
/// # Errors
///
/// Returns [`ProcessError`] when no command can be selected, a flag is not
/// declared, or the values fail validation.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
/// use serde_json::json;
///
/// let registry = Registry::new(RegistryMeta::default()).command(
///     "copy",
///     CommandDefinition::new("Copy files")
///         .with_options(
///             Fields::new()
///                 .field(FieldSchema::boolean("force"))
///                 .field(FieldSchema::with_value("exclude", ValueType::String).allow_multiple()),
///         )
///         .with_alias("f", "force"),
/// );
///
/// let mut sink = Vec::new();
/// let outcome = process(&registry, &["copy", "-f", "--exclude", "*.tmp", "a", "b"], &mut sink).unwrap();
/// let result = outcome.success().unwrap();
///
/// assert_eq!(result.name, Some("copy"));
/// assert_eq!(result.options, json!({"force": true, "exclude": ["*.tmp"]}));
/// assert_eq!(result.args, json!(["a", "b"]));
/// assert!(sink.is_empty());
/// ```
pub fn process<'r, A, S: AsRef<str>>(
    registry: &'r Registry<A>,
    argv: &[S],
    sink: &mut dyn Write,
) -> Result<Outcome<'r, A>> {
    let Tokens { flags, positionals } = tokenize(argv);

    let selected = match route(registry, &flags, positionals) {
        Ok(Route::Run(selected)) => selected,
        Ok(Route::TopHelp) => {
            emit(sink, &render_top_help(registry));
            return Ok(Outcome::HelpDisplayed);
        }
        Ok(Route::Version) => {
            emit(sink, &render_version(&registry.meta));
            return Ok(Outcome::VersionDisplayed);
        }
        Ok(Route::CommandHelp(selected)) => {
            emit(
                sink,
                &render_command_help(&registry.meta, selected.name, selected.definition),
            );
            return Ok(Outcome::HelpDisplayed);
        }
        Err(err) => {
            emit(sink, &render_top_help(registry));
            return Err(err);
        }
    };

    let options = validate_options(selected.definition, flags)?;
    let args = validate_args(selected.definition, &selected.positionals)?;
    debug!(command = selected.name.unwrap_or("<default>"), "arguments processed");

    Ok(Outcome::Success(ProcessResult {
        name: selected.name,
        command: selected.definition,
        options,
        args,
    }))
}

/// Runs name resolution, unknown-option rejection, normalization and
/// validation for the selected command's flags.
fn validate_options<A>(definition: &CommandDefinition<A>, flags: FlagBag) -> Result<Value> {
    let fields = definition.field_names();
    let mut flags = resolve_names(flags, &definition.aliases, &fields);
    reject_unknown(&flags, &fields)?;

    match &definition.options {
        Some(schema) => {
            normalize_arrays(&mut flags, schema.as_ref());
            schema
                .validate(&flags)
                .map_err(|issues| ProcessError::from_issues(&issues))
        }
        None => Ok(Value::Object(Map::new())),
    }
}

fn validate_args<A>(definition: &CommandDefinition<A>, positionals: &[String]) -> Result<Value> {
    match &definition.args {
        Some(schema) => schema
            .validate(positionals)
            .map_err(|issues| ProcessError::from_issues(&issues)),
        None => Ok(Value::Array(
            positionals.iter().cloned().map(Value::String).collect(),
        )),
    }
}
