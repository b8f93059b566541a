//! Command resolution.
//!
//! Decides which command runs for a tokenized invocation. With `first` being
//! the first positional:
//!
//! 1. no `first`, help requested → top-level help (`-h` only counts when
//!    the default command, if any, does not claim `h`)
//! 2. no `first`, version requested and configured → version
//! 3. no `first`, default command configured → default command, every
//!    positional is passed through as an argument
//! 4. no `first`, no default → [`ProcessError::NoCommand`]
//! 5. `first` not registered → [`ProcessError::UnknownCommand`]
//! 6. `first` registered → that command's help if requested, otherwise the
//!    command with the remaining positionals

use tracing::debug;

use crate::error::{ProcessError, Result};
use crate::registry::{CommandDefinition, Registry};
use crate::types::FlagBag;

/// Command picked for an invocation.
#[derive(Debug)]
pub struct Selected<'r, A> {
    /// Registered name; `None` for a standalone default command.
    pub name: Option<&'r str>,
    pub definition: &'r CommandDefinition<A>,
    /// Positionals left for the command (command name already consumed).
    pub positionals: Vec<String>,
}

/// Where an invocation is headed.
#[derive(Debug)]
pub enum Route<'r, A> {
    TopHelp,
    Version,
    CommandHelp(Selected<'r, A>),
    Run(Selected<'r, A>),
}

/// Whether help was asked for, given the command that would run.
///
/// `help` always counts. `-h` counts too unless the command claims `h` as a
/// field or alias.
pub fn help_requested<A>(flags: &FlagBag, definition: Option<&CommandDefinition<A>>) -> bool {
    if flags.is_set("help") {
        return true;
    }
    let claims_h = definition.is_some_and(|def| {
        def.aliases.contains_key("h") || def.options.as_ref().is_some_and(|schema| schema.has_field("h"))
    });
    !claims_h && flags.is_set("h")
}

/// Resolves the route for `flags` and `positionals`.
///
/// # Examples
///
/// ```
/// use command_args_core::{CommandDefinition, FlagBag, Registry, RegistryMeta, Route, route};
///
/// let registry = Registry::new(RegistryMeta::default())
///     .command("build", CommandDefinition::new("Build"));
///
/// let positionals = vec!["build".to_string(), "src".to_string()];
/// match route(&registry, &FlagBag::new(), positionals).unwrap() {
///     Route::Run(selected) => {
///         assert_eq!(selected.name, Some("build"));
///         assert_eq!(selected.positionals, vec!["src"]);
///     }
///     other => panic!("unexpected route: {other:?}"),
/// }
/// ```
pub fn route<'r, A>(
    registry: &'r Registry<A>,
    flags: &FlagBag,
    mut positionals: Vec<String>,
) -> Result<Route<'r, A>> {
    let Some(first) = positionals.first() else {
        let fallback = registry.default();
        if help_requested(flags, fallback.map(|(_, definition)| definition)) {
            debug!("top-level help requested");
            return Ok(Route::TopHelp);
        }
        if flags.is_set("version") && registry.meta.version.is_some() {
            debug!("version requested");
            return Ok(Route::Version);
        }
        return match fallback {
            Some((name, definition)) => {
                debug!(command = name.unwrap_or("<default>"), "routing to default command");
                Ok(Route::Run(Selected {
                    name,
                    definition,
                    positionals,
                }))
            }
            None => Err(ProcessError::NoCommand),
        };
    };

    let Some((name, definition)) = registry
        .commands()
        .find(|(name, _)| *name == first.as_str())
    else {
        debug!(token = %first, "unknown command");
        return Err(ProcessError::UnknownCommand(first.clone()));
    };

    positionals.remove(0);
    let selected = Selected {
        name: Some(name),
        definition,
        positionals,
    };

    if help_requested(flags, Some(definition)) {
        debug!(command = name, "command help requested");
        return Ok(Route::CommandHelp(selected));
    }

    debug!(command = name, "routing to named command");
    Ok(Route::Run(selected))
}
