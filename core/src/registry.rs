//! Command definitions and the command registry.
//!
//! A [`Registry`] maps command names to [`CommandDefinition`]s and optionally
//! designates a default command that runs when no command name is given.
//! Definitions carry an opaque action payload `A` that is handed back to the
//! caller untouched.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{ArgsSchema, OptionSchema};

/// Program-level metadata used in help and version output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegistryMeta {
    /// Program name, `cli` when unset.
    pub fn program(&self) -> &str {
        self.name.as_deref().unwrap_or("cli")
    }
}

/// A command: description, optional schemas, alias map and action.
///
/// # Examples
///
/// ```
/// use command_args_core::{CommandDefinition, FieldSchema, Fields};
///
/// let build = CommandDefinition::new("Build the project")
///     .with_options(Fields::new().field(FieldSchema::boolean("verbose")))
///     .with_alias("v", "verbose")
///     .with_action("build");
///
/// assert_eq!(build.alias_for("verbose"), Some("v"));
/// assert_eq!(build.action, "build");
/// ```
#[derive(Clone)]
pub struct CommandDefinition<A = ()> {
    pub description: String,
    pub options: Option<Arc<dyn OptionSchema>>,
    /// Alias key → canonical field name, in registration order.
    pub aliases: IndexMap<String, String>,
    pub args: Option<Arc<dyn ArgsSchema>>,
    pub action: A,
}

impl CommandDefinition<()> {
    /// Creates a definition with no schemas and a unit action.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: None,
            aliases: IndexMap::new(),
            args: None,
            action: (),
        }
    }
}

impl<A> CommandDefinition<A> {
    pub fn with_options(mut self, schema: impl OptionSchema + 'static) -> Self {
        self.options = Some(Arc::new(schema));
        self
    }

    /// Registers `alias` as another spelling of the canonical field.
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    pub fn with_args(mut self, schema: impl ArgsSchema + 'static) -> Self {
        self.args = Some(Arc::new(schema));
        self
    }

    /// Replaces the action payload.
    pub fn with_action<B>(self, action: B) -> CommandDefinition<B> {
        CommandDefinition {
            description: self.description,
            options: self.options,
            aliases: self.aliases,
            args: self.args,
            action,
        }
    }

    /// First registered alias for a canonical field.
    pub fn alias_for(&self, canonical: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
    }

    /// Canonical fields declared by the option schema (empty without one).
    pub fn field_names(&self) -> Vec<String> {
        self.options
            .as_ref()
            .map(|schema| schema.field_names())
            .unwrap_or_default()
    }
}

impl<A: fmt::Debug> fmt::Debug for CommandDefinition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("description", &self.description)
            .field("options", &self.options)
            .field("aliases", &self.aliases)
            .field("args", &self.args)
            .field("action", &self.action)
            .finish()
    }
}

/// Which definition runs when no command name is given.
#[derive(Debug, Clone)]
enum DefaultCommand<A> {
    /// Shares a named entry.
    Named(String),
    /// Standalone definition with no name entry.
    Inline(CommandDefinition<A>),
}

/// Command name → definition mapping plus program metadata.
///
/// # Examples
///
/// ```
/// use command_args_core::{CommandDefinition, Registry, RegistryMeta};
///
/// let registry = Registry::new(RegistryMeta {
///     name: Some("tool".into()),
///     ..Default::default()
/// })
/// .command("build", CommandDefinition::new("Build"))
/// .command("test", CommandDefinition::new("Test"))
/// .default_to("build");
///
/// assert_eq!(registry.command_names(), vec!["build", "test"]);
/// assert_eq!(registry.default().map(|(name, _)| name), Some(Some("build")));
/// ```
#[derive(Debug, Clone)]
pub struct Registry<A = ()> {
    pub meta: RegistryMeta,
    commands: IndexMap<String, CommandDefinition<A>>,
    default: Option<DefaultCommand<A>>,
}

impl<A> Registry<A> {
    pub fn new(meta: RegistryMeta) -> Self {
        Self {
            meta,
            commands: IndexMap::new(),
            default: None,
        }
    }

    /// Registers a named command, replacing any previous entry of that name.
    pub fn command(mut self, name: impl Into<String>, definition: CommandDefinition<A>) -> Self {
        self.commands.insert(name.into(), definition);
        self
    }

    /// Sets a standalone default command.
    pub fn default_command(mut self, definition: CommandDefinition<A>) -> Self {
        self.default = Some(DefaultCommand::Inline(definition));
        self
    }

    /// Makes the named entry the default command.
    pub fn default_to(mut self, name: impl Into<String>) -> Self {
        self.default = Some(DefaultCommand::Named(name.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition<A>> {
        self.commands.get(name)
    }

    /// Registered names in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn commands(&self) -> impl Iterator<Item = (&str, &CommandDefinition<A>)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The default command and its name (`None` for a standalone default).
    ///
    /// A default naming an unregistered command is treated as absent.
    pub fn default(&self) -> Option<(Option<&str>, &CommandDefinition<A>)> {
        match self.default.as_ref()? {
            DefaultCommand::Named(name) => self
                .commands
                .get_key_value(name)
                .map(|(k, v)| (Some(k.as_str()), v)),
            DefaultCommand::Inline(definition) => Some((None, definition)),
        }
    }

    /// Name the default command points at, even if unregistered.
    pub fn default_name(&self) -> Option<&str> {
        match self.default.as_ref()? {
            DefaultCommand::Named(name) => Some(name.as_str()),
            DefaultCommand::Inline(_) => None,
        }
    }
}
