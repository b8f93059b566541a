use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::args::Positionals;
use crate::fields::Fields;
use crate::registry::{CommandDefinition, Registry, RegistryMeta};

/// Version of the command package format (semver).
pub const PACKAGE_FORMAT_VERSION: &str = "1.0.0";

/// A named command as declared in a package file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Command name; unused for an inline default command.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Fields>,
    /// Alias key → canonical field name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Positionals>,
}

impl CommandEntry {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Builds the runtime definition.
    pub fn to_definition(&self) -> CommandDefinition {
        let mut definition = CommandDefinition::new(self.description.clone());
        if let Some(options) = &self.options {
            definition = definition.with_options(options.clone());
        }
        for (alias, canonical) in &self.aliases {
            definition = definition.with_alias(alias.clone(), canonical.clone());
        }
        if let Some(args) = &self.args {
            definition = definition.with_args(args.clone());
        }
        definition
    }
}

/// Default command: a reference to a named entry or a standalone entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultEntry {
    Name(String),
    Inline(CommandEntry),
}

/// Serializable bundle of command declarations and program metadata.
///
/// Packages are loaded from JSON or YAML and turned into a [`Registry`] with
/// [`CommandPackage::to_registry`].
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let raw = serde_json::json!({
///     "name": "tool",
///     "version": "0.1.0",
///     "commands": [
///         {"name": "build", "description": "Build", "options": [{"name": "release", "value_type": "bool"}]},
///         {"name": "clean", "description": "Clean"}
///     ],
///     "default_command": "build"
/// });
/// let package: CommandPackage = serde_json::from_value(raw).unwrap();
/// assert!(validate_package(&package).is_empty());
///
/// let registry = package.to_registry();
/// assert_eq!(registry.command_names(), vec!["build", "clean"]);
/// assert_eq!(registry.default_name(), Some("build"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandPackage {
    /// Package format version (populated from [`PACKAGE_FORMAT_VERSION`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(flatten)]
    pub meta: RegistryMeta,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_command: Option<DefaultEntry>,
}

impl CommandPackage {
    pub fn new(meta: RegistryMeta) -> Self {
        Self {
            schema_version: Some(PACKAGE_FORMAT_VERSION.to_string()),
            meta,
            commands: Vec::new(),
            default_command: None,
        }
    }

    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Builds a registry; later duplicates replace earlier entries.
    pub fn to_registry(&self) -> Registry {
        let mut registry = Registry::new(self.meta.clone());
        for entry in &self.commands {
            registry = registry.command(entry.name.clone(), entry.to_definition());
        }
        match &self.default_command {
            Some(DefaultEntry::Name(name)) => registry.default_to(name.clone()),
            Some(DefaultEntry::Inline(entry)) => registry.default_command(entry.to_definition()),
            None => registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_default_from_yaml() {
        let yaml = r#"
name: serve
description: Static file server
default_command:
  description: Serve a directory
  options:
    - name: port
      value_type: integer
      default: 8080
  aliases:
    p: port
  args:
    - name: root
      default: "."
"#;
        let package: CommandPackage = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(package.meta.name.as_deref(), Some("serve"));
        assert!(package.commands.is_empty());

        let registry = package.to_registry();
        let (name, def) = registry.default().unwrap();
        assert_eq!(name, None);
        assert_eq!(def.alias_for("port"), Some("p"));
        assert!(def.args.is_some());
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut package = CommandPackage::new(RegistryMeta {
            name: Some("tool".to_string()),
            ..Default::default()
        });
        package.commands.push(CommandEntry::new("build", "Build"));
        package.default_command = Some(DefaultEntry::Name("build".to_string()));

        let json = serde_json::to_string(&package).unwrap();
        let back: CommandPackage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, package);
    }
}
