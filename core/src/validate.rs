//! Command package validation.
//!
//! Catches structural mistakes in a [`CommandPackage`] before it is turned
//! into a registry: duplicate names, aliases pointing nowhere, variadic
//! positionals in the middle, and a default command that does not exist.
//!
//! # Examples
//!
//! ```
//! use command_args_core::*;
//!
//! let mut package = CommandPackage::new(RegistryMeta::default());
//! package.commands.push(CommandEntry::new("build", "Build"));
//! assert!(validate_package(&package).is_empty());
//!
//! package.default_command = Some(DefaultEntry::Name("deploy".into()));
//! assert_eq!(
//!     validate_package(&package),
//!     vec![PackageError::UnknownDefaultCommand("deploy".into())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::package::{CommandEntry, CommandPackage, DefaultEntry};

/// Package validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two entries share a command name.
    #[error("duplicate command in package: {0}")]
    DuplicateCommand(String),
    /// Two option fields in one command share a name.
    #[error("duplicate option in {command}: {field}")]
    DuplicateField { command: String, field: String },
    /// An alias targets a field the command does not declare.
    #[error("alias '{alias}' in {command} targets undeclared option '{target}'")]
    UnknownAliasTarget {
        command: String,
        alias: String,
        target: String,
    },
    /// An alias has the same name as a declared field.
    #[error("alias '{alias}' in {command} shadows a declared option")]
    AliasShadowsField { command: String, alias: String },
    /// Two positional arguments in one command share a name.
    #[error("duplicate argument in {command}: {arg}")]
    DuplicateArg { command: String, arg: String },
    /// A variadic positional is followed by more positionals.
    #[error("variadic argument '{arg}' in {command} must be last")]
    VariadicNotLast { command: String, arg: String },
    /// The default command names an entry that does not exist.
    #[error("default command is not registered: {0}")]
    UnknownDefaultCommand(String),
}

/// Validates a command package.
///
/// Returns the first problem found, or an empty list when the package is
/// well formed.
pub fn validate_package(package: &CommandPackage) -> Vec<PackageError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in &package.commands {
        let name = entry.name.trim();
        if name.is_empty() {
            errors.push(PackageError::EmptyCommandName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(PackageError::DuplicateCommand(name.to_string()));
            return errors;
        }
        errors.extend(validate_entry(name, entry));
        if !errors.is_empty() {
            return errors;
        }
    }

    match &package.default_command {
        Some(DefaultEntry::Name(name)) if !seen.contains(name.trim()) => {
            errors.push(PackageError::UnknownDefaultCommand(name.clone()));
        }
        Some(DefaultEntry::Inline(entry)) => {
            errors.extend(validate_entry("<default>", entry));
        }
        _ => {}
    }

    errors
}

fn validate_entry(command: &str, entry: &CommandEntry) -> Vec<PackageError> {
    let mut errors = Vec::new();
    let mut fields: HashSet<&str> = HashSet::new();

    if let Some(options) = &entry.options {
        for field in options.iter() {
            if !fields.insert(field.name.as_str()) {
                errors.push(PackageError::DuplicateField {
                    command: command.to_string(),
                    field: field.name.clone(),
                });
                return errors;
            }
        }
    }

    for (alias, target) in &entry.aliases {
        if fields.contains(alias.as_str()) {
            errors.push(PackageError::AliasShadowsField {
                command: command.to_string(),
                alias: alias.clone(),
            });
            return errors;
        }
        if !fields.contains(target.as_str()) {
            errors.push(PackageError::UnknownAliasTarget {
                command: command.to_string(),
                alias: alias.clone(),
                target: target.clone(),
            });
            return errors;
        }
    }

    if let Some(args) = &entry.args {
        let mut names: HashSet<&str> = HashSet::new();
        let mut variadic: Option<&str> = None;
        for arg in args.iter() {
            if let Some(prev) = variadic {
                errors.push(PackageError::VariadicNotLast {
                    command: command.to_string(),
                    arg: prev.to_string(),
                });
                return errors;
            }
            if !names.insert(arg.name.as_str()) {
                errors.push(PackageError::DuplicateArg {
                    command: command.to_string(),
                    arg: arg.name.clone(),
                });
                return errors;
            }
            if arg.multiple {
                variadic = Some(arg.name.as_str());
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgSchema, FieldSchema, Fields, Positionals, RegistryMeta, ValueType};

    fn package_with(entry: CommandEntry) -> CommandPackage {
        let mut package = CommandPackage::new(RegistryMeta::default());
        package.commands.push(entry);
        package
    }

    #[test]
    fn test_validate_package_rejects_duplicate_commands() {
        let mut package = package_with(CommandEntry::new("build", "a"));
        package.commands.push(CommandEntry::new("build", "b"));

        assert_eq!(
            validate_package(&package),
            vec![PackageError::DuplicateCommand("build".to_string())]
        );
    }

    #[test]
    fn test_validate_package_rejects_empty_name() {
        let package = package_with(CommandEntry::new("  ", "a"));
        assert_eq!(validate_package(&package), vec![PackageError::EmptyCommandName]);
    }

    #[test]
    fn test_validate_package_rejects_dangling_alias() {
        let mut entry = CommandEntry::new("build", "Build");
        entry.options = Some(Fields::new().field(FieldSchema::boolean("verbose")));
        entry.aliases.insert("q".to_string(), "quiet".to_string());

        assert_eq!(
            validate_package(&package_with(entry)),
            vec![PackageError::UnknownAliasTarget {
                command: "build".to_string(),
                alias: "q".to_string(),
                target: "quiet".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_package_rejects_alias_shadowing_field() {
        let mut entry = CommandEntry::new("build", "Build");
        entry.options = Some(
            Fields::new()
                .field(FieldSchema::boolean("v"))
                .field(FieldSchema::boolean("verbose")),
        );
        entry.aliases.insert("v".to_string(), "verbose".to_string());

        assert_eq!(
            validate_package(&package_with(entry)),
            vec![PackageError::AliasShadowsField {
                command: "build".to_string(),
                alias: "v".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_package_rejects_variadic_in_middle() {
        let mut entry = CommandEntry::new("cp", "Copy");
        entry.args = Some(
            Positionals::new()
                .arg(ArgSchema::required("sources", ValueType::String).allow_multiple())
                .arg(ArgSchema::required("dest", ValueType::String)),
        );

        assert_eq!(
            validate_package(&package_with(entry)),
            vec![PackageError::VariadicNotLast {
                command: "cp".to_string(),
                arg: "sources".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_package_checks_inline_default() {
        let mut entry = CommandEntry::default();
        entry.options = Some(
            Fields::new()
                .field(FieldSchema::boolean("x"))
                .field(FieldSchema::boolean("x")),
        );
        let mut package = CommandPackage::new(RegistryMeta::default());
        package.default_command = Some(DefaultEntry::Inline(entry));

        assert_eq!(
            validate_package(&package),
            vec![PackageError::DuplicateField {
                command: "<default>".to_string(),
                field: "x".to_string(),
            }]
        );
    }
}
