//! Declarative command-line argument processing.
//!
//! This crate turns a raw argument vector into a selected command plus
//! validated options and positional arguments, driven by declarative
//! schemas:
//!
//! - [`tokenize`]: splits argv into a [`FlagBag`] and positionals.
//! - [`resolve_names`]: maps aliases and hyphenated spellings to canonical
//!   field names.
//! - [`reject_unknown`]: fails on flags the command does not declare.
//! - [`normalize_arrays`]: wraps lone values of array-typed fields.
//! - [`route`]: picks the command (named, default, or help).
//! - [`process`]: runs the whole pipeline and returns an [`Outcome`].
//!
//! Schemas are consumed through the [`OptionSchema`] and [`ArgsSchema`]
//! traits; [`Fields`] and [`Positionals`] are the built-in implementations.
//! Commands can be assembled in code with [`Registry`] or loaded from a
//! serialized [`CommandPackage`].
//!
//! # Example
//!
//! ```
//! use command_args_core::*;
//! use serde_json::json;
//!
//! let registry = Registry::new(RegistryMeta {
//!     name: Some("mobile".into()),
//!     version: Some("1.0.0".into()),
//!     ..Default::default()
//! })
//! .command(
//!     "emulate",
//!     CommandDefinition::new("Start an emulator")
//!         .with_options(
//!             Fields::new()
//!                 .field(FieldSchema::with_value("androidMax", ValueType::Integer).with_default(4))
//!                 .field(FieldSchema::with_value("env", ValueType::String)),
//!         )
//!         .with_args(Positionals::new().arg(ArgSchema::required("device", ValueType::String))),
//! );
//!
//! let mut out = Vec::new();
//! let argv = ["emulate", "--android-max", "10", "--env=NODE_ENV=production", "pixel"];
//! let result = process(&registry, &argv, &mut out).unwrap().success().unwrap();
//!
//! assert_eq!(result.options, json!({"androidMax": 10, "env": "NODE_ENV=production"}));
//! assert_eq!(result.args, json!({"device": "pixel"}));
//!
//! // Help is written to the sink and reported, never exits the process.
//! let outcome = process(&registry, &["emulate", "--help"], &mut out).unwrap();
//! assert!(matches!(outcome, Outcome::HelpDisplayed));
//! ```

mod args;
mod error;
mod fields;
mod help;
mod normalize;
mod package;
mod process;
mod registry;
mod resolve;
mod route;
mod schema;
mod tokenize;
mod types;
mod unknown;
mod validate;

pub use args::{ArgSchema, Positionals};
pub use error::{ErrorKind, ProcessError, Result};
pub use fields::{FieldSchema, Fields};
pub use help::{emit, render_command_help, render_top_help, render_version};
pub use normalize::normalize_arrays;
pub use package::{CommandEntry, CommandPackage, DefaultEntry, PACKAGE_FORMAT_VERSION};
pub use process::{Outcome, ProcessResult, process};
pub use registry::{CommandDefinition, Registry, RegistryMeta};
pub use resolve::{resolve_names, to_kebab_case};
pub use route::{Route, Selected, help_requested, route};
pub use schema::{ArgsSchema, FieldIssue, OptionSchema, ValueType};
pub use tokenize::tokenize;
pub use types::{FlagBag, FlagForm, FlagValue, RESERVED_KEYS, Tokens};
pub use unknown::{display_flag, reject_unknown};
pub use validate::{PackageError, validate_package};
