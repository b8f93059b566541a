//! Help and version text derived from registry and schema metadata.
//!
//! Rendering is pure; [`emit`] writes the text to a sink and never fails.

use std::io::Write;

use serde_json::Value;
use tracing::warn;

use crate::registry::{CommandDefinition, Registry, RegistryMeta};
use crate::resolve::to_kebab_case;
use crate::unknown::display_flag;

/// Renders the program-level help listing every registered command.
///
/// # Examples
///
/// ```
/// use command_args_core::{CommandDefinition, Registry, RegistryMeta, render_top_help};
///
/// let registry = Registry::new(RegistryMeta { name: Some("tool".into()), ..Default::default() })
///     .command("build", CommandDefinition::new("Build the project"))
///     .command("test", CommandDefinition::new("Run the tests"));
///
/// let text = render_top_help(&registry);
/// assert!(text.contains("Usage: tool <build|test>"));
/// assert!(text.contains("  build  Build the project\n"));
/// assert!(text.contains("  test   Run the tests\n"));
/// ```
pub fn render_top_help<A>(registry: &Registry<A>) -> String {
    let meta = &registry.meta;
    let program = meta.program();
    let mut out = header(meta);

    let names = registry.command_names();
    let inline_default = match registry.default() {
        Some((None, definition)) => Some(definition),
        _ => None,
    };
    if names.is_empty() {
        let args = if inline_default.is_some_and(|def| def.args.is_some()) {
            " [ARGS]"
        } else {
            ""
        };
        out.push_str(&format!("Usage: {program} [OPTIONS]{args}\n"));
    } else if registry.default().is_some() {
        out.push_str(&format!("Usage: {program} [{}]\n", names.join("|")));
    } else {
        out.push_str(&format!("Usage: {program} <{}>\n", names.join("|")));
    }

    if let Some(definition) = inline_default {
        push_sections(&mut out, definition);
    }

    if !names.is_empty() {
        out.push_str("\nCommands:\n");
        let rows: Vec<(String, String)> = registry
            .commands()
            .map(|(name, def)| (name.to_string(), def.description.trim().to_string()))
            .collect();
        push_rows(&mut out, &rows);
        out.push_str(&format!(
            "\nRun '{program} <command> --help' for more information on a command.\n"
        ));
    }

    out
}

/// Renders help for one command. `name` is `None` for a standalone default.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let meta = RegistryMeta { name: Some("tool".into()), ..Default::default() };
/// let def = CommandDefinition::new("Build the project")
///     .with_options(
///         Fields::new()
///             .field(FieldSchema::boolean("verbose").with_description("Chatty output"))
///             .field(FieldSchema::with_value("outDir", ValueType::String).with_default("dist")),
///     )
///     .with_alias("v", "verbose");
///
/// let text = render_command_help(&meta, Some("build"), &def);
/// assert!(text.contains("Usage: tool build [OPTIONS]\n"));
/// assert!(text.contains("-v, --verbose  Chatty output"));
/// assert!(text.contains("--out-dir      (default: \"dist\")"));
/// ```
pub fn render_command_help<A>(
    meta: &RegistryMeta,
    name: Option<&str>,
    def: &CommandDefinition<A>,
) -> String {
    let mut usage = format!("Usage: {}", meta.program());
    if let Some(name) = name {
        usage.push(' ');
        usage.push_str(name);
    }
    if def.options.is_some() {
        usage.push_str(" [OPTIONS]");
    }
    if def.args.is_some() {
        usage.push_str(" [ARGS]");
    }

    let mut out = usage;
    out.push('\n');

    if !def.description.trim().is_empty() {
        out.push('\n');
        out.push_str(def.description.trim_end());
        out.push('\n');
    }

    push_sections(&mut out, def);
    out
}

/// Appends the `Arguments:` and `Options:` sections for `def`.
fn push_sections<A>(out: &mut String, def: &CommandDefinition<A>) {
    if let Some(args) = &def.args {
        let rows: Vec<(String, String)> = args
            .arg_rows()
            .into_iter()
            .map(|(label, desc)| (label, desc.unwrap_or_default()))
            .collect();
        if !rows.is_empty() {
            out.push_str("\nArguments:\n");
            push_rows(out, &rows);
        }
    }

    if let Some(options) = &def.options {
        let rows: Vec<(String, String)> = options
            .field_names()
            .iter()
            .map(|field| {
                let long = format!("--{}", to_kebab_case(field));
                let left = match def.alias_for(field) {
                    Some(alias) => format!("{}, {long}", display_flag(alias)),
                    None => long,
                };
                let mut help = options.description_of(field).unwrap_or_default();
                if let Some(default) = options.default_of(field) {
                    if !help.is_empty() {
                        help.push(' ');
                    }
                    help.push_str(&format!("(default: {})", format_default(&default)));
                }
                (left, help)
            })
            .collect();
        if !rows.is_empty() {
            out.push_str("\nOptions:\n");
            push_rows(out, &rows);
        }
    }
}

/// Renders `<program> <version>`.
pub fn render_version(meta: &RegistryMeta) -> String {
    match meta.version.as_deref().map(str::trim) {
        Some(version) if !version.is_empty() => format!("{} {version}\n", meta.program()),
        _ => format!("{}\n", meta.program()),
    }
}

/// Writes `text` to `sink`; failures are logged and otherwise ignored.
pub fn emit(sink: &mut dyn Write, text: &str) {
    if let Err(err) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
        warn!(error = %err, "failed to write help output");
    }
}

fn header(meta: &RegistryMeta) -> String {
    let mut out = String::new();
    let version = meta.version.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let description = meta.description.as_deref().map(str::trim).filter(|d| !d.is_empty());

    match (meta.name.as_deref(), version) {
        (Some(name), Some(version)) => out.push_str(&format!("{name} {version}\n")),
        (Some(name), None) => out.push_str(&format!("{name}\n")),
        (None, Some(version)) => out.push_str(&format!("{} {version}\n", meta.program())),
        (None, None) => {}
    }
    if let Some(description) = description {
        out.push_str(description);
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn format_default(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

fn push_rows(out: &mut String, rows: &[(String, String)]) {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
}
