//! Alias and naming-convention resolution.
//!
//! Rewrites flag keys in two passes:
//!
//! 1. Every alias present in the bag is moved to its canonical name. The
//!    alias value replaces a canonical key that is already present.
//! 2. For every declared field still missing from the bag, its hyphenated
//!    spelling (`androidMax` → `android-max`) is looked up and, if found,
//!    moved to the canonical key.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::FlagBag;

/// Hyphenates a camel-style field name.
///
/// Each ASCII uppercase letter becomes a hyphen followed by its lowercase
/// form; nothing else changes.
///
/// # Examples
///
/// ```
/// use command_args_core::to_kebab_case;
///
/// assert_eq!(to_kebab_case("androidMax"), "android-max");
/// assert_eq!(to_kebab_case("dryRunOnly"), "dry-run-only");
/// assert_eq!(to_kebab_case("port"), "port");
/// ```
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Applies alias and naming-convention rewrites to `flags`.
///
/// # Examples
///
/// ```
/// use command_args_core::{FlagBag, FlagValue, resolve_names};
/// use indexmap::IndexMap;
///
/// let mut flags = FlagBag::new();
/// flags.push("v", FlagValue::Present);
/// flags.push("android-max", FlagValue::text("10"));
///
/// let aliases = IndexMap::from([("v".to_string(), "verbose".to_string())]);
/// let fields = vec!["verbose".to_string(), "androidMax".to_string()];
///
/// let resolved = resolve_names(flags, &aliases, &fields);
/// assert_eq!(resolved.get("verbose"), Some(&FlagValue::Present));
/// assert_eq!(resolved.get("androidMax"), Some(&FlagValue::text("10")));
/// assert!(!resolved.contains("android-max"));
/// ```
pub fn resolve_names(
    mut flags: FlagBag,
    aliases: &IndexMap<String, String>,
    fields: &[String],
) -> FlagBag {
    for (alias, canonical) in aliases {
        if let Some(value) = flags.remove(alias) {
            debug!(alias = %alias, canonical = %canonical, "resolved alias");
            flags.insert(canonical.clone(), value);
        }
    }

    for field in fields {
        if flags.contains(field) {
            continue;
        }
        let hyphenated = to_kebab_case(field);
        if hyphenated == *field {
            continue;
        }
        if let Some(value) = flags.remove(&hyphenated) {
            debug!(from = %hyphenated, to = %field, "resolved hyphenated spelling");
            flags.insert(field.clone(), value);
        }
    }

    flags
}
