//! Unknown-option detection.

use crate::error::{ProcessError, Result};
use crate::types::{FlagBag, FlagForm, RESERVED_KEYS};

/// Rejects the first flag that is neither a declared field nor reserved.
///
/// The error quotes the flag the way it was typed when the bag records a
/// [`FlagForm`]. Otherwise it falls back to [`display_flag`].
///
/// # Examples
///
/// ```
/// use command_args_core::{FlagBag, FlagValue, ProcessError, reject_unknown};
///
/// let mut flags = FlagBag::new();
/// flags.push("help", FlagValue::Present);
/// flags.push("x", FlagValue::Present);
///
/// let err = reject_unknown(&flags, &[]).unwrap_err();
/// assert_eq!(err, ProcessError::UnknownOption("-x".into()));
/// ```
pub fn reject_unknown(flags: &FlagBag, fields: &[String]) -> Result<()> {
    let unknown = flags.keys().find(|key| {
        !RESERVED_KEYS.contains(key) && !fields.iter().any(|field| field.as_str() == *key)
    });

    match unknown {
        Some(key) => Err(ProcessError::UnknownOption(typed_spelling(flags, key))),
        None => Ok(()),
    }
}

fn typed_spelling(flags: &FlagBag, key: &str) -> String {
    match flags.form_of(key) {
        Some(FlagForm::Long) => format!("--{key}"),
        Some(FlagForm::Short) => format!("-{key}"),
        None => display_flag(key),
    }
}

/// Conventional spelling of a flag key: `-k` for one character, `--key`
/// otherwise.
pub fn display_flag(key: &str) -> String {
    if key.chars().count() == 1 {
        format!("-{key}")
    } else {
        format!("--{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlagValue;

    #[test]
    fn test_reserved_keys_always_pass() {
        let mut flags = FlagBag::new();
        flags.insert("help", FlagValue::Present);
        flags.insert("version", FlagValue::Present);
        assert!(reject_unknown(&flags, &[]).is_ok());
    }

    #[test]
    fn test_reports_long_spelling() {
        let mut flags = FlagBag::new();
        flags.insert("verbose", FlagValue::Present);
        flags.insert("android-max", FlagValue::text("1"));

        let err = reject_unknown(&flags, &["verbose".to_string()]).unwrap_err();
        assert_eq!(err, ProcessError::UnknownOption("--android-max".to_string()));
    }

    #[test]
    fn test_reports_spelling_as_typed() {
        let mut flags = FlagBag::new();
        flags.push_as("x", FlagValue::Present, FlagForm::Long);
        assert_eq!(
            reject_unknown(&flags, &[]).unwrap_err(),
            ProcessError::UnknownOption("--x".to_string())
        );

        let mut flags = FlagBag::new();
        flags.push_as("q", FlagValue::Present, FlagForm::Short);
        assert_eq!(
            reject_unknown(&flags, &[]).unwrap_err(),
            ProcessError::UnknownOption("-q".to_string())
        );
    }

    #[test]
    fn test_declared_fields_pass() {
        let mut flags = FlagBag::new();
        flags.insert("port", FlagValue::text("80"));
        assert!(reject_unknown(&flags, &["port".to_string()]).is_ok());
    }
}
