//! Raw argument tokenization.
//!
//! Splits an argument vector into a [`FlagBag`] and a positional list using
//! one token of lookahead:
//!
//! - `--key=value` splits at the first `=`; the value is kept verbatim.
//! - `--key value` / `-k value` consume the next token when it does not start
//!   with a dash, otherwise the flag is a bare `true`.
//! - `-abc` registers `a`, `b` and `c` as bare flags and never takes a value.
//! - `--` ends flag parsing; everything after it is positional.
//! - Anything else (including a lone `-`) is positional. Empty tokens are
//!   skipped.

use tracing::debug;

use crate::types::{FlagBag, FlagForm, FlagValue, Tokens};

/// Tokenizes `argv` (program name already stripped).
///
/// # Examples
///
/// ```
/// use command_args_core::{FlagValue, tokenize};
///
/// let argv = ["build", "--env=NODE_ENV=production", "-abc", "-o", "out"];
/// let tokens = tokenize(&argv);
///
/// assert_eq!(tokens.positionals, vec!["build"]);
/// assert_eq!(tokens.flags.get("env"), Some(&FlagValue::text("NODE_ENV=production")));
/// assert_eq!(tokens.flags.get("b"), Some(&FlagValue::Present));
/// assert_eq!(tokens.flags.get("o"), Some(&FlagValue::text("out")));
/// ```
pub fn tokenize<S: AsRef<str>>(argv: &[S]) -> Tokens {
    let mut tokens = Tokens::default();
    let mut i = 0usize;

    while i < argv.len() {
        let arg = argv[i].as_ref();

        if arg.is_empty() {
            i += 1;
            continue;
        }

        if arg == "--" {
            tokens
                .positionals
                .extend(argv[i + 1..].iter().map(|s| s.as_ref().to_string()));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if let Some((key, value)) = long.split_once('=') {
                tokens.flags.push_as(key, FlagValue::text(value), FlagForm::Long);
                i += 1;
            } else {
                let next = argv.get(i + 1).map(AsRef::as_ref);
                i += take_value(&mut tokens.flags, long, FlagForm::Long, next);
            }
            continue;
        }

        if let Some(short) = arg.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(_), None) => {
                    let next = argv.get(i + 1).map(AsRef::as_ref);
                    i += take_value(&mut tokens.flags, short, FlagForm::Short, next);
                    continue;
                }
                (Some(_), Some(_)) => {
                    for ch in short.chars() {
                        tokens.flags.push_as(ch.to_string(), FlagValue::Present, FlagForm::Short);
                    }
                    i += 1;
                    continue;
                }
                // A lone `-` is positional (conventionally stdin).
                (None, _) => {}
            }
        }

        tokens.positionals.push(arg.to_string());
        i += 1;
    }

    debug!(
        flags = tokens.flags.len(),
        positionals = tokens.positionals.len(),
        "tokenized arguments"
    );
    tokens
}

/// Stores `key` with the lookahead value if there is one; returns how many
/// tokens were consumed.
fn take_value(flags: &mut FlagBag, key: &str, form: FlagForm, next: Option<&str>) -> usize {
    match next {
        Some(value) if !value.starts_with('-') => {
            flags.push_as(key, FlagValue::text(value), form);
            2
        }
        _ => {
            flags.push_as(key, FlagValue::Present, form);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> FlagValue {
        FlagValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_long_flag_splits_on_first_equals_only() {
        let tokens = tokenize(&["--key=value=with=equals"]);
        assert_eq!(tokens.flags.get("key"), Some(&FlagValue::text("value=with=equals")));
        assert!(tokens.positionals.is_empty());
    }

    #[test]
    fn test_long_flag_with_empty_value() {
        let tokens = tokenize(&["--name="]);
        assert_eq!(tokens.flags.get("name"), Some(&FlagValue::text("")));
    }

    #[test]
    fn test_long_flag_consumes_next_value() {
        let tokens = tokenize(&["--out", "dist", "file.txt"]);
        assert_eq!(tokens.flags.get("out"), Some(&FlagValue::text("dist")));
        assert_eq!(tokens.positionals, vec!["file.txt"]);
    }

    #[test]
    fn test_long_flag_before_dash_token_is_boolean() {
        let tokens = tokenize(&["--verbose", "--out", "dist"]);
        assert_eq!(tokens.flags.get("verbose"), Some(&FlagValue::Present));
        assert_eq!(tokens.flags.get("out"), Some(&FlagValue::text("dist")));
    }

    #[test]
    fn test_trailing_long_flag_is_boolean() {
        let tokens = tokenize(&["run", "--watch"]);
        assert_eq!(tokens.flags.get("watch"), Some(&FlagValue::Present));
        assert_eq!(tokens.positionals, vec!["run"]);
    }

    #[test]
    fn test_single_short_flag_takes_value() {
        let tokens = tokenize(&["-p", "8080"]);
        assert_eq!(tokens.flags.get("p"), Some(&FlagValue::text("8080")));
    }

    #[test]
    fn test_clustered_short_flags_never_take_values() {
        let tokens = tokenize(&["-abc", "value"]);
        assert_eq!(tokens.flags.get("a"), Some(&FlagValue::Present));
        assert_eq!(tokens.flags.get("b"), Some(&FlagValue::Present));
        assert_eq!(tokens.flags.get("c"), Some(&FlagValue::Present));
        assert_eq!(tokens.positionals, vec!["value"]);
    }

    #[test]
    fn test_repeated_flags_accumulate() {
        let tokens = tokenize(&["--files", "a.txt", "--files", "b.txt", "--files=c.txt"]);
        assert_eq!(tokens.flags.get("files"), Some(&list(&["a.txt", "b.txt", "c.txt"])));
    }

    #[test]
    fn test_lone_dash_is_positional_and_empty_tokens_skipped() {
        let tokens = tokenize(&["", "-", "x"]);
        assert_eq!(tokens.positionals, vec!["-", "x"]);
        assert!(tokens.flags.is_empty());
    }

    #[test]
    fn test_double_dash_ends_flag_parsing() {
        let tokens = tokenize(&["exec", "--", "--not-a-flag", "-x"]);
        assert!(tokens.flags.is_empty());
        assert_eq!(tokens.positionals, vec!["exec", "--not-a-flag", "-x"]);

        let leading = tokenize(&["--", "x"]);
        assert!(leading.flags.is_empty());
        assert_eq!(leading.positionals, vec!["x"]);
    }

    #[test]
    fn test_records_how_each_flag_was_typed() {
        let tokens = tokenize(&["--x", "-y", "1", "-ab", "--long=v"]);
        assert_eq!(tokens.flags.form_of("x"), Some(FlagForm::Long));
        assert_eq!(tokens.flags.form_of("y"), Some(FlagForm::Short));
        assert_eq!(tokens.flags.form_of("a"), Some(FlagForm::Short));
        assert_eq!(tokens.flags.form_of("long"), Some(FlagForm::Long));
    }

    #[test]
    fn test_key_case_and_hyphenation_untouched() {
        let tokens = tokenize(&["--Android-Max", "10"]);
        assert_eq!(tokens.flags.get("Android-Max"), Some(&FlagValue::text("10")));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let argv = vec!["--a".to_string(), "1".to_string()];
        let tokens = tokenize(&argv);
        assert_eq!(tokens.flags.get("a"), Some(&FlagValue::text("1")));
    }
}
