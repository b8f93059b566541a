//! Schema capability consumed by the processing pipeline.
//!
//! The pipeline never looks inside a validation backend. It asks an
//! [`OptionSchema`] which fields exist, which of them are array-shaped and
//! what their defaults are, and hands it the normalized [`FlagBag`] to
//! validate. Positionals go through an [`ArgsSchema`]. Both report failures as
//! a list of [`FieldIssue`]s instead of a backend-specific error type.
//!
//! [`Fields`](crate::Fields) and [`Positionals`](crate::Positionals) are the
//! built-in backends; any other type implementing these traits can be plugged
//! into a [`CommandDefinition`](crate::CommandDefinition).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::types::FlagBag;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path to the offending value (`port`, `files.1`, `0`).
    pub path: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Introspection and validation of a command's named options.
pub trait OptionSchema: fmt::Debug + Send + Sync {
    /// Canonical field names in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Whether the field accepts a sequence of values.
    fn is_array_field(&self, name: &str) -> bool;

    /// Declared default value, if any.
    fn default_of(&self, name: &str) -> Option<Value>;

    fn description_of(&self, _name: &str) -> Option<String> {
        None
    }

    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|f| f == name)
    }

    /// Validates and coerces the normalized flags into a JSON object.
    fn validate(&self, flags: &FlagBag) -> Result<Value, Vec<FieldIssue>>;
}

/// Validation of a command's positional arguments.
pub trait ArgsSchema: fmt::Debug + Send + Sync {
    /// Help rows: usage label (`<file>`, `[dest]`, `<paths>...`) and description.
    fn arg_rows(&self) -> Vec<(String, Option<String>)> {
        Vec::new()
    }

    fn validate(&self, positionals: &[String]) -> Result<Value, Vec<FieldIssue>>;
}

/// Value type accepted by a field or positional argument.
///
/// # Examples
///
/// ```
/// use command_args_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// let format = ValueType::Choice(vec!["json".into(), "yaml".into()]);
/// assert!(format.coerce(Some("yaml")).is_ok());
/// assert!(format.coerce(Some("toml")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true`/`false`; a bare flag is `true`.
    Bool,
    #[default]
    String,
    /// Finite floating point number.
    Number,
    /// Signed 64-bit integer.
    Integer,
    /// One of a fixed set of strings.
    Choice(Vec<String>),
    /// Any string; a bare flag is `true`.
    Any,
}

impl ValueType {
    /// Coerces one raw value. `None` stands for a bare flag.
    pub fn coerce(&self, raw: Option<&str>) -> Result<Value, String> {
        match (self, raw) {
            (Self::Bool | Self::Any, None) => Ok(Value::Bool(true)),
            (_, None) => Err(format!("expected {}, received a bare flag", self.expected())),
            (Self::Bool, Some(s)) => match s {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(self.mismatch(s)),
            },
            (Self::String | Self::Any, Some(s)) => Ok(Value::String(s.to_string())),
            (Self::Number, Some(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| self.mismatch(s)),
            (Self::Integer, Some(s)) => s
                .trim()
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| self.mismatch(s)),
            (Self::Choice(choices), Some(s)) => {
                if choices.iter().any(|c| c == s) {
                    Ok(Value::String(s.to_string()))
                } else {
                    Err(self.mismatch(s))
                }
            }
        }
    }

    fn expected(&self) -> String {
        match self {
            Self::Bool => "a boolean".to_string(),
            Self::String | Self::Any => "a string".to_string(),
            Self::Number => "a number".to_string(),
            Self::Integer => "an integer".to_string(),
            Self::Choice(choices) => format!("one of {}", choices.join(", ")),
        }
    }

    fn mismatch(&self, raw: &str) -> String {
        format!("expected {}, received {raw:?}", self.expected())
    }
}
