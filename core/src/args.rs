//! Built-in positional argument schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{ArgsSchema, FieldIssue, ValueType};

/// Schema for a positional argument.
///
/// # Examples
///
/// ```
/// use command_args_core::{ArgSchema, ValueType};
///
/// let src = ArgSchema::required("source", ValueType::String);
/// assert!(src.required);
///
/// let rest = ArgSchema::optional("paths", ValueType::String).allow_multiple();
/// assert!(!rest.required);
/// assert!(rest.multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgSchema {
    pub name: String,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub required: bool,
    /// Collects every remaining positional; only valid as the last argument.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgSchema {
    pub fn required(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            required: true,
            multiple: false,
            default: None,
            description: None,
        }
    }

    pub fn optional(name: &str, value_type: ValueType) -> Self {
        Self {
            required: false,
            ..Self::required(name, value_type)
        }
    }

    /// Marks as accepting multiple values.
    pub fn allow_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    fn usage_label(&self) -> String {
        let dots = if self.multiple { "..." } else { "" };
        if self.required {
            format!("<{}>{dots}", self.name)
        } else {
            format!("[{}]{dots}", self.name)
        }
    }

    fn missing(&self, out: &mut Map<String, Value>, issues: &mut Vec<FieldIssue>) {
        if let Some(default) = &self.default {
            out.insert(self.name.clone(), default.clone());
        } else if self.required {
            issues.push(FieldIssue::new(&self.name, "required"));
        }
    }
}

/// Ordered positional declarations, bound into an object keyed by name.
///
/// # Examples
///
/// ```
/// use command_args_core::{ArgSchema, ArgsSchema, Positionals, ValueType};
///
/// let args = Positionals::new()
///     .arg(ArgSchema::required("source", ValueType::String))
///     .arg(ArgSchema::optional("count", ValueType::Integer));
///
/// let value = args.validate(&["in.txt".to_string(), "3".to_string()]).unwrap();
/// assert_eq!(value, serde_json::json!({"source": "in.txt", "count": 3}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Positionals {
    args: Vec<ArgSchema>,
}

impl Positionals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a positional argument.
    pub fn arg(mut self, arg: ArgSchema) -> Self {
        self.args.push(arg);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgSchema> {
        self.args.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl From<Vec<ArgSchema>> for Positionals {
    fn from(args: Vec<ArgSchema>) -> Self {
        Self { args }
    }
}

impl ArgsSchema for Positionals {
    fn arg_rows(&self) -> Vec<(String, Option<String>)> {
        self.args
            .iter()
            .map(|a| (a.usage_label(), a.description.clone()))
            .collect()
    }

    fn validate(&self, positionals: &[String]) -> Result<Value, Vec<FieldIssue>> {
        let mut out = Map::new();
        let mut issues = Vec::new();
        let mut next = 0usize;

        for arg in &self.args {
            if arg.multiple {
                let rest = &positionals[next.min(positionals.len())..];
                next = positionals.len();
                if rest.is_empty() {
                    arg.missing(&mut out, &mut issues);
                    continue;
                }
                let mut values = Vec::with_capacity(rest.len());
                for (idx, raw) in rest.iter().enumerate() {
                    match arg.value_type.coerce(Some(raw)) {
                        Ok(v) => values.push(v),
                        Err(reason) => {
                            issues.push(FieldIssue::new(format!("{}.{idx}", arg.name), reason))
                        }
                    }
                }
                out.insert(arg.name.clone(), Value::Array(values));
                continue;
            }

            match positionals.get(next) {
                Some(raw) => {
                    next += 1;
                    match arg.value_type.coerce(Some(raw)) {
                        Ok(v) => {
                            out.insert(arg.name.clone(), v);
                        }
                        Err(reason) => issues.push(FieldIssue::new(&arg.name, reason)),
                    }
                }
                None => arg.missing(&mut out, &mut issues),
            }
        }

        for (idx, raw) in positionals.iter().enumerate().skip(next) {
            issues.push(FieldIssue::new(
                idx.to_string(),
                format!("unexpected argument {raw:?}"),
            ));
        }

        if issues.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(issues)
        }
    }
}
