//! Built-in option schema.
//!
//! [`Fields`] is an ordered list of [`FieldSchema`] declarations and
//! implements [`OptionSchema`]. It is serializable so command packages can
//! declare options in JSON or YAML.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{FieldIssue, OptionSchema, ValueType};
use crate::types::{FlagBag, FlagValue};

/// Declaration of a single named option.
///
/// # Examples
///
/// ```
/// use command_args_core::{FieldSchema, ValueType};
///
/// let port = FieldSchema::with_value("port", ValueType::Integer)
///     .with_default(8080)
///     .with_description("Port to listen on");
/// assert!(!port.multiple);
/// assert_eq!(port.default, Some(serde_json::json!(8080)));
///
/// let files = FieldSchema::with_value("files", ValueType::String).allow_multiple();
/// assert!(files.multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Canonical (camel-style) name, e.g. `androidMax`.
    pub name: String,
    #[serde(default)]
    pub value_type: ValueType,
    /// Accepts a sequence of values.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    /// Creates a boolean switch.
    pub fn boolean(name: &str) -> Self {
        Self::with_value(name, ValueType::Bool)
    }

    /// Creates an option taking a value of `value_type`.
    pub fn with_value(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            multiple: false,
            required: false,
            default: None,
            description: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks as accepting multiple values.
    pub fn allow_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    fn validate_into(&self, value: Option<&FlagValue>, out: &mut Map<String, Value>, issues: &mut Vec<FieldIssue>) {
        let name = self.name.as_str();
        match value {
            None => {
                if let Some(default) = &self.default {
                    out.insert(name.to_string(), default.clone());
                } else if self.required {
                    issues.push(FieldIssue::new(name, "required"));
                }
            }
            Some(FlagValue::List(items)) if self.multiple => {
                let mut values = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    match self.value_type.coerce(Some(item)) {
                        Ok(v) => values.push(v),
                        Err(reason) => issues.push(FieldIssue::new(format!("{name}.{idx}"), reason)),
                    }
                }
                out.insert(name.to_string(), Value::Array(values));
            }
            Some(FlagValue::List(items)) => {
                issues.push(FieldIssue::new(
                    name,
                    format!("expected a single value, received {} values", items.len()),
                ));
            }
            Some(single) => {
                let raw = match single {
                    FlagValue::Text(s) => Some(s.as_str()),
                    _ => None,
                };
                match self.value_type.coerce(raw) {
                    Ok(v) if self.multiple => {
                        out.insert(name.to_string(), Value::Array(vec![v]));
                    }
                    Ok(v) => {
                        out.insert(name.to_string(), v);
                    }
                    Err(reason) => {
                        let path = if self.multiple { format!("{name}.0") } else { name.to_string() };
                        issues.push(FieldIssue::new(path, reason));
                    }
                }
            }
        }
    }
}

/// Ordered set of [`FieldSchema`] declarations.
///
/// # Examples
///
/// ```
/// use command_args_core::{FieldSchema, Fields, FlagBag, FlagValue, OptionSchema, ValueType};
///
/// let fields = Fields::new()
///     .field(FieldSchema::boolean("verbose"))
///     .field(FieldSchema::with_value("port", ValueType::Integer).with_default(3000));
///
/// let mut bag = FlagBag::new();
/// bag.push("verbose", FlagValue::Present);
///
/// let options = fields.validate(&bag).unwrap();
/// assert_eq!(options, serde_json::json!({"verbose": true, "port": 3000}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: Vec<FieldSchema>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field declaration.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn find(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<FieldSchema>> for Fields {
    fn from(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }
}

impl OptionSchema for Fields {
    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn is_array_field(&self, name: &str) -> bool {
        self.find(name).is_some_and(|f| f.multiple)
    }

    fn default_of(&self, name: &str) -> Option<Value> {
        self.find(name).and_then(|f| f.default.clone())
    }

    fn description_of(&self, name: &str) -> Option<String> {
        self.find(name).and_then(|f| f.description.clone())
    }

    fn has_field(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn validate(&self, flags: &FlagBag) -> Result<Value, Vec<FieldIssue>> {
        let mut out = Map::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            field.validate_into(flags.get(&field.name), &mut out, &mut issues);
        }

        if issues.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(issues)
        }
    }
}
