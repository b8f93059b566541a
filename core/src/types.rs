//! Flag bag data model.
//!
//! A [`FlagBag`] is created fresh for each invocation by the tokenizer and
//! rewritten in place by the later pipeline stages. Keys keep their raw
//! command-line spelling until alias and naming resolution runs.

use indexmap::IndexMap;
use serde_json::Value;

/// Keys that are never rejected as unknown options.
pub const RESERVED_KEYS: [&str; 2] = ["help", "version"];

/// Value held for a single flag key.
///
/// # Examples
///
/// ```
/// use command_args_core::FlagValue;
///
/// assert_eq!(FlagValue::Present.to_json(), serde_json::json!(true));
/// assert_eq!(FlagValue::text("a").to_json(), serde_json::json!("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag given without an attached value (boolean `true`).
    Present,
    /// Single string value.
    Text(String),
    /// Ordered sequence, produced by repetition or array normalization.
    List(Vec<String>),
}

impl FlagValue {
    /// Creates a [`FlagValue::Text`].
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether the value is a sequence.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether the value reads as an affirmative switch.
    ///
    /// Bare flags are truthy; text is truthy unless it is `false` or `0`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Present => true,
            Self::Text(s) => !matches!(s.as_str(), "false" | "0"),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Flattens the value into strings; a bare flag becomes `"true"`.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            Self::Present => vec!["true".to_string()],
            Self::Text(s) => vec![s],
            Self::List(items) => items,
        }
    }

    /// JSON view of the raw value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Present => Value::Bool(true),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// How a flag key was written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagForm {
    /// `--key`
    Long,
    /// `-k`, alone or clustered.
    Short,
}

/// Mapping from flag key to [`FlagValue`], in first-seen order.
///
/// Keys pushed by the tokenizer also remember the [`FlagForm`] of their first
/// occurrence, so errors can quote the flag as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagBag {
    entries: IndexMap<String, FlagValue>,
    forms: IndexMap<String, FlagForm>,
}

impl FlagBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occurrence of `key`, merging repeats into a sequence.
    ///
    /// The first occurrence stores the value as given. A second occurrence
    /// converts storage to a two-element sequence and later ones append.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::{FlagBag, FlagValue};
    ///
    /// let mut bag = FlagBag::new();
    /// bag.push("files", FlagValue::text("a.txt"));
    /// bag.push("files", FlagValue::text("b.txt"));
    /// bag.push("files", FlagValue::Present);
    /// assert_eq!(
    ///     bag.get("files"),
    ///     Some(&FlagValue::List(vec!["a.txt".into(), "b.txt".into(), "true".into()]))
    /// );
    /// ```
    pub fn push(&mut self, key: impl Into<String>, value: FlagValue) {
        let key = key.into();
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, value);
            }
            Some(FlagValue::List(items)) => items.extend(value.into_strings()),
            Some(existing) => {
                let mut items = std::mem::replace(existing, FlagValue::Present).into_strings();
                items.extend(value.into_strings());
                *existing = FlagValue::List(items);
            }
        }
    }

    /// Like [`FlagBag::push`], also recording the form of the first occurrence.
    pub fn push_as(&mut self, key: impl Into<String>, value: FlagValue, form: FlagForm) {
        let key = key.into();
        self.forms.entry(key.clone()).or_insert(form);
        self.push(key, value);
    }

    /// Form `key` was first typed in; `None` for keys not from the tokenizer.
    pub fn form_of(&self, key: &str) -> Option<FlagForm> {
        self.forms.get(key).copied()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: FlagValue) {
        self.entries.insert(key.into(), value);
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<FlagValue> {
        self.forms.shift_remove(key);
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FlagValue> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present with a truthy value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(FlagValue::is_truthy)
    }
}

impl FromIterator<(String, FlagValue)> for FlagBag {
    fn from_iter<I: IntoIterator<Item = (String, FlagValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            forms: IndexMap::new(),
        }
    }
}

/// Result of tokenizing an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Flags keyed by their raw spelling.
    pub flags: FlagBag,
    /// Positionals in encounter order.
    pub positionals: Vec<String>,
}
