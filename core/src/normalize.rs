//! Array normalization.

use tracing::debug;

use crate::schema::OptionSchema;
use crate::types::{FlagBag, FlagValue};

/// Wraps lone values of array-typed fields into one-element sequences.
///
/// Runs after name resolution so the canonical keys are in place. Absent
/// fields and values that are already sequences are left untouched.
///
/// # Examples
///
/// ```
/// use command_args_core::{FieldSchema, Fields, FlagBag, FlagValue, ValueType, normalize_arrays};
///
/// let fields = Fields::new().field(FieldSchema::with_value("files", ValueType::String).allow_multiple());
/// let mut flags = FlagBag::new();
/// flags.push("files", FlagValue::text("a.txt"));
///
/// normalize_arrays(&mut flags, &fields);
/// assert_eq!(flags.get("files"), Some(&FlagValue::List(vec!["a.txt".into()])));
/// ```
pub fn normalize_arrays(flags: &mut FlagBag, schema: &dyn OptionSchema) {
    for field in schema.field_names() {
        if !schema.is_array_field(&field) {
            continue;
        }
        if let Some(value) = flags.get_mut(&field) {
            if value.is_list() {
                continue;
            }
            let single = std::mem::replace(value, FlagValue::List(Vec::new()));
            *value = FlagValue::List(single.into_strings());
            debug!(field = %field, "wrapped single value into sequence");
        }
    }
}
