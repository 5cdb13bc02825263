//! Default values applied to a raw configuration document.
//!
//! Defaults are injected into the parsed mapping before typed decoding, and
//! only for keys that are absent (or explicitly `null`). A present value is
//! never replaced here, even one validation will later reject.

use serde_yaml::{Mapping, Value};

/// Minimum number of storage compactors.
pub const MIN_COMPACTORS: i64 = 4;

/// A default value for a single dotted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Int(i64),
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Int(v) => Value::from(v),
            DefaultValue::Str(v) => Value::from(v),
            DefaultValue::Bool(v) => Value::from(v),
        }
    }
}

/// Dotted key → default value.
pub const DEFAULTS: &[(&str, DefaultValue)] = &[
    ("storage.num_compactors", DefaultValue::Int(MIN_COMPACTORS)),
    ("storage.compression_type", DefaultValue::Str("snappy")),
    ("storage.sync_writes", DefaultValue::Bool(false)),
];

/// Inject every entry of [`DEFAULTS`] missing from `root`.
pub fn apply_defaults(root: &mut Mapping) {
    for (key, value) in DEFAULTS {
        apply_default(root, key, *value);
    }
}

fn apply_default(root: &mut Mapping, dotted: &str, value: DefaultValue) {
    let mut segments: Vec<&str> = dotted.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let entry = current
            .entry(Value::from(segment))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if entry.is_null() {
            *entry = Value::Mapping(Mapping::new());
        }
        // A scalar where a section belongs is left for the decoder to report.
        match entry.as_mapping_mut() {
            Some(section) => current = section,
            None => return,
        }
    }

    let slot = current.entry(Value::from(leaf)).or_insert(Value::Null);
    if slot.is_null() {
        *slot = value.to_value();
    }
}
