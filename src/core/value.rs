//! Untyped property-list values.
//!
//! Build settings, attributes and any field a kind does not model are kept
//! as `PlistValue`s so they survive a decode/encode cycle untouched.

use std::collections::BTreeMap;

/// A dictionary of plist values, ordered by key.
pub type Fields = BTreeMap<String, PlistValue>;

/// A value in an OpenStep-style property list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    String(String),
    Array(Vec<PlistValue>),
    Dictionary(Fields),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Fields> {
        match self {
            PlistValue::Dictionary(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn into_dictionary(self) -> Option<Fields> {
        match self {
            PlistValue::Dictionary(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short description of the value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }
}

impl From<&str> for PlistValue {
    fn from(s: &str) -> Self {
        PlistValue::String(s.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(s: String) -> Self {
        PlistValue::String(s)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(items: Vec<PlistValue>) -> Self {
        PlistValue::Array(items)
    }
}

impl From<Fields> for PlistValue {
    fn from(fields: Fields) -> Self {
        PlistValue::Dictionary(fields)
    }
}
