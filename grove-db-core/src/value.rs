//! Typed property values
//!
//! Every stored property value carries its store type. The store's value
//! model is deliberately small: strings, booleans, 64-bit integers and
//! floats, UTC timestamps, URI strings, and in-tree references.

use crate::path::NodePath;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Declared type of a property
///
/// `Undefined` is used in property definitions that accept any value kind;
/// the stored value still carries its own concrete type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    /// UTF-8 string
    String,
    /// Boolean
    Boolean,
    /// 64-bit signed integer
    Long,
    /// 64-bit float
    Double,
    /// UTC timestamp
    DateTime,
    /// URI kept as an opaque string (not resolvable in this store)
    Uri,
    /// Reference to another node in the tree
    Reference,
    /// Any value kind accepted
    Undefined,
}

impl PropertyType {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Boolean => "boolean",
            PropertyType::Long => "long",
            PropertyType::Double => "double",
            PropertyType::DateTime => "dateTime",
            PropertyType::Uri => "uri",
            PropertyType::Reference => "reference",
            PropertyType::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A stored property value
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PropertyValue {
    /// UTF-8 string
    String(String),
    /// Boolean
    Boolean(bool),
    /// 64-bit signed integer
    Long(i64),
    /// 64-bit float
    Double(f64),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
    /// URI kept as an opaque string
    Uri(String),
    /// Reference to another node in the tree
    Reference(NodePath),
}

impl PropertyValue {
    /// The concrete type of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Long(_) => PropertyType::Long,
            PropertyValue::Double(_) => PropertyType::Double,
            PropertyValue::DateTime(_) => PropertyType::DateTime,
            PropertyValue::Uri(_) => PropertyType::Uri,
            PropertyValue::Reference(_) => PropertyType::Reference,
        }
    }

    /// Lexical form used in diagnostics and triple rendering
    pub fn lexical(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Boolean(b) => b.to_string(),
            PropertyValue::Long(i) => i.to_string(),
            PropertyValue::Double(d) => d.to_string(),
            PropertyValue::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            PropertyValue::Uri(u) => u.clone(),
            PropertyValue::Reference(p) => p.to_string(),
        }
    }

    /// Try to get as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a node reference
    pub fn as_reference(&self) -> Option<&NodePath> {
        match self {
            PropertyValue::Reference(p) => Some(p),
            _ => None,
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::String(a), PropertyValue::String(b)) => a == b,
            (PropertyValue::Boolean(a), PropertyValue::Boolean(b)) => a == b,
            (PropertyValue::Long(a), PropertyValue::Long(b)) => a == b,
            (PropertyValue::Double(a), PropertyValue::Double(b)) => a.to_bits() == b.to_bits(),
            (PropertyValue::DateTime(a), PropertyValue::DateTime(b)) => a == b,
            (PropertyValue::Uri(a), PropertyValue::Uri(b)) => a == b,
            (PropertyValue::Reference(a), PropertyValue::Reference(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::String(s) => s.hash(state),
            PropertyValue::Boolean(b) => b.hash(state),
            PropertyValue::Long(i) => i.hash(state),
            PropertyValue::Double(d) => d.to_bits().hash(state),
            PropertyValue::DateTime(dt) => dt.hash(state),
            PropertyValue::Uri(u) => u.hash(state),
            PropertyValue::Reference(p) => p.hash(state),
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_types() {
        assert_eq!(
            PropertyValue::String("x".into()).property_type(),
            PropertyType::String
        );
        assert_eq!(PropertyValue::Long(7).property_type(), PropertyType::Long);
        assert_eq!(
            PropertyValue::Reference(NodePath::root()).property_type(),
            PropertyType::Reference
        );
    }

    #[test]
    fn test_double_equality_uses_bits() {
        assert_eq!(
            PropertyValue::Double(f64::NAN),
            PropertyValue::Double(f64::NAN)
        );
        assert_ne!(PropertyValue::Double(0.0), PropertyValue::Double(-0.0));
    }

    #[test]
    fn test_lexical() {
        assert_eq!(PropertyValue::Boolean(false).lexical(), "false");
        assert_eq!(PropertyValue::Long(42).lexical(), "42");
        assert_eq!(
            PropertyValue::Reference(NodePath::parse("/a/b").unwrap()).lexical(),
            "/a/b"
        );
    }
}
