//! RDF term → store value coercion
//!
//! The authoritative coercion logic for turning an RDF term into a typed
//! `PropertyValue`. A declared property definition wins when one exists;
//! otherwise the target type is inferred from the term kind: typed
//! literal → matching primitive, plain literal → string, URI →
//! reference when the translator recognizes it as in-repository, else a
//! URI string.

use chrono::{DateTime, Utc};
use grove_db_core::{PropertyType, PropertyValue};
use grove_db_rdf::IdentifierTranslator;
use grove_graph_ir::{LiteralValue, Term};
use grove_vocab::xsd;

/// Error returned when coercion fails
#[derive(Debug, Clone)]
pub struct CoercionError {
    /// Human-readable error message
    pub message: String,
}

impl CoercionError {
    /// Create a new coercion error
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    /// Create an incompatible-kind error
    pub fn incompatible(term: &Term, target: PropertyType) -> Self {
        Self::new(format!("cannot coerce {} to {}", term, target))
    }
}

impl std::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CoercionError {}

/// Result type for coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Coerce an RDF term into a stored value
///
/// `declared` is the property's declared type when a definition exists;
/// pass `None` (or `Undefined`) to infer from the term kind.
pub fn term_to_value(
    term: &Term,
    translator: &IdentifierTranslator,
    declared: Option<PropertyType>,
) -> CoercionResult<PropertyValue> {
    match term {
        Term::BlankNode(_) => Err(CoercionError::new(
            "blank node is not addressable as a stored value",
        )),
        Term::Iri(uri) => coerce_uri(uri, translator, declared),
        Term::Literal {
            value, datatype, ..
        } => match declared {
            None | Some(PropertyType::Undefined) => infer_literal(term, value, datatype.as_iri()),
            Some(target) => coerce_literal(term, value, target),
        },
    }
}

fn coerce_uri(
    uri: &str,
    translator: &IdentifierTranslator,
    declared: Option<PropertyType>,
) -> CoercionResult<PropertyValue> {
    match declared {
        None | Some(PropertyType::Undefined) => {
            if translator.in_namespace(uri) {
                let path = translator
                    .to_path(uri)
                    .map_err(|e| CoercionError::new(e.to_string()))?;
                Ok(PropertyValue::Reference(path.canonical()))
            } else {
                Ok(PropertyValue::Uri(uri.to_string()))
            }
        }
        Some(PropertyType::Reference) => {
            let path = translator
                .to_path(uri)
                .map_err(|e| CoercionError::new(e.to_string()))?;
            Ok(PropertyValue::Reference(path.canonical()))
        }
        Some(PropertyType::Uri) => Ok(PropertyValue::Uri(uri.to_string())),
        Some(PropertyType::String) => Ok(PropertyValue::String(uri.to_string())),
        Some(target) => Err(CoercionError::new(format!(
            "cannot coerce URI <{}> to {}",
            uri, target
        ))),
    }
}

/// Infer the stored type from the literal's datatype IRI
fn infer_literal(
    term: &Term,
    value: &LiteralValue,
    datatype_iri: &str,
) -> CoercionResult<PropertyValue> {
    if xsd::is_integer_family(datatype_iri) {
        return coerce_literal(term, value, PropertyType::Long);
    }
    match datatype_iri {
        xsd::BOOLEAN => coerce_literal(term, value, PropertyType::Boolean),
        xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => coerce_literal(term, value, PropertyType::Double),
        xsd::DATE_TIME => coerce_literal(term, value, PropertyType::DateTime),
        xsd::ANY_URI => coerce_literal(term, value, PropertyType::Uri),
        // Plain strings, langStrings, and unknown datatypes store as string
        _ => Ok(PropertyValue::String(value.lexical())),
    }
}

/// Coerce a literal toward a declared target type
fn coerce_literal(
    term: &Term,
    value: &LiteralValue,
    target: PropertyType,
) -> CoercionResult<PropertyValue> {
    match target {
        PropertyType::String => Ok(PropertyValue::String(value.lexical())),
        PropertyType::Uri => Ok(PropertyValue::Uri(value.lexical())),
        PropertyType::Boolean => match value {
            LiteralValue::Boolean(b) => Ok(PropertyValue::Boolean(*b)),
            LiteralValue::String(s) => match s.as_ref() {
                "true" | "1" => Ok(PropertyValue::Boolean(true)),
                "false" | "0" => Ok(PropertyValue::Boolean(false)),
                _ => Err(CoercionError::incompatible(term, target)),
            },
            _ => Err(CoercionError::incompatible(term, target)),
        },
        PropertyType::Long => match value {
            LiteralValue::Long(i) => Ok(PropertyValue::Long(*i)),
            LiteralValue::String(s) => s
                .parse::<i64>()
                .map(PropertyValue::Long)
                .map_err(|_| CoercionError::incompatible(term, target)),
            _ => Err(CoercionError::incompatible(term, target)),
        },
        PropertyType::Double => match value {
            LiteralValue::Double(d) => Ok(PropertyValue::Double(*d)),
            LiteralValue::Long(i) => Ok(PropertyValue::Double(*i as f64)),
            LiteralValue::String(s) => s
                .parse::<f64>()
                .map(PropertyValue::Double)
                .map_err(|_| CoercionError::incompatible(term, target)),
            _ => Err(CoercionError::incompatible(term, target)),
        },
        PropertyType::DateTime => match value {
            LiteralValue::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| PropertyValue::DateTime(dt.with_timezone(&Utc)))
                .map_err(|e| {
                    CoercionError::new(format!("cannot parse '{}' as dateTime: {}", s, e))
                }),
            _ => Err(CoercionError::incompatible(term, target)),
        },
        PropertyType::Reference => Err(CoercionError::new(format!(
            "literal {} cannot be stored as a reference",
            term
        ))),
        PropertyType::Undefined => infer_from_native(value),
    }
}

fn infer_from_native(value: &LiteralValue) -> CoercionResult<PropertyValue> {
    Ok(match value {
        LiteralValue::String(s) => PropertyValue::String(s.to_string()),
        LiteralValue::Boolean(b) => PropertyValue::Boolean(*b),
        LiteralValue::Long(i) => PropertyValue::Long(*i),
        LiteralValue::Double(d) => PropertyValue::Double(*d),
    })
}
