//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of triples. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with an identifier valid only within one produced stream)
//! - A literal (value + explicit datatype + optional language tag)

use crate::Datatype;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within one produced triple sequence but have
/// no identity across sequences. Comparing blank nodes from different
/// graphs goes through [`Term::structurally_matches`], never through ID
/// equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Literal value storage
///
/// Stores the actual value in a type-appropriate format. Temporal values
/// keep their lexical form in `String` with the datatype carrying the
/// temporal meaning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LiteralValue {
    /// String value (UTF-8)
    String(Arc<str>),
    /// Boolean value
    Boolean(bool),
    /// Integer value (i64 range)
    Long(i64),
    /// Floating point value (f64)
    Double(f64),
}

impl LiteralValue {
    /// Create a string literal value
    pub fn string(s: impl AsRef<str>) -> Self {
        LiteralValue::String(Arc::from(s.as_ref()))
    }

    /// Get the lexical representation of this value
    pub fn lexical(&self) -> String {
        match self {
            LiteralValue::String(s) => s.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Long(i) => i.to_string(),
            LiteralValue::Double(d) => {
                if d.is_nan() {
                    "NaN".to_string()
                } else if d.is_infinite() {
                    if d.is_sign_positive() {
                        "INF".to_string()
                    } else {
                        "-INF".to_string()
                    }
                } else {
                    d.to_string()
                }
            }
        }
    }

    /// Try to get as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_long(&self) -> Option<i64> {
        match self {
            LiteralValue::Long(i) => Some(*i),
            _ => None,
        }
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralValue::String(a), LiteralValue::String(b)) => a == b,
            (LiteralValue::Boolean(a), LiteralValue::Boolean(b)) => a == b,
            (LiteralValue::Long(a), LiteralValue::Long(b)) => a == b,
            (LiteralValue::Double(a), LiteralValue::Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LiteralValue::String(s) => s.hash(state),
            LiteralValue::Boolean(b) => b.hash(state),
            LiteralValue::Long(i) => i.hash(state),
            LiteralValue::Double(d) => d.to_bits().hash(state),
        }
    }
}

impl PartialOrd for LiteralValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LiteralValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Type discriminant ordering: String < Boolean < Long < Double
        let type_ord = |v: &LiteralValue| -> u8 {
            match v {
                LiteralValue::String(_) => 0,
                LiteralValue::Boolean(_) => 1,
                LiteralValue::Long(_) => 2,
                LiteralValue::Double(_) => 3,
            }
        };

        match type_ord(self).cmp(&type_ord(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (LiteralValue::String(a), LiteralValue::String(b)) => a.cmp(b),
            (LiteralValue::Boolean(a), LiteralValue::Boolean(b)) => a.cmp(b),
            (LiteralValue::Long(a), LiteralValue::Long(b)) => a.cmp(b),
            (LiteralValue::Double(a), LiteralValue::Double(b)) => a
                .partial_cmp(b)
                .unwrap_or_else(|| a.to_bits().cmp(&b.to_bits())),
            _ => Ordering::Equal, // Should not happen
        }
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - For `Term::Literal` with a language tag, the datatype must be `rdf:langString`.
/// - The predicate position of a triple can only be `Term::Iri`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://schema.org/Person")
    Iri(Arc<str>),

    /// Blank node, scoped to one produced stream
    BlankNode(BlankId),

    /// Literal value with explicit datatype
    Literal {
        /// The actual value
        value: LiteralValue,
        /// Datatype (always present, never None)
        datatype: Datatype,
        /// Language tag (only valid when datatype is rdf:langString)
        language: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain string literal (xsd:string)
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::Literal {
            value: LiteralValue::string(value),
            datatype: Datatype::xsd_string(),
            language: None,
        }
    }

    /// Create a boolean literal (xsd:boolean)
    pub fn boolean(value: bool) -> Self {
        Term::Literal {
            value: LiteralValue::Boolean(value),
            datatype: Datatype::xsd_boolean(),
            language: None,
        }
    }

    /// Create an integer literal (xsd:long)
    pub fn long(value: i64) -> Self {
        Term::Literal {
            value: LiteralValue::Long(value),
            datatype: Datatype::xsd_long(),
            language: None,
        }
    }

    /// Create a double literal (xsd:double)
    pub fn double(value: f64) -> Self {
        Term::Literal {
            value: LiteralValue::Double(value),
            datatype: Datatype::xsd_double(),
            language: None,
        }
    }

    /// Create an xsd:dateTime literal from a UTC timestamp
    ///
    /// The lexical form is RFC 3339 with millisecond precision, which
    /// round-trips through `chrono` parsing.
    pub fn date_time(value: DateTime<Utc>) -> Self {
        Term::Literal {
            value: LiteralValue::string(value.to_rfc3339_opts(SecondsFormat::Millis, true)),
            datatype: Datatype::xsd_date_time(),
            language: None,
        }
    }

    /// Create a language-tagged string literal (rdf:langString)
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            value: LiteralValue::string(value),
            datatype: Datatype::rdf_lang_string(),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Create a typed literal with a custom datatype
    pub fn typed(value: impl AsRef<str>, datatype: Datatype) -> Self {
        Term::Literal {
            value: LiteralValue::string(value),
            datatype,
            language: None,
        }
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get literal components
    pub fn as_literal(&self) -> Option<(&LiteralValue, &Datatype, Option<&str>)> {
        match self {
            Term::Literal {
                value,
                datatype,
                language,
            } => Some((value, datatype, language.as_deref())),
            _ => None,
        }
    }

    /// Positional equivalence for cross-graph comparison
    ///
    /// Blank nodes match any blank node (their IDs carry no identity across
    /// graphs); every other term kind must be equal.
    pub fn structurally_matches(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::BlankNode(_), Term::BlankNode(_)) => true,
            _ => self == other,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a == b,
            (Term::BlankNode(a), Term::BlankNode(b)) => a == b,
            (
                Term::Literal {
                    value: v1,
                    datatype: d1,
                    language: l1,
                },
                Term::Literal {
                    value: v2,
                    datatype: d2,
                    language: l2,
                },
            ) => v1 == v2 && d1 == d2 && l1 == l2,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Term::Iri(iri) => iri.hash(state),
            Term::BlankNode(id) => id.hash(state),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                value.hash(state);
                datatype.hash(state);
                language.hash(state);
            }
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        // Type ordering: BlankNode < Iri < Literal
        let type_ord = |t: &Term| -> u8 {
            match t {
                Term::BlankNode(_) => 0,
                Term::Iri(_) => 1,
                Term::Literal { .. } => 2,
            }
        };

        match type_ord(self).cmp(&type_ord(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::BlankNode(a), Term::BlankNode(b)) => a.cmp(b),
            (
                Term::Literal {
                    value: v1,
                    datatype: d1,
                    language: l1,
                },
                Term::Literal {
                    value: v2,
                    datatype: d2,
                    language: l2,
                },
            ) => (d1, l1, v1).cmp(&(d2, l2, v2)),
            _ => Ordering::Equal, // Should not happen
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "{}", id),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", value.lexical())?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if !datatype.is_xsd_string() {
                    write!(f, "^^<{}>", datatype.as_iri())
                } else {
                    Ok(())
                }
            }
        }
    }
}
