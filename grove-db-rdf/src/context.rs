//! Per-category triple producers
//!
//! Each producer takes a resource snapshot, the active translator, and
//! the session, and lazily produces the triples describing one aspect of
//! the resource. Producers are pure functions of store state at call
//! time; nothing is cached across calls.
//!
//! Categories are disjoint by predicate namespace, so concatenating any
//! set of producers never yields a duplicate statement. Merging is plain
//! concatenation in caller order — the order is a caller-visible
//! contract.

use crate::category::TripleCategory;
use crate::error::Result;
use crate::namespace::NamespaceBridge;
use crate::stream::RdfStream;
use crate::translator::IdentifierTranslator;
use grove_db_core::{split_prefixed, PropertyValue, Resource, Session};
use grove_graph_ir::{Term, Triple};
use grove_vocab::{ldp, prefixes, rdf, repo};

/// Check if a stored property is internal bookkeeping
fn is_internal_property(name: &str) -> bool {
    matches!(split_prefixed(name), Some((prefix, _)) if prefix == prefixes::SYS)
}

/// Render a stored value as an RDF term
fn value_to_term(value: &PropertyValue, translator: &IdentifierTranslator) -> Term {
    match value {
        PropertyValue::String(s) => Term::string(s),
        PropertyValue::Boolean(b) => Term::boolean(*b),
        PropertyValue::Long(i) => Term::long(*i),
        PropertyValue::Double(d) => Term::double(*d),
        PropertyValue::DateTime(dt) => Term::date_time(*dt),
        PropertyValue::Uri(u) => Term::iri(u),
        PropertyValue::Reference(path) => translator.to_term(path),
    }
}

/// Produce the requested categories for a resource, concatenated in
/// caller order
///
/// Duplicate categories in the request are collapsed to their first
/// occurrence so no statement is emitted twice.
pub fn triples_for<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    categories: &[TripleCategory],
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let mut seen: Vec<TripleCategory> = Vec::with_capacity(categories.len());
    let mut stream = RdfStream::empty(translator.to_term(&resource.path));
    for &category in categories {
        if seen.contains(&category) {
            continue;
        }
        seen.push(category);
        let produced = match category {
            TripleCategory::Properties => properties_context(resource, translator, session)?,
            TripleCategory::Children => children_context(resource, translator, session)?,
            TripleCategory::ChildListing => child_listing_context(resource, translator, session)?,
            TripleCategory::Types => types_context(resource, translator, session)?,
            TripleCategory::Versions => versions_context(resource, translator, session)?,
        };
        stream = stream.concat(produced);
    }
    tracing::debug!(
        resource = %resource.path,
        categories = seen.len(),
        "produced triple stream"
    );
    Ok(stream)
}

/// Stored property values, plus the managed created/lastModified pair
///
/// One triple per stored value; multi-valued properties emit one triple
/// per value in stored order. Internal (`sys:`) properties are skipped.
pub fn properties_context<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let subject = translator.to_term(&resource.path);
    let node = session.node(&resource.path)?;

    let managed = vec![
        Ok(Triple::new(
            subject.clone(),
            Term::iri(repo::CREATED),
            Term::date_time(node.created),
        )),
        Ok(Triple::new(
            subject.clone(),
            Term::iri(repo::LAST_MODIFIED),
            Term::date_time(node.modified),
        )),
    ];

    let props: Vec<(String, Vec<PropertyValue>)> = node
        .properties
        .into_iter()
        .filter(|(name, _)| !is_internal_property(name))
        .collect();

    let stored_subject = subject.clone();
    let stored = props.into_iter().flat_map(
        move |(name, values)| -> Box<dyn Iterator<Item = Result<Triple>> + 'a> {
            match NamespaceBridge::expand(session, &name) {
                Err(e) => Box::new(std::iter::once(Err(e))),
                Ok(predicate) => {
                    let subject = stored_subject.clone();
                    Box::new(values.into_iter().map(move |value| {
                        Ok(Triple::new(
                            subject.clone(),
                            Term::iri(&predicate),
                            value_to_term(&value, translator),
                        ))
                    }))
                }
            }
        },
    );

    Ok(RdfStream::new(subject, managed.into_iter().chain(stored)))
}

/// The immediate-child count, computed by counting (never by listing)
///
/// Always exactly one triple, an integer literal.
pub fn children_context<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let subject = translator.to_term(&resource.path);
    let count = session.child_count(&resource.path)?;
    let triple = Triple::new(
        subject.clone(),
        Term::iri(repo::CHILD_COUNT),
        Term::long(count as i64),
    );
    Ok(RdfStream::from_triples(subject, vec![triple]))
}

/// One containment triple per immediate child
pub fn child_listing_context<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let subject = translator.to_term(&resource.path);
    let children = session.children(&resource.path)?;
    let listing_subject = subject.clone();
    let iter = children.into_iter().map(move |child| {
        Ok(Triple::new(
            listing_subject.clone(),
            Term::iri(ldp::CONTAINS),
            translator.to_term(&child),
        ))
    });
    Ok(RdfStream::new(subject, iter))
}

/// Declared primary type and mixins, rendered through the store-type →
/// RDF-type mapping (the namespace table)
pub fn types_context<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let subject = translator.to_term(&resource.path);
    let names = resource.type_names();
    let type_subject = subject.clone();
    let iter = names.into_iter().map(move |name| {
        let uri = NamespaceBridge::expand(session, &name)?;
        Ok(Triple::new(
            type_subject.clone(),
            Term::iri(rdf::TYPE),
            Term::iri(uri),
        ))
    });
    Ok(RdfStream::new(subject, iter))
}

/// Version history: one `repo:hasVersion` triple per label pointing at
/// the version-identified URI variant, plus label and creation triples
/// on each version subject
pub fn versions_context<'a>(
    resource: &Resource,
    translator: &'a IdentifierTranslator,
    session: &'a Session,
) -> Result<RdfStream<'a>> {
    let subject = translator.to_term(&resource.path);
    let versions = session.versions(&resource.path)?;
    let path = resource.path.clone();
    let version_subject = subject.clone();
    let iter = versions.into_iter().flat_map(move |version| {
        let version_uri = translator.version_uri(&path, &version.label);
        vec![
            Ok(Triple::new(
                version_subject.clone(),
                Term::iri(repo::HAS_VERSION),
                Term::iri(&version_uri),
            )),
            Ok(Triple::new(
                Term::iri(&version_uri),
                Term::iri(repo::HAS_VERSION_LABEL),
                Term::string(&version.label),
            )),
            Ok(Triple::new(
                Term::iri(&version_uri),
                Term::iri(repo::CREATED),
                Term::date_time(version.created),
            )),
        ]
        .into_iter()
    });
    Ok(RdfStream::new(subject, iter))
}
