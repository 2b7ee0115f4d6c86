//! Best-effort diff application
//!
//! `DiffApplier` walks a `GraphDiff` statement by statement against one
//! resource, in a fixed order: mixin removals, mixin additions, property
//! value removals, property value additions. Failures scoped to one
//! statement are recorded in the `DiffReport` and application continues;
//! only structural failures (the resource itself unreadable, the store
//! lock poisoned) abort.
//!
//! All mutations go through the caller's session, so everything applied
//! here stays invisible to other sessions until the caller commits — and
//! is void if the caller discards.

use crate::coerce::term_to_value;
use crate::diff::GraphDiff;
use crate::error::Result;
use crate::report::{DiffReport, ProblemKind};
use grove_db_core::{Error as CoreError, Resource, Session, TypeDecl};
use grove_db_rdf::{IdentifierTranslator, NamespaceBridge, RdfError};
use grove_graph_ir::{Term, Triple};
use grove_vocab::{ldp, repo};

/// Check if a predicate is maintained by the repository itself
///
/// Server-managed statements are produced on the read path and never
/// writable through a diff.
pub fn is_server_managed(predicate: &str) -> bool {
    predicate.starts_with(repo::NAMESPACE) || predicate == ldp::CONTAINS
}

/// Options for diff application
#[derive(Clone, Copy, Debug)]
pub struct ApplyOptions {
    /// Register a bare mixin declaration on the fly when a type statement
    /// references an unknown type (disabled: record `UnknownType` instead)
    pub auto_register_types: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            auto_register_types: true,
        }
    }
}

impl ApplyOptions {
    /// Create the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set on-the-fly type registration
    pub fn with_auto_register_types(mut self, enabled: bool) -> Self {
        self.auto_register_types = enabled;
        self
    }
}

/// Statement-by-statement diff application against one resource
pub struct DiffApplier<'a> {
    session: &'a mut Session,
    translator: &'a IdentifierTranslator,
    namespaces: NamespaceBridge,
    options: ApplyOptions,
    report: DiffReport,
}

impl<'a> DiffApplier<'a> {
    /// Create an applier over a session
    pub fn new(
        session: &'a mut Session,
        translator: &'a IdentifierTranslator,
        options: ApplyOptions,
    ) -> Self {
        Self {
            session,
            translator,
            namespaces: NamespaceBridge::new(),
            options,
            report: DiffReport::new(),
        }
    }

    /// Apply a diff to the resource, returning the report
    ///
    /// Partial application is visible through the session; the caller
    /// decides whether to commit based on the report.
    pub fn apply(mut self, resource: &Resource, diff: GraphDiff) -> Result<DiffReport> {
        let span = tracing::info_span!(
            "diff_apply",
            resource = %resource.path,
            adds = diff.to_add.len(),
            removes = diff.to_remove.len(),
        );
        let _guard = span.enter();

        let type_removals: Vec<Triple> = diff.type_removals().cloned().collect();
        let type_additions: Vec<Triple> = diff.type_additions().cloned().collect();
        let property_removals: Vec<Triple> = diff.property_removals().cloned().collect();
        let property_additions: Vec<Triple> = diff.property_additions().cloned().collect();

        tracing::debug!(
            type_removals = type_removals.len(),
            type_additions = type_additions.len(),
            property_removals = property_removals.len(),
            property_additions = property_additions.len(),
            "applying diff"
        );

        for triple in &type_removals {
            self.remove_type_statement(resource, triple)?;
        }
        for triple in &type_additions {
            self.add_type_statement(resource, triple)?;
        }
        for triple in &property_removals {
            self.remove_property_statement(resource, triple)?;
        }
        for triple in &property_additions {
            self.add_property_statement(resource, triple)?;
        }

        if self.namespaces.has_delta() {
            tracing::debug!(
                namespaces = self.namespaces.delta().len(),
                "registered namespaces during apply"
            );
        }
        tracing::debug!(problems = self.report.len(), "diff applied");
        Ok(self.report)
    }

    /// Check the statement is about the target resource
    ///
    /// Blank subjects are accepted (they describe the resource within one
    /// stream); a foreign IRI or a literal subject is a problem.
    fn check_subject(&mut self, resource: &Resource, triple: &Triple) -> bool {
        let ok = match &triple.s {
            Term::BlankNode(_) => true,
            Term::Iri(uri) => {
                let scoped = self.translator.to_uri(&resource.path);
                let canonical = self.translator.to_uri(&resource.path.canonical());
                uri.as_ref() == scoped || uri.as_ref() == canonical
            }
            Term::Literal { .. } => false,
        };
        if !ok {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                "statement subject is not the target resource",
            );
        }
        ok
    }

    fn remove_type_statement(&mut self, resource: &Resource, triple: &Triple) -> Result<()> {
        if !self.check_subject(resource, triple) {
            return Ok(());
        }
        let Some(uri) = triple.o.as_iri() else {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                "type statement object must be a URI",
            );
            return Ok(());
        };
        let name = match NamespaceBridge::shorten_existing(self.session, uri) {
            Ok(name) => name,
            // Unmapped namespace: the node cannot carry the type, no-op
            Err(RdfError::UnknownNamespace(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        match self.session.remove_mixin(&resource.path, &name) {
            // Removed, or absent (a no-op, not a problem)
            Ok(_) => Ok(()),
            Err(CoreError::ConstraintViolation(msg)) => {
                self.report
                    .record(ProblemKind::SchemaConstraint, triple.clone(), msg);
                Ok(())
            }
            Err(CoreError::AccessDenied(msg)) => {
                self.report
                    .record(ProblemKind::AccessDenied, triple.clone(), msg);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn add_type_statement(&mut self, resource: &Resource, triple: &Triple) -> Result<()> {
        if !self.check_subject(resource, triple) {
            return Ok(());
        }
        let Some(uri) = triple.o.as_iri() else {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                "type statement object must be a URI",
            );
            return Ok(());
        };
        let name = match self.namespaces.shorten(self.session, uri) {
            Ok(name) => name,
            Err(RdfError::UnknownNamespace(msg)) => {
                self.report
                    .record(ProblemKind::MalformedRdf, triple.clone(), msg);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        // Already declared (primary or mixin): nothing to do
        let node = self.session.node(&resource.path)?;
        if node.has_type(&name) {
            return Ok(());
        }

        if !self.session.has_type_decl(&name)? {
            if self.options.auto_register_types {
                self.session.register_type(TypeDecl::mixin(&name))?;
                tracing::debug!(name = %name, "registered mixin type on the fly");
            } else {
                self.report.record(
                    ProblemKind::UnknownType,
                    triple.clone(),
                    format!("no declaration for type '{}'", name),
                );
                return Ok(());
            }
        }

        match self.session.add_mixin(&resource.path, &name) {
            Ok(()) => Ok(()),
            Err(CoreError::ConstraintViolation(msg)) => {
                self.report
                    .record(ProblemKind::MalformedRdf, triple.clone(), msg);
                Ok(())
            }
            Err(CoreError::UnknownType(msg)) => {
                self.report
                    .record(ProblemKind::UnknownType, triple.clone(), msg);
                Ok(())
            }
            Err(CoreError::AccessDenied(msg)) => {
                self.report
                    .record(ProblemKind::AccessDenied, triple.clone(), msg);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove_property_statement(&mut self, resource: &Resource, triple: &Triple) -> Result<()> {
        if !self.check_subject(resource, triple) {
            return Ok(());
        }
        let Some(predicate) = triple.p.as_iri() else {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                "predicate must be a URI",
            );
            return Ok(());
        };
        if is_server_managed(predicate) {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                format!("'{}' is server-managed", predicate),
            );
            return Ok(());
        }
        let name = match NamespaceBridge::shorten_existing(self.session, predicate) {
            Ok(name) => name,
            // Unmapped namespace: no such value can be stored, no-op
            Err(RdfError::UnknownNamespace(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let declared = self
            .session
            .property_def(&resource.path, &name)?
            .map(|def| def.required_type);
        let Ok(value) = term_to_value(&triple.o, self.translator, declared) else {
            // The object cannot match any stored value: no-op removal
            return Ok(());
        };
        match self.session.remove_value(&resource.path, &name, &value) {
            Ok(_) => Ok(()),
            Err(CoreError::AccessDenied(msg)) => {
                self.report
                    .record(ProblemKind::AccessDenied, triple.clone(), msg);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn add_property_statement(&mut self, resource: &Resource, triple: &Triple) -> Result<()> {
        if !self.check_subject(resource, triple) {
            return Ok(());
        }
        let Some(predicate) = triple.p.as_iri() else {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                "predicate must be a URI",
            );
            return Ok(());
        };
        if is_server_managed(predicate) {
            self.report.record(
                ProblemKind::MalformedRdf,
                triple.clone(),
                format!("'{}' is server-managed", predicate),
            );
            return Ok(());
        }
        // Namespace registration is staged before the value that needs it
        let name = match self.namespaces.shorten(self.session, predicate) {
            Ok(name) => name,
            Err(RdfError::UnknownNamespace(msg)) => {
                self.report
                    .record(ProblemKind::MalformedRdf, triple.clone(), msg);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let def = self.session.property_def(&resource.path, &name)?;
        let declared = def.as_ref().map(|d| d.required_type);
        let value = match term_to_value(&triple.o, self.translator, declared) {
            Ok(value) => value,
            Err(e) => {
                self.report
                    .record(ProblemKind::MalformedRdf, triple.clone(), e.message);
                return Ok(());
            }
        };

        let node = self.session.node(&resource.path)?;
        let existing = node.values(&name);
        // Exact repeats never duplicate a stored value
        if existing.contains(&value) {
            return Ok(());
        }

        let single_valued = def.as_ref().is_some_and(|d| !d.multiple);
        let result = if single_valued && !existing.is_empty() {
            // Declared single-valued: the new value replaces the old
            self.session
                .set_property(&resource.path, &name, vec![value])
        } else {
            self.session.add_value(&resource.path, &name, value)
        };
        match result {
            Ok(()) => Ok(()),
            Err(CoreError::AccessDenied(msg)) => {
                self.report
                    .record(ProblemKind::AccessDenied, triple.clone(), msg);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
