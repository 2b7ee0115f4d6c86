//! End-to-end write-path tests
//!
//! Drives `replace_properties` and `update_properties` against a live
//! repository: read the current triples, apply, re-read, and check the
//! stored state and the report.

use grove_db_core::{NodePath, PropertyValue, Repository, Session};
use grove_db_rdf::{triples_for, IdentifierTranslator, TripleCategory};
use grove_db_transact::{
    replace_properties, update_properties, ApplyOptions, ProblemKind, TransactError,
};
use grove_graph_ir::{Graph, Term, Triple};
use grove_vocab::{dcterms, rdf};

const BASE: &str = "http://localhost:8080/repo";

fn path(raw: &str) -> NodePath {
    NodePath::parse(raw).unwrap()
}

fn translator() -> IdentifierTranslator {
    IdentifierTranslator::new(BASE)
}

/// The resource's current triples as the diff engine sees them
fn current_triples(session: &Session, at: &NodePath, translator: &IdentifierTranslator) -> Vec<Triple> {
    let resource = session.resource(at).unwrap();
    triples_for(
        &resource,
        translator,
        &[TripleCategory::Properties, TripleCategory::Types],
        session,
    )
    .unwrap()
    .collect_triples()
    .unwrap()
}

/// Strip the server-managed statements, leaving only what a client may
/// write back
fn writable(triples: &[Triple]) -> Vec<Triple> {
    triples
        .iter()
        .filter(|t| {
            !t.is_type_statement()
                && !t
                    .p
                    .as_iri()
                    .is_some_and(grove_db_transact::is_server_managed)
        })
        .cloned()
        .collect()
}

fn title_triple(translator: &IdentifierTranslator, at: &NodePath, value: &str) -> Triple {
    Triple::new(
        translator.to_term(at),
        Term::iri(dcterms::TITLE),
        Term::string(value),
    )
}

#[test]
fn test_replace_then_replay_is_idempotent() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    session
        .add_value(&at, "dc:title", PropertyValue::String("old".into()))
        .unwrap();
    let resource = session.resource(&at).unwrap();

    let desired: Graph = vec![title_triple(&translator, &at, "new")].into_iter().collect();
    let current = writable(&current_triples(&session, &at, &translator));
    let report = replace_properties(
        &mut session,
        &resource,
        &translator,
        &desired,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();
    assert!(report.is_clean());
    assert_eq!(
        session.node(&at).unwrap().values("dc:title"),
        &[PropertyValue::String("new".to_string())]
    );

    // Second call with the now-current graph: empty report, no mutation
    let modified_before = session.node(&at).unwrap().modified;
    let current = writable(&current_triples(&session, &at, &translator));
    let resource = session.resource(&at).unwrap();
    let report = replace_properties(
        &mut session,
        &resource,
        &translator,
        &desired,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();
    assert!(report.is_clean());
    assert_eq!(session.node(&at).unwrap().modified, modified_before);
}

#[test]
fn test_adding_existing_value_is_not_duplicated() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    session
        .add_value(&at, "dc:title", PropertyValue::String("kept".into()))
        .unwrap();
    let resource = session.resource(&at).unwrap();

    // Desired repeats the stored value and adds a second property
    let desired: Graph = vec![
        title_triple(&translator, &at, "kept"),
        Triple::new(
            translator.to_term(&at),
            Term::iri(dcterms::DESCRIPTION),
            Term::string("about"),
        ),
    ]
    .into_iter()
    .collect();
    let current = writable(&current_triples(&session, &at, &translator));
    let report = replace_properties(
        &mut session,
        &resource,
        &translator,
        &desired,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(session.node(&at).unwrap().values("dc:title").len(), 1);
    assert_eq!(session.node(&at).unwrap().values("dc:description").len(), 1);
}

#[test]
fn test_update_patch_resolution_scenario() {
    // current {(<s>,<p>,"a")}; patch deletes "a", inserts "b"
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    session
        .add_value(&at, "dc:title", PropertyValue::String("a".into()))
        .unwrap();
    let resource = session.resource(&at).unwrap();
    let subject = translator.to_uri(&at);

    let patch = format!(
        "PREFIX dc: <{}>\n\
         DELETE {{ <{subject}> dc:title ?t }}\n\
         INSERT {{ <{subject}> dc:title \"b\" }}\n\
         WHERE  {{ <{subject}> dc:title ?t }}",
        dcterms::NAMESPACE,
    );
    let current = writable(&current_triples(&session, &at, &translator));
    let report = update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    assert!(report.is_clean());
    // Exactly one value, "b"
    assert_eq!(
        session.node(&at).unwrap().values("dc:title"),
        &[PropertyValue::String("b".to_string())]
    );
}

#[test]
fn test_unparsable_patch_fails_before_any_mutation() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    session
        .add_value(&at, "dc:title", PropertyValue::String("safe".into()))
        .unwrap();
    let resource = session.resource(&at).unwrap();

    for bad in [
        "DELETE GARBAGE",
        "INSERT DATA { <http://x.org/a> undeclared:p \"v\" }",
        // Template variable nothing binds
        "INSERT { <http://x.org/a> <http://x.org/p> ?free } WHERE { <http://x.org/a> <http://x.org/q> ?v }",
    ] {
        let err = update_properties(
            &mut session,
            &resource,
            &translator,
            bad,
            &[],
            ApplyOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TransactError::MalformedRdf(_)), "{}", bad);
    }
    // Stored state untouched
    assert_eq!(
        session.node(&at).unwrap().values("dc:title"),
        &[PropertyValue::String("safe".to_string())]
    );
}

#[test]
fn test_mixin_registration_through_patch() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    let resource = session.resource(&at).unwrap();
    let subject = translator.to_uri(&at);

    let patch = format!("INSERT DATA {{ <{subject}> a <http://types.example.com#Labeled> }}");
    let current = current_triples(&session, &at, &translator);
    let report = update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    assert!(report.is_clean());
    let node = session.node(&at).unwrap();
    assert_eq!(node.mixins.len(), 1);
    // A declaration exists for the registered mixin
    let decl = session.type_decl(&node.mixins[0]).unwrap().unwrap();
    assert!(decl.mixin);

    // With registration disabled the statement is a problem, types unchanged
    let at2 = path("/doc2");
    session.create(&at2, "repo:Container").unwrap();
    let resource2 = session.resource(&at2).unwrap();
    let subject2 = translator.to_uri(&at2);
    let patch2 = format!("INSERT DATA {{ <{subject2}> a <http://types.example.com#Other> }}");
    let current2 = current_triples(&session, &at2, &translator);
    let report = update_properties(
        &mut session,
        &resource2,
        &translator,
        &patch2,
        &current2,
        ApplyOptions::new().with_auto_register_types(false),
    )
    .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.problems()[0].kind, ProblemKind::UnknownType);
    assert!(session.node(&at2).unwrap().mixins.is_empty());
}

#[test]
fn test_namespace_prefix_is_stable_across_applications() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    let resource = session.resource(&at).unwrap();
    let subject = translator.to_uri(&at);

    let patch = format!("INSERT DATA {{ <{subject}> <http://one.example.com#p> \"v1\" }}");
    update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &[],
        ApplyOptions::new(),
    )
    .unwrap();
    let prefix = session
        .prefix_for_uri("http://one.example.com#")
        .unwrap()
        .unwrap();

    // Unrelated registrations in between
    session
        .register_namespace("zzz", "http://two.example.com#")
        .unwrap();
    let patch = format!("INSERT DATA {{ <{subject}> <http://three.example.com#q> \"v2\" }}");
    let current = current_triples(&session, &at, &translator);
    update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    // Re-applying a statement in the first namespace never remaps it
    let patch = format!("INSERT DATA {{ <{subject}> <http://one.example.com#p> \"v3\" }}");
    let current = current_triples(&session, &at, &translator);
    update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();
    assert_eq!(
        session
            .prefix_for_uri("http://one.example.com#")
            .unwrap()
            .unwrap(),
        prefix
    );
    // Both values landed under the same prefixed property
    assert_eq!(
        session
            .node(&at)
            .unwrap()
            .values(&format!("{}:p", prefix))
            .len(),
        2
    );
}

#[test]
fn test_full_replacement_removes_what_desired_omits() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    session
        .add_value(&at, "dc:title", PropertyValue::String("gone".into()))
        .unwrap();
    session
        .add_value(&at, "dc:description", PropertyValue::String("kept".into()))
        .unwrap();
    let resource = session.resource(&at).unwrap();

    // Desired keeps only the description
    let desired: Graph = vec![Triple::new(
        translator.to_term(&at),
        Term::iri(dcterms::DESCRIPTION),
        Term::string("kept"),
    )]
    .into_iter()
    .collect();
    let current = writable(&current_triples(&session, &at, &translator));
    let report = replace_properties(
        &mut session,
        &resource,
        &translator,
        &desired,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    assert!(report.is_clean());
    let node = session.node(&at).unwrap();
    assert!(!node.has_property("dc:title"));
    assert_eq!(
        node.values("dc:description"),
        &[PropertyValue::String("kept".to_string())]
    );
}

#[test]
fn test_type_statement_in_replacement_adds_mixin() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    let resource = session.resource(&at).unwrap();

    let current = current_triples(&session, &at, &translator);
    // Desired = current plus one new type statement
    let mut desired: Graph = current.iter().cloned().collect();
    desired.add(Triple::new(
        translator.to_term(&at),
        Term::iri(rdf::TYPE),
        Term::iri("http://types.example.com#Audited"),
    ));

    let report = replace_properties(
        &mut session,
        &resource,
        &translator,
        &desired,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(session.node(&at).unwrap().mixins.len(), 1);
}

#[test]
fn test_problems_accumulate_and_session_still_commits_cleanly() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    let resource = session.resource(&at).unwrap();
    let subject = translator.to_uri(&at);

    // One good statement, one server-managed statement
    let patch = format!(
        "PREFIX dc: <{}>\n\
         PREFIX repo: <https://ns.grove.dev/repository#>\n\
         INSERT DATA {{\n\
           <{subject}> dc:title \"good\" .\n\
           <{subject}> repo:childCount 99 .\n\
         }}",
        dcterms::NAMESPACE,
    );
    let current = current_triples(&session, &at, &translator);
    let report = update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();

    // The good statement applied, the bad one is a fatal-class problem
    assert_eq!(report.len(), 1);
    assert!(report.is_fatal());
    assert_eq!(
        session.node(&at).unwrap().values("dc:title"),
        &[PropertyValue::String("good".to_string())]
    );

    // The engine never rolls back; discarding voids the partial write
    session.discard();
    let fresh = repo.login().unwrap();
    assert!(!fresh.exists(&at));
}

#[test]
fn test_committed_mutations_visible_to_new_sessions() {
    let repo = Repository::new();
    let translator = translator();
    let mut session = repo.login().unwrap();
    let at = path("/doc");
    session.create(&at, "repo:Container").unwrap();
    let resource = session.resource(&at).unwrap();
    let subject = translator.to_uri(&at);

    let patch = format!(
        "PREFIX dc: <{}>\nINSERT DATA {{ <{subject}> dc:title \"published\" }}",
        dcterms::NAMESPACE,
    );
    let current = current_triples(&session, &at, &translator);
    let report = update_properties(
        &mut session,
        &resource,
        &translator,
        &patch,
        &current,
        ApplyOptions::new(),
    )
    .unwrap();
    assert!(!report.is_fatal());
    session.commit().unwrap();

    let fresh = repo.login().unwrap();
    assert_eq!(
        fresh.node(&at).unwrap().values("dc:title"),
        &[PropertyValue::String("published".to_string())]
    );
}
