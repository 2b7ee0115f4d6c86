//! In-memory repository and session-scoped mutation
//!
//! `Repository` owns the committed tree. All reads and writes go through a
//! `Session`: mutations are buffered in a session overlay and become
//! visible to other sessions only on `commit()`. Discarding a session
//! voids everything it staged.
//!
//! Concurrency model: independent sessions proceed concurrently; the
//! committed state sits behind an `RwLock`, and a commit takes the write
//! lock briefly. Serializing concurrent writers to the same resource is
//! the caller's concern, not this layer's.

use crate::error::{Error, Result};
use crate::namespaces::{default_namespaces, split_prefixed};
use crate::node::{NodeData, VersionEntry};
use crate::path::NodePath;
use crate::resource::Resource;
use crate::schema::{PropertyDef, TypeDecl, TypeRegistry};
use crate::value::PropertyValue;
use chrono::Utc;
use grove_vocab::prefixes;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Repository configuration
#[derive(Clone, Debug)]
pub struct RepositoryConfig {
    /// Namespace prefixes the store refuses to mutate under
    pub protected_prefixes: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: vec![prefixes::SYS.to_string()],
        }
    }
}

impl RepositoryConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a protected prefix (builder style)
    pub fn with_protected_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.protected_prefixes.push(prefix.into());
        self
    }
}

/// Committed repository state
#[derive(Debug)]
struct RepoState {
    nodes: BTreeMap<NodePath, NodeData>,
    namespaces: BTreeMap<String, String>,
    types: TypeRegistry,
    config: RepositoryConfig,
    next_tx: u64,
}

/// The repository: committed tree + namespace table + type registry
#[derive(Clone, Debug)]
pub struct Repository {
    state: Arc<RwLock<RepoState>>,
}

impl Repository {
    /// Create a repository with the default configuration
    ///
    /// The tree starts with a root container at `/`.
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    /// Create a repository with an explicit configuration
    pub fn with_config(config: RepositoryConfig) -> Self {
        let mut nodes = BTreeMap::new();
        let root_type = format!("{}:Container", prefixes::REPO);
        nodes.insert(
            NodePath::root(),
            NodeData::new(NodePath::root(), root_type, Utc::now()),
        );
        Self {
            state: Arc::new(RwLock::new(RepoState {
                nodes,
                namespaces: default_namespaces(),
                types: TypeRegistry::new(),
                config,
                next_tx: 1,
            })),
        }
    }

    /// Open a new session
    pub fn login(&self) -> Result<Session> {
        let mut state = write_state(&self.state)?;
        let tx_id = state.next_tx;
        state.next_tx += 1;
        let protected = state.config.protected_prefixes.clone();
        drop(state);
        Ok(Session {
            state: Arc::clone(&self.state),
            tx_id,
            nodes: FxHashMap::default(),
            new_paths: FxHashSet::default(),
            namespaces: Vec::new(),
            types: Vec::new(),
            protected,
        })
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

fn read_state(state: &Arc<RwLock<RepoState>>) -> Result<RwLockReadGuard<'_, RepoState>> {
    state
        .read()
        .map_err(|_| Error::other("repository lock poisoned"))
}

fn write_state(state: &Arc<RwLock<RepoState>>) -> Result<RwLockWriteGuard<'_, RepoState>> {
    state
        .write()
        .map_err(|_| Error::other("repository lock poisoned"))
}

/// Overlay entry for one node touched by the session
#[derive(Clone, Debug)]
enum NodeChange {
    Upsert(NodeData),
    Deleted,
}

/// A session: reads see committed state plus the session's own staged
/// mutations; writes stage into the overlay
#[derive(Debug)]
pub struct Session {
    state: Arc<RwLock<RepoState>>,
    tx_id: u64,
    nodes: FxHashMap<NodePath, NodeChange>,
    new_paths: FxHashSet<NodePath>,
    namespaces: Vec<(String, String)>,
    types: Vec<TypeDecl>,
    protected: Vec<String>,
}

impl Session {
    /// The session's transaction id (used in transaction-scoped path
    /// segments and tracing)
    pub fn transaction_id(&self) -> String {
        self.tx_id.to_string()
    }

    /// Check if the session has staged mutations
    pub fn is_dirty(&self) -> bool {
        !self.nodes.is_empty() || !self.namespaces.is_empty() || !self.types.is_empty()
    }

    fn check_writable(&self, prefixed_name: &str) -> Result<()> {
        if let Some((prefix, _)) = split_prefixed(prefixed_name) {
            if self.protected.iter().any(|p| p == prefix) {
                return Err(Error::access_denied(format!(
                    "'{}' is in a protected namespace",
                    prefixed_name
                )));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Read one node's data (session overlay first, then committed state)
    ///
    /// Transaction-scoped paths resolve to the same node as their
    /// canonical form.
    pub fn node(&self, path: &NodePath) -> Result<NodeData> {
        let canonical = path.canonical();
        match self.nodes.get(&canonical) {
            Some(NodeChange::Upsert(node)) => Ok(node.clone()),
            Some(NodeChange::Deleted) => {
                Err(Error::not_found(format!("node '{}'", canonical)))
            }
            None => {
                let state = read_state(&self.state)?;
                state
                    .nodes
                    .get(&canonical)
                    .cloned()
                    .ok_or_else(|| Error::not_found(format!("node '{}'", canonical)))
            }
        }
    }

    /// Check if a node exists
    pub fn exists(&self, path: &NodePath) -> bool {
        self.node(path).is_ok()
    }

    /// Snapshot a node as an owned `Resource`
    ///
    /// The snapshot keeps the path as given (including any transaction
    /// scope); the `new` flag reflects creation within this session.
    pub fn resource(&self, path: &NodePath) -> Result<Resource> {
        let node = self.node(path)?;
        let new = self.new_paths.contains(&path.canonical());
        Ok(Resource::from_node(path.clone(), &node, new))
    }

    /// Count immediate children without materializing them
    pub fn child_count(&self, path: &NodePath) -> Result<usize> {
        let canonical = path.canonical();
        self.node(&canonical)?;
        let state = read_state(&self.state)?;
        let mut count = 0;
        for child in state.nodes.keys() {
            if canonical.is_parent_of(child) {
                // Committed child, unless deleted in this session
                if !matches!(self.nodes.get(child), Some(NodeChange::Deleted)) {
                    count += 1;
                }
            }
        }
        for (child, change) in &self.nodes {
            if canonical.is_parent_of(child)
                && matches!(change, NodeChange::Upsert(_))
                && !state.nodes.contains_key(child)
            {
                count += 1;
            }
        }
        Ok(count)
    }

    /// List immediate children, sorted by path
    pub fn children(&self, path: &NodePath) -> Result<Vec<NodePath>> {
        let canonical = path.canonical();
        self.node(&canonical)?;
        let state = read_state(&self.state)?;
        let mut children: Vec<NodePath> = state
            .nodes
            .keys()
            .filter(|child| canonical.is_parent_of(child))
            .filter(|child| !matches!(self.nodes.get(*child), Some(NodeChange::Deleted)))
            .cloned()
            .collect();
        for (child, change) in &self.nodes {
            if canonical.is_parent_of(child)
                && matches!(change, NodeChange::Upsert(_))
                && !state.nodes.contains_key(child)
            {
                children.push(child.clone());
            }
        }
        children.sort();
        Ok(children)
    }

    /// The version history of a node, oldest first
    pub fn versions(&self, path: &NodePath) -> Result<Vec<VersionEntry>> {
        Ok(self.node(path)?.versions)
    }

    /// Resolve a namespace prefix to its URI
    pub fn namespace_uri(&self, prefix: &str) -> Result<Option<String>> {
        if let Some((_, uri)) = self.namespaces.iter().find(|(p, _)| p == prefix) {
            return Ok(Some(uri.clone()));
        }
        let state = read_state(&self.state)?;
        Ok(state.namespaces.get(prefix).cloned())
    }

    /// Resolve a namespace URI to its prefix
    pub fn prefix_for_uri(&self, uri: &str) -> Result<Option<String>> {
        if let Some((prefix, _)) = self.namespaces.iter().find(|(_, u)| u == uri) {
            return Ok(Some(prefix.clone()));
        }
        let state = read_state(&self.state)?;
        Ok(state
            .namespaces
            .iter()
            .find(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.clone()))
    }

    /// The full namespace table visible to this session
    pub fn namespaces(&self) -> Result<BTreeMap<String, String>> {
        let state = read_state(&self.state)?;
        let mut map = state.namespaces.clone();
        for (prefix, uri) in &self.namespaces {
            map.insert(prefix.clone(), uri.clone());
        }
        Ok(map)
    }

    /// Look up a type declaration visible to this session
    pub fn type_decl(&self, name: &str) -> Result<Option<TypeDecl>> {
        if let Some(decl) = self.types.iter().find(|d| d.name == name) {
            return Ok(Some(decl.clone()));
        }
        let state = read_state(&self.state)?;
        Ok(state.types.get(name).cloned())
    }

    /// Check if a type declaration exists
    pub fn has_type_decl(&self, name: &str) -> Result<bool> {
        Ok(self.type_decl(name)?.is_some())
    }

    /// Find the property definition for `property` among the node's
    /// declared types, if any declares it
    pub fn property_def(&self, path: &NodePath, property: &str) -> Result<Option<PropertyDef>> {
        let node = self.node(path)?;
        for type_name in node.type_names() {
            if let Some(decl) = self.type_decl(&type_name)? {
                if let Some(def) = decl.properties.iter().find(|d| d.name == property) {
                    return Ok(Some(def.clone()));
                }
            }
        }
        Ok(None)
    }

    /// Names of the node's declared types that require `mixin` to stay
    pub fn types_requiring(&self, path: &NodePath, mixin: &str) -> Result<Vec<String>> {
        let node = self.node(path)?;
        let mut requiring = Vec::new();
        for type_name in node.type_names() {
            if type_name == mixin {
                continue;
            }
            if let Some(decl) = self.type_decl(&type_name)? {
                if decl.required_mixins.iter().any(|m| m == mixin) {
                    requiring.push(decl.name);
                }
            }
        }
        Ok(requiring)
    }

    // ------------------------------------------------------------------
    // Writes (staged in the session overlay)
    // ------------------------------------------------------------------

    fn stage(&mut self, node: NodeData) {
        let path = node.path.clone();
        self.nodes.insert(path, NodeChange::Upsert(node));
    }

    fn node_for_update(&self, path: &NodePath) -> Result<NodeData> {
        let mut node = self.node(path)?;
        node.path = path.canonical();
        node.modified = Utc::now();
        Ok(node)
    }

    /// Create a node
    ///
    /// The parent must exist; the primary type must be a declared
    /// non-mixin type.
    pub fn create(&mut self, path: &NodePath, primary_type: &str) -> Result<Resource> {
        let canonical = path.canonical();
        if self.exists(&canonical) {
            return Err(Error::already_exists(format!("node '{}'", canonical)));
        }
        let parent = canonical
            .parent()
            .ok_or_else(|| Error::invalid_path("cannot create the root node"))?;
        self.node(&parent)?;

        match self.type_decl(primary_type)? {
            None => {
                return Err(Error::unknown_type(format!(
                    "primary type '{}' is not declared",
                    primary_type
                )))
            }
            Some(decl) if decl.mixin => {
                return Err(Error::constraint(format!(
                    "'{}' is a mixin and cannot be a primary type",
                    primary_type
                )))
            }
            Some(_) => {}
        }

        let node = NodeData::new(canonical.clone(), primary_type, Utc::now());
        let resource = Resource::from_node(path.clone(), &node, true);
        self.stage(node);
        self.new_paths.insert(canonical);
        Ok(resource)
    }

    /// Delete a node and its subtree
    pub fn delete(&mut self, path: &NodePath) -> Result<()> {
        let canonical = path.canonical();
        if canonical.is_root() {
            return Err(Error::constraint("cannot delete the root node"));
        }
        self.node(&canonical)?;

        let mut doomed = vec![canonical.clone()];
        {
            let state = read_state(&self.state)?;
            doomed.extend(
                state
                    .nodes
                    .keys()
                    .filter(|p| {
                        p.segments().len() > canonical.segments().len()
                            && p.segments()[..canonical.segments().len()]
                                == canonical.segments()[..]
                    })
                    .cloned(),
            );
        }
        let staged: Vec<NodePath> = self
            .nodes
            .iter()
            .filter(|(p, change)| {
                matches!(change, NodeChange::Upsert(_))
                    && p.segments().len() > canonical.segments().len()
                    && p.segments()[..canonical.segments().len()] == canonical.segments()[..]
            })
            .map(|(p, _)| p.clone())
            .collect();
        doomed.extend(staged);

        for path in doomed {
            self.new_paths.remove(&path);
            self.nodes.insert(path, NodeChange::Deleted);
        }
        Ok(())
    }

    /// Replace all values of a property
    ///
    /// An empty value list removes the property.
    pub fn set_property(
        &mut self,
        path: &NodePath,
        name: &str,
        values: Vec<PropertyValue>,
    ) -> Result<()> {
        self.check_writable(name)?;
        let mut node = self.node_for_update(path)?;
        if values.is_empty() {
            node.properties.remove(name);
        } else {
            node.properties.insert(name.to_string(), values);
        }
        self.stage(node);
        Ok(())
    }

    /// Append one value to a property
    pub fn add_value(&mut self, path: &NodePath, name: &str, value: PropertyValue) -> Result<()> {
        self.check_writable(name)?;
        let mut node = self.node_for_update(path)?;
        node.properties.entry(name.to_string()).or_default().push(value);
        self.stage(node);
        Ok(())
    }

    /// Remove one matching value from a property
    ///
    /// Removing the last value removes the property itself. Returns
    /// whether a value was removed; an absent value is a no-op, not an
    /// error.
    pub fn remove_value(
        &mut self,
        path: &NodePath,
        name: &str,
        value: &PropertyValue,
    ) -> Result<bool> {
        self.check_writable(name)?;
        let mut node = self.node_for_update(path)?;
        let Some(values) = node.properties.get_mut(name) else {
            return Ok(false);
        };
        let Some(pos) = values.iter().position(|v| v == value) else {
            return Ok(false);
        };
        values.remove(pos);
        if values.is_empty() {
            node.properties.remove(name);
        }
        self.stage(node);
        Ok(true)
    }

    /// Remove a property and all its values
    pub fn remove_property(&mut self, path: &NodePath, name: &str) -> Result<bool> {
        self.check_writable(name)?;
        let mut node = self.node_for_update(path)?;
        let removed = node.properties.remove(name).is_some();
        if removed {
            self.stage(node);
        }
        Ok(removed)
    }

    /// Add a mixin to a node
    ///
    /// The declaration must exist and be a mixin. Adding a mixin the node
    /// already carries is a no-op.
    pub fn add_mixin(&mut self, path: &NodePath, name: &str) -> Result<()> {
        self.check_writable(name)?;
        let decl = self.type_decl(name)?.ok_or_else(|| {
            Error::unknown_type(format!("type '{}' is not declared", name))
        })?;
        if !decl.mixin {
            return Err(Error::constraint(format!(
                "'{}' is a primary type and cannot be added as a mixin",
                name
            )));
        }
        let mut node = self.node_for_update(path)?;
        if node.has_type(name) {
            return Ok(());
        }
        node.mixins.push(name.to_string());
        self.stage(node);
        Ok(())
    }

    /// Remove a mixin from a node
    ///
    /// Returns whether the mixin was present. Fails when another declared
    /// type requires the mixin to stay.
    pub fn remove_mixin(&mut self, path: &NodePath, name: &str) -> Result<bool> {
        self.check_writable(name)?;
        let mut node = self.node_for_update(path)?;
        let Some(pos) = node.mixins.iter().position(|m| m == name) else {
            return Ok(false);
        };
        let requiring = self.types_requiring(path, name)?;
        if !requiring.is_empty() {
            return Err(Error::constraint(format!(
                "mixin '{}' is required by {}",
                name,
                requiring.join(", ")
            )));
        }
        node.mixins.remove(pos);
        self.stage(node);
        Ok(true)
    }

    /// Register a namespace
    ///
    /// Append-only: re-registering an identical mapping is a no-op; a
    /// prefix bound to a different URI, or a URI already bound under
    /// another prefix, is a conflict.
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) -> Result<()> {
        if let Some(existing) = self.namespace_uri(prefix)? {
            if existing == uri {
                return Ok(());
            }
            return Err(Error::namespace_conflict(format!(
                "prefix '{}' is bound to '{}'",
                prefix, existing
            )));
        }
        if let Some(existing) = self.prefix_for_uri(uri)? {
            return Err(Error::namespace_conflict(format!(
                "URI '{}' is already bound to prefix '{}'",
                uri, existing
            )));
        }
        self.namespaces.push((prefix.to_string(), uri.to_string()));
        Ok(())
    }

    /// Register a type declaration
    ///
    /// Append-only: an existing declaration with the same name wins.
    pub fn register_type(&mut self, decl: TypeDecl) -> Result<()> {
        self.check_writable(&decl.name)?;
        if self.has_type_decl(&decl.name)? {
            return Ok(());
        }
        self.types.push(decl);
        Ok(())
    }

    /// Enable versioning on a node (adds the `repo:Versionable` mixin)
    pub fn enable_versioning(&mut self, path: &NodePath) -> Result<()> {
        self.add_mixin(path, &versionable_type())
    }

    /// Disable versioning on a node
    ///
    /// Existing version history is kept; only the mixin is removed.
    pub fn disable_versioning(&mut self, path: &NodePath) -> Result<bool> {
        self.remove_mixin(path, &versionable_type())
    }

    /// Create a labeled version of a node
    ///
    /// The node must carry the `repo:Versionable` mixin; labels are
    /// unique per node.
    pub fn create_version(&mut self, path: &NodePath, label: &str) -> Result<()> {
        let mut node = self.node_for_update(path)?;
        if !node.has_type(&versionable_type()) {
            return Err(Error::constraint(format!(
                "node '{}' is not versionable",
                node.path
            )));
        }
        if node.versions.iter().any(|v| v.label == label) {
            return Err(Error::already_exists(format!("version label '{}'", label)));
        }
        node.versions.push(VersionEntry {
            label: label.to_string(),
            created: Utc::now(),
        });
        self.stage(node);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Publish all staged mutations to the committed state
    pub fn commit(&mut self) -> Result<()> {
        let mut state = write_state(&self.state)?;

        // Namespace and type registrations re-check conflicts under the
        // write lock; a concurrent identical registration is tolerated.
        for (prefix, uri) in self.namespaces.drain(..) {
            match state.namespaces.get(&prefix) {
                Some(existing) if *existing != uri => {
                    return Err(Error::namespace_conflict(format!(
                        "prefix '{}' was bound to '{}' by a concurrent session",
                        prefix, existing
                    )));
                }
                _ => {
                    state.namespaces.insert(prefix, uri);
                }
            }
        }
        for decl in self.types.drain(..) {
            state.types.register(decl);
        }
        for (path, change) in self.nodes.drain() {
            match change {
                NodeChange::Upsert(node) => {
                    state.nodes.insert(path, node);
                }
                NodeChange::Deleted => {
                    state.nodes.remove(&path);
                }
            }
        }
        self.new_paths.clear();
        Ok(())
    }

    /// Drop all staged mutations
    pub fn discard(&mut self) {
        self.nodes.clear();
        self.new_paths.clear();
        self.namespaces.clear();
        self.types.clear();
    }
}

fn versionable_type() -> String {
    format!("{}:Versionable", prefixes::REPO)
}
