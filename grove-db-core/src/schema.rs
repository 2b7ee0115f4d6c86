//! Runtime-extensible type registry
//!
//! The store's schema language is small: a node has exactly one primary
//! type plus any number of mixins. Type declarations are registered at
//! runtime; "add mixin" on the write path is a lookup-or-create against
//! this registry rather than anything resembling subclassing.

use crate::value::PropertyType;
use grove_vocab::prefixes;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Declared shape of one property on a type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Prefixed property name (e.g. `dc:title`)
    pub name: String,
    /// Required value type, or `Undefined` to accept any
    pub required_type: PropertyType,
    /// Whether the property holds multiple values
    pub multiple: bool,
}

/// A named type declaration
///
/// On-the-fly registrations (from the write path) are always mixins with
/// no property definitions; richer declarations come from seeding or from
/// explicit registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Prefixed type name (e.g. `repo:Container`)
    pub name: String,
    /// Whether this is a mixin (true) or a primary type (false)
    pub mixin: bool,
    /// Property definitions enforced on carriers of this type
    pub properties: Vec<PropertyDef>,
    /// Mixins that must stay present while this type is declared
    pub required_mixins: Vec<String>,
}

impl TypeDecl {
    /// A bare mixin declaration, as produced by on-the-fly registration
    pub fn mixin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mixin: true,
            properties: Vec::new(),
            required_mixins: Vec::new(),
        }
    }

    /// A primary type declaration
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mixin: false,
            properties: Vec::new(),
            required_mixins: Vec::new(),
        }
    }

    /// Add a property definition (builder style)
    pub fn with_property(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    /// Add a required mixin (builder style)
    pub fn with_required_mixin(mut self, name: impl Into<String>) -> Self {
        self.required_mixins.push(name.into());
        self
    }
}

/// Registry of type declarations, keyed by prefixed name
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    decls: FxHashMap<String, TypeDecl>,
}

impl TypeRegistry {
    /// Create a registry seeded with the built-in repository types
    pub fn new() -> Self {
        let mut registry = Self {
            decls: FxHashMap::default(),
        };
        for decl in builtin_types() {
            registry.decls.insert(decl.name.clone(), decl);
        }
        registry
    }

    /// Look up a declaration by prefixed name
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    /// Check if a declaration exists
    pub fn has(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Register a declaration
    ///
    /// A declaration with the same name is left untouched; registration is
    /// append-only, mirroring the namespace table.
    pub fn register(&mut self, decl: TypeDecl) {
        self.decls.entry(decl.name.clone()).or_insert(decl);
    }

    /// Number of registered declarations
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Find the property definition for `property` across the given
    /// declared type names, if any declares it
    pub fn property_def<'a, I>(&self, declared: I, property: &str) -> Option<&PropertyDef>
    where
        I: IntoIterator<Item = &'a str>,
    {
        declared
            .into_iter()
            .filter_map(|name| self.decls.get(name))
            .flat_map(|decl| decl.properties.iter())
            .find(|def| def.name == property)
    }

    /// Names of declared types that list `mixin` as required
    pub fn requiring(&self, mixin: &str, declared: &[String]) -> Vec<String> {
        declared
            .iter()
            .filter(|name| name.as_str() != mixin)
            .filter_map(|name| self.decls.get(name.as_str()))
            .filter(|decl| decl.required_mixins.iter().any(|m| m == mixin))
            .map(|decl| decl.name.clone())
            .collect()
    }
}

fn builtin_types() -> Vec<TypeDecl> {
    let repo = prefixes::REPO;
    vec![
        TypeDecl::primary(format!("{}:Resource", repo)),
        TypeDecl::primary(format!("{}:Container", repo)),
        TypeDecl::mixin(format!("{}:Versionable", repo)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        let registry = TypeRegistry::new();
        assert!(registry.has("repo:Container"));
        assert!(registry.has("repo:Versionable"));
        assert!(registry.get("repo:Versionable").unwrap().mixin);
        assert!(!registry.get("repo:Container").unwrap().mixin);
    }

    #[test]
    fn test_register_is_append_only() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDecl::mixin("ex:Tagged"));
        assert!(registry.has("ex:Tagged"));

        // Re-registering under the same name keeps the first declaration
        registry.register(TypeDecl::primary("ex:Tagged"));
        assert!(registry.get("ex:Tagged").unwrap().mixin);
    }

    #[test]
    fn test_property_def_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDecl::mixin("ex:Described").with_property(PropertyDef {
            name: "dc:title".to_string(),
            required_type: PropertyType::String,
            multiple: false,
        }));

        let declared = ["repo:Container", "ex:Described"];
        let def = registry.property_def(declared, "dc:title").unwrap();
        assert_eq!(def.required_type, PropertyType::String);
        assert!(!def.multiple);

        assert!(registry.property_def(declared, "dc:creator").is_none());
    }

    #[test]
    fn test_requiring() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDecl::mixin("ex:Audited").with_required_mixin("repo:Versionable"));

        let declared = vec!["ex:Audited".to_string(), "repo:Versionable".to_string()];
        let requiring = registry.requiring("repo:Versionable", &declared);
        assert_eq!(requiring, vec!["ex:Audited".to_string()]);

        assert!(registry.requiring("ex:Audited", &declared).is_empty());
    }
}
