//! # Type Registry
//!
//! Maps discriminant strings to their schemas. Polymorphic decoding consults
//! the registry to find the concrete schema named by a fragment's `type`.
//!
//! A registry is populated while types are declared and is read-only
//! afterwards. Registering a name twice replaces the earlier schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DecodeError;
use crate::object::Object;
use crate::schema::ObjectSchema;

/// Discriminant name to schema table.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    schemas: BTreeMap<String, Arc<ObjectSchema>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own name and return the shared handle,
    /// which later declarations use as a base.
    pub fn register(&mut self, schema: ObjectSchema) -> Arc<ObjectSchema> {
        let schema = Arc::new(schema);
        let name = schema.name().to_string();
        let fields = schema.len();
        if self.schemas.insert(name.clone(), Arc::clone(&schema)).is_some() {
            tracing::warn!(type_name = %name, "replaced previously registered schema");
        } else {
            tracing::debug!(type_name = %name, fields, "registered schema");
        }
        schema
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ObjectSchema>> {
        self.schemas.get(name)
    }

    /// Look up a schema by name, failing with a decode error if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownType`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<&Arc<ObjectSchema>, DecodeError> {
        self.get(name)
            .ok_or_else(|| DecodeError::UnknownType(name.to_string()))
    }

    /// Decode `tree` as the type registered under `type_name`, dispatching
    /// to a subtype when the tree's own discriminant names one.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `type_name` or the tree's discriminant
    /// cannot be resolved.
    pub fn decode(&self, type_name: &str, tree: &Value) -> Result<Object, DecodeError> {
        let target = self.resolve(type_name)?;
        Object::decode(target, tree, self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Registered names of non-abstract types, sorted.
    pub fn concrete_names(&self) -> impl Iterator<Item = &str> {
        self.schemas
            .values()
            .filter(|s| !s.is_abstract())
            .map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
