//! # Object Schemas
//!
//! An [`ObjectSchema`] is the frozen, ordered field set of one declared type.
//! [`SchemaBuilder`] produces it by merging the field sets of the type's
//! bases with the type's own members.
//!
//! ## Merge Rules
//!
//! 1. Bases contribute their fields in base declaration order, each base in
//!    its own field order. A name already present is skipped.
//! 2. Own members apply in declaration order. A field adds a new entry or
//!    replaces an inherited one in place; an exclusion removes an inherited
//!    field.
//! 3. The result is frozen. Field order drives validation, encoding and
//!    decoding order.

use std::sync::Arc;

use crate::field::FieldSpec;

/// The frozen field set of one declared type.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    name: String,
    is_abstract: bool,
    ancestors: Vec<String>,
    fields: Vec<(String, FieldSpec)>,
}

impl ObjectSchema {
    /// The public type name, which is also the discriminant value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Abstract schemas can be field targets but cannot be instantiated by decoding.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Names of every transitive base, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// True if this schema is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.ancestors.iter().any(|a| a == name)
    }

    /// Fields in merged declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Look up one field by attribute name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug)]
enum Member {
    Field(String, FieldSpec),
    Exclude(String),
}

/// Declares a type: its bases and its own members.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    is_abstract: bool,
    bases: Vec<Arc<ObjectSchema>>,
    members: Vec<Member>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Inherit from `base`. Call once per base, in precedence order.
    pub fn extends(mut self, base: &Arc<ObjectSchema>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    /// Mark the type abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Declare (or redeclare) a field.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.members.push(Member::Field(name.into(), spec));
        self
    }

    /// Remove an inherited field from this type.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.members.push(Member::Exclude(name.into()));
        self
    }

    pub fn build(self) -> ObjectSchema {
        let mut fields: Vec<(String, FieldSpec)> = Vec::new();
        let mut ancestors: Vec<String> = Vec::new();

        for base in &self.bases {
            for (name, spec) in base.fields() {
                if !fields.iter().any(|(n, _)| n == name) {
                    fields.push((name.to_string(), spec.clone()));
                }
            }
            let lineage = std::iter::once(base.name()).chain(base.ancestors().iter().map(String::as_str));
            for ancestor in lineage {
                if !ancestors.iter().any(|a| a == ancestor) {
                    ancestors.push(ancestor.to_string());
                }
            }
        }

        for member in self.members {
            match member {
                Member::Field(name, spec) => match fields.iter_mut().find(|(n, _)| *n == name) {
                    Some(existing) => existing.1 = spec,
                    None => fields.push((name, spec)),
                },
                Member::Exclude(name) => fields.retain(|(n, _)| *n != name),
            }
        }

        ObjectSchema {
            name: self.name,
            is_abstract: self.is_abstract,
            ancestors,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn base() -> Arc<ObjectSchema> {
        Arc::new(
            SchemaBuilder::new("Base")
                .abstract_type()
                .field("type", FieldSpec::discriminant())
                .field("crs", FieldSpec::opaque().optional().nullable())
                .field("bbox", FieldSpec::opaque().optional().nullable())
                .build(),
        )
    }

    #[test]
    fn base_fields_come_first_in_order() {
        let base = base();
        let child = SchemaBuilder::new("Child")
            .extends(&base)
            .field("coordinates", FieldSpec::position())
            .build();
        assert_eq!(child.field_names(), vec!["type", "crs", "bbox", "coordinates"]);
        assert!(!child.is_abstract());
        assert!(child.is_a("Base"));
        assert!(child.is_a("Child"));
        assert!(!child.is_a("Other"));
    }

    #[test]
    fn redeclared_field_replaces_in_place() {
        let base = base();
        let geometry = Arc::new(
            SchemaBuilder::new("Geometry")
                .extends(&base)
                .field("coordinates", FieldSpec::position())
                .build(),
        );
        let line = SchemaBuilder::new("Line")
            .extends(&geometry)
            .field("coordinates", FieldSpec::list(FieldSpec::position()).min_length(2))
            .build();
        assert_eq!(line.field_names(), vec!["type", "crs", "bbox", "coordinates"]);
        assert!(matches!(line.field("coordinates").unwrap().kind(), FieldKind::List(_)));
        assert_eq!(line.ancestors(), &["Geometry".to_string(), "Base".to_string()]);
    }

    #[test]
    fn exclude_removes_inherited_field() {
        let base = base();
        let geometry = Arc::new(
            SchemaBuilder::new("Geometry")
                .extends(&base)
                .field("coordinates", FieldSpec::position())
                .build(),
        );
        let collection = SchemaBuilder::new("Collection")
            .extends(&geometry)
            .exclude("coordinates")
            .field("geometries", FieldSpec::list(FieldSpec::object("Geometry")))
            .build();
        assert_eq!(collection.field_names(), vec!["type", "crs", "bbox", "geometries"]);
        assert!(collection.field("coordinates").is_none());
        assert!(collection.is_a("Geometry"));
    }

    #[test]
    fn multiple_bases_merge_first_wins() {
        let a = Arc::new(
            SchemaBuilder::new("A")
                .field("x", FieldSpec::opaque())
                .field("shared", FieldSpec::mapping())
                .build(),
        );
        let b = Arc::new(
            SchemaBuilder::new("B")
                .field("shared", FieldSpec::position())
                .field("y", FieldSpec::opaque())
                .build(),
        );
        let c = SchemaBuilder::new("C").extends(&a).extends(&b).build();
        assert_eq!(c.field_names(), vec!["x", "shared", "y"]);
        assert!(matches!(c.field("shared").unwrap().kind(), FieldKind::Mapping));
        assert!(c.is_a("A") && c.is_a("B"));
    }

    #[test]
    fn excluding_unknown_name_is_a_no_op() {
        let s = SchemaBuilder::new("S")
            .field("a", FieldSpec::opaque())
            .exclude("b")
            .build();
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
    }
}
