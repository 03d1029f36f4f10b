//! # Schema-Driven Objects
//!
//! An [`Object`] is an instance of an [`ObjectSchema`]: a shared schema
//! handle plus one slot per field.
//!
//! ## Slot States
//!
//! Each field is *absent* (never set; reads fall back to the field's
//! default), *null* (explicitly null) or *present*. The discriminant field is
//! never stored: it always reads as the schema name.
//!
//! ## Validation
//!
//! [`Object::validate`] is a pure function of the current field values. It
//! walks every field in schema order and returns every violation it finds,
//! whether the values were decoded or assigned directly.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::error::DecodeError;
use crate::field::{FieldKind, FieldSpec, FieldValue};
use crate::registry::TypeRegistry;
use crate::schema::ObjectSchema;

const TYPE_MEMBER: &str = "type";

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Null,
    Present(FieldValue),
}

/// An instance of a declared type.
#[derive(Debug, Clone)]
pub struct Object {
    schema: Arc<ObjectSchema>,
    slots: BTreeMap<String, Slot>,
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.slots == other.slots
    }
}

impl Object {
    /// An instance with every field absent.
    pub fn new(schema: Arc<ObjectSchema>) -> Self {
        Self {
            schema,
            slots: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<ObjectSchema> {
        &self.schema
    }

    /// The discriminant value of this instance.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// True if this instance's type is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        self.schema.is_a(name)
    }

    fn spec(&self, name: &str) -> Result<&FieldSpec, DecodeError> {
        self.schema
            .field(name)
            .ok_or_else(|| DecodeError::UnknownField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }

    /// Current value of a field: the stored value, the field's default when
    /// absent, or `None` when null or undeclared.
    pub fn get(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        let spec = self.schema.field(name)?;
        if spec.is_discriminant() {
            return Some(Cow::Owned(FieldValue::Tree(Value::String(
                self.type_name().to_string(),
            ))));
        }
        match self.slots.get(name) {
            Some(Slot::Present(value)) => Some(Cow::Borrowed(value)),
            Some(Slot::Null) => None,
            None => spec.default_value().map(Cow::Owned),
        }
    }

    /// The explicitly stored value of a field, ignoring defaults.
    pub fn get_stored(&self, name: &str) -> Option<&FieldValue> {
        match self.slots.get(name) {
            Some(Slot::Present(value)) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to a field, materializing its default first if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownField`] if the schema has no such field.
    pub fn get_mut(&mut self, name: &str) -> Result<Option<&mut FieldValue>, DecodeError> {
        let spec = self.spec(name)?;
        if spec.is_discriminant() {
            return Ok(None);
        }
        if !self.slots.contains_key(name) {
            if let Some(default) = spec.default_value() {
                self.slots.insert(name.to_string(), Slot::Present(default));
            }
        }
        Ok(match self.slots.get_mut(name) {
            Some(Slot::Present(value)) => Some(value),
            _ => None,
        })
    }

    /// Assign a field. A tree `null` marks the field null.
    ///
    /// A tree array assigned to a list field is stored as a list of its
    /// elements, the same shape decoding produces.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownField`] for an undeclared name and
    /// [`DecodeError::TypeMismatch`] when assigning the discriminant anything
    /// other than this object's type name.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), DecodeError> {
        let value = value.into();
        let spec = self.spec(name)?;
        if spec.is_discriminant() {
            return self.check_discriminant(&value);
        }
        let value = match (spec.kind(), value) {
            (FieldKind::List(_), FieldValue::Tree(Value::Array(items))) => {
                FieldValue::List(items.into_iter().map(FieldValue::Tree).collect())
            }
            (_, value) => value,
        };
        let slot = if value.is_null() {
            Slot::Null
        } else {
            Slot::Present(value)
        };
        self.slots.insert(name.to_string(), slot);
        Ok(())
    }

    /// Mark a field explicitly null.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownField`] for an undeclared name.
    pub fn set_null(&mut self, name: &str) -> Result<(), DecodeError> {
        self.set(name, Value::Null)
    }

    /// Return a field to the absent state.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownField`] for an undeclared name.
    pub fn clear(&mut self, name: &str) -> Result<(), DecodeError> {
        self.spec(name)?;
        self.slots.remove(name);
        Ok(())
    }

    fn check_discriminant(&self, value: &FieldValue) -> Result<(), DecodeError> {
        match value.as_tree() {
            Some(Value::String(s)) if s == self.type_name() => Ok(()),
            _ => Err(DecodeError::TypeMismatch {
                expected: self.type_name().to_string(),
                found: match value.as_tree() {
                    Some(Value::String(s)) => s.clone(),
                    _ => value.to_tree().to_string(),
                },
            }),
        }
    }

    /// Number of elements in a stored list field; zero when absent, null or
    /// not a list. Always `list_items(name).len()`.
    pub fn list_len(&self, name: &str) -> usize {
        self.list_items(name).len()
    }

    /// Elements of a stored list field, null elements included.
    pub fn list_items(&self, name: &str) -> &[FieldValue] {
        match self.get_stored(name) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Append to a list field, initializing it when absent or null.
    ///
    /// A stored tree array, such as a materialized default, is converted to a
    /// list first.
    /// A stored value that is not a list is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownField`] for an undeclared name.
    pub fn list_push(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), DecodeError> {
        self.get_mut(name)?;
        let slot = self.slots.entry(name.to_string()).or_insert(Slot::Null);
        if !matches!(slot, Slot::Present(FieldValue::List(_))) {
            let existing = match std::mem::replace(slot, Slot::Null) {
                Slot::Present(FieldValue::Tree(Value::Array(items))) => {
                    items.into_iter().map(FieldValue::Tree).collect()
                }
                _ => Vec::new(),
            };
            *slot = Slot::Present(FieldValue::List(existing));
        }
        if let Slot::Present(FieldValue::List(items)) = slot {
            items.push(value.into());
        }
        Ok(())
    }

    /// Validate every field and return all violations found.
    pub fn validate(&self) -> Diagnostics {
        let mut out = Vec::new();
        self.validate_into("", &mut out);
        Diagnostics::from_vec(out)
    }

    /// True if [`validate`](Self::validate) finds nothing.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub(crate) fn validate_into(&self, path: &str, out: &mut Vec<Diagnostic>) {
        for (name, spec) in self.schema.fields() {
            let value = self.get(name);
            spec.validate(name, &format!("{path}/{name}"), value.as_deref(), out);
        }
    }

    /// Encode every field in schema order. Required fields with no value are
    /// emitted as `null`; other fields with no value are omitted.
    pub fn to_tree(&self) -> Value {
        let mut map = Map::new();
        for (name, spec) in self.schema.fields() {
            let value = self.get(name);
            match spec.encode(value.as_deref()) {
                Some(encoded) => {
                    map.insert(name.to_string(), encoded);
                }
                None if spec.is_required() => {
                    map.insert(name.to_string(), Value::Null);
                }
                None => {}
            }
        }
        Value::Object(map)
    }

    /// Decode `tree` with exactly `schema`.
    ///
    /// Members present and non-null are decoded by their field; missing or
    /// null members of nullable fields become null; everything else stays
    /// absent. Members the schema does not declare are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `tree` is not a mapping, if `schema` is
    /// abstract, if the tree's `type` member disagrees with `schema`, or if a
    /// nested object cannot be resolved.
    pub fn from_tree(
        schema: Arc<ObjectSchema>,
        tree: &Value,
        registry: &TypeRegistry,
    ) -> Result<Self, DecodeError> {
        let map = tree.as_object().ok_or_else(|| DecodeError::NotAMapping {
            expected: schema.name().to_string(),
        })?;
        if schema.is_abstract() {
            return Err(DecodeError::AbstractType(schema.name().to_string()));
        }

        let mut object = Object::new(Arc::clone(&schema));
        for (name, spec) in schema.fields() {
            match map.get(name) {
                Some(value) if !value.is_null() => {
                    let decoded = spec.decode(value, registry)?;
                    object.set(name, decoded)?;
                }
                _ if spec.is_nullable() => {
                    object.slots.insert(name.to_string(), Slot::Null);
                }
                _ => {}
            }
        }
        Ok(object)
    }

    /// Decode `tree` as `target` or the subtype its `type` member names.
    ///
    /// Without a `type` member, or with a null one, a concrete target decodes
    /// directly and an abstract one fails.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingType`], [`DecodeError::UnknownType`] or
    /// [`DecodeError::NotASubtype`] when the concrete type cannot be
    /// resolved, plus any error from [`Object::from_tree`].
    pub fn decode(
        target: &Arc<ObjectSchema>,
        tree: &Value,
        registry: &TypeRegistry,
    ) -> Result<Self, DecodeError> {
        let map = tree.as_object().ok_or_else(|| DecodeError::NotAMapping {
            expected: target.name().to_string(),
        })?;

        let schema = match map.get(TYPE_MEMBER).filter(|t| !t.is_null()) {
            Some(Value::String(name)) => {
                let concrete = registry.resolve(name)?;
                if !concrete.is_a(target.name()) {
                    return Err(DecodeError::NotASubtype {
                        expected: target.name().to_string(),
                        found: name.clone(),
                    });
                }
                Arc::clone(concrete)
            }
            Some(_) => return Err(DecodeError::MissingType),
            None if target.is_abstract() => return Err(DecodeError::MissingType),
            None => Arc::clone(target),
        };

        tracing::trace!(target_type = target.name(), resolved = schema.name(), "decoding object");
        Object::from_tree(schema, tree, registry)
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_tree().serialize(serializer)
    }
}
