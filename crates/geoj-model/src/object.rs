//! # Typed Object Wrappers
//!
//! Every concrete kind is a thin typed wrapper around a schema-driven
//! [`Object`]. The [`GeoObject`] trait gives them a common surface:
//! decoding, validation, encoding and the `crs`/`bbox` members every
//! GeoJSON object carries.

use geoj_schema::{DecodeError, Diagnostics, FieldValue, Object};
use serde_json::Value;

use crate::kind::Kind;
use crate::registry::{registry, schema, BBOX, COORDINATES, CRS};

/// Anything that encodes to a generic JSON tree.
pub trait ToTree {
    fn to_tree(&self) -> Value;
}

impl ToTree for Object {
    fn to_tree(&self) -> Value {
        Object::to_tree(self)
    }
}

/// Common behaviour of the typed GeoJSON objects.
pub trait GeoObject: ToTree + Sized + TryFrom<Object, Error = DecodeError> + Into<Object> {
    /// The kind this wrapper always holds.
    const KIND: Kind;

    fn as_object(&self) -> &Object;

    fn as_object_mut(&mut self) -> &mut Object;

    fn into_object(self) -> Object {
        self.into()
    }

    /// Decode a tree whose `type` member, if present, names this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the tree is not a mapping, names another
    /// type, or holds a nested object whose type cannot be resolved.
    fn from_tree(tree: &Value) -> Result<Self, DecodeError> {
        Object::from_tree(schema(Self::KIND), tree, registry())?.try_into()
    }

    fn type_name(&self) -> &'static str {
        Self::KIND.name()
    }

    /// Every violated constraint, in schema order.
    fn validate(&self) -> Diagnostics {
        self.as_object().validate()
    }

    fn is_valid(&self) -> bool {
        self.as_object().is_valid()
    }

    /// The opaque bounding box, if set.
    fn bbox(&self) -> Option<&Value> {
        self.as_object().get_stored(BBOX).and_then(FieldValue::as_tree)
    }

    /// Set or clear the bounding box. It is passed through uninterpreted.
    fn set_bbox(&mut self, bbox: Option<Value>) {
        put(self.as_object_mut(), BBOX, bbox.unwrap_or(Value::Null));
    }

    /// The opaque coordinate reference system member, if set.
    fn crs(&self) -> Option<&Value> {
        self.as_object().get_stored(CRS).and_then(FieldValue::as_tree)
    }

    /// Set or clear the coordinate reference system member.
    fn set_crs(&mut self, crs: Option<Value>) {
        put(self.as_object_mut(), CRS, crs.unwrap_or(Value::Null));
    }
}

/// Kinds that may stand where a geometry is expected.
pub trait GeometryObject: GeoObject {}

/// Geometries with a `coordinates` member.
pub trait HasCoordinates: GeometryObject {
    /// The encoded coordinates, or `None` when unset or null.
    fn coordinates(&self) -> Option<Value> {
        self.as_object().get(COORDINATES).map(|c| c.to_tree())
    }

    fn set_coordinates(&mut self, coordinates: impl Into<Value>) {
        put(self.as_object_mut(), COORDINATES, coordinates.into());
    }
}

/// Assign a field the wrapper's schema declares.
///
/// `Object::set` only fails for undeclared names and for the discriminant;
/// callers pass declared, non-discriminant field names only.
pub(crate) fn put(object: &mut Object, field: &str, value: impl Into<FieldValue>) {
    let _ = object.set(field, value);
}

/// Append to a list field the wrapper's schema declares. Fails under the
/// same conditions as [`put`].
pub(crate) fn push(object: &mut Object, field: &str, value: impl Into<FieldValue>) {
    let _ = object.list_push(field, value);
}

/// Declares the typed wrapper for one kind.
macro_rules! geo_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            object: geoj_schema::Object,
        }

        impl $name {
            /// An instance with every field unset.
            pub fn new() -> Self {
                Self {
                    object: geoj_schema::Object::new($crate::registry::schema($crate::Kind::$name)),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::object::ToTree for $name {
            fn to_tree(&self) -> serde_json::Value {
                self.object.to_tree()
            }
        }

        impl $crate::object::GeoObject for $name {
            const KIND: $crate::Kind = $crate::Kind::$name;

            fn as_object(&self) -> &geoj_schema::Object {
                &self.object
            }

            fn as_object_mut(&mut self) -> &mut geoj_schema::Object {
                &mut self.object
            }
        }

        impl TryFrom<geoj_schema::Object> for $name {
            type Error = geoj_schema::DecodeError;

            fn try_from(object: geoj_schema::Object) -> Result<Self, Self::Error> {
                if object.type_name() == $crate::Kind::$name.name() {
                    Ok(Self { object })
                } else {
                    Err(geoj_schema::DecodeError::TypeMismatch {
                        expected: $crate::Kind::$name.name().to_string(),
                        found: object.type_name().to_string(),
                    })
                }
            }
        }

        impl From<$name> for geoj_schema::Object {
            fn from(value: $name) -> Self {
                value.object
            }
        }

        impl From<$name> for geoj_schema::FieldValue {
            fn from(value: $name) -> Self {
                geoj_schema::FieldValue::from(value.object)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.object, serializer)
            }
        }
    };
}

pub(crate) use geo_object;
