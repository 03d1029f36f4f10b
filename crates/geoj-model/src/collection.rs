//! # Collections
//!
//! [`FeatureCollection`] holds features, [`GeometryCollection`] holds
//! geometries of any kind (including other geometry collections). Both
//! expose their members as a sequence: length, indexing and iteration.

use std::ops::Index;

use geoj_schema::{FieldValue, Object};

use crate::feature::Feature;
use crate::object::{geo_object, push, GeoObject, GeometryObject};
use crate::registry::{FEATURES, GEOMETRIES};

geo_object!(
    /// A list of features.
    FeatureCollection
);
geo_object!(
    /// A list of geometries. It has no `coordinates` member.
    GeometryCollection
);

impl GeometryObject for GeometryCollection {}

/// Iterator over every member slot of a collection, in order. A member
/// that is not a decoded object (a `null` element, say) yields `None`.
pub type Members<'a> = std::iter::Map<std::slice::Iter<'a, FieldValue>, fn(&'a FieldValue) -> Option<&'a Object>>;

macro_rules! collection {
    ($name:ident, $field:expr) => {
        impl $name {
            /// Number of members, `null` elements included. Zero when the
            /// list is unset or null.
            pub fn len(&self) -> usize {
                self.as_object().list_len($field)
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// The member at `index`, or `None` if out of range or not a
            /// decoded object.
            pub fn get(&self, index: usize) -> Option<&Object> {
                self.as_object().list_items($field).get(index)?.as_object()
            }

            /// Every member slot, in order: `iter().nth(i) == Some(get(i))`
            /// for each `i < len()`.
            pub fn iter(&self) -> Members<'_> {
                self.as_object()
                    .list_items($field)
                    .iter()
                    .map(FieldValue::as_object as fn(&FieldValue) -> Option<&Object>)
            }
        }

        impl Index<usize> for $name {
            type Output = Object;

            /// # Panics
            ///
            /// Panics if `index` is out of range or the member is not a decoded object.
            fn index(&self, index: usize) -> &Object {
                match self.get(index) {
                    Some(member) => member,
                    None if index < self.len() => panic!(
                        "{} member {index} is not an object",
                        stringify!($name)
                    ),
                    None => panic!(
                        "{} index {index} out of range (len {})",
                        stringify!($name),
                        self.len()
                    ),
                }
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = Option<&'a Object>;
            type IntoIter = Members<'a>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

collection!(FeatureCollection, FEATURES);
collection!(GeometryCollection, GEOMETRIES);

impl FeatureCollection {
    /// Append a feature, creating the list if it is unset.
    pub fn push(&mut self, feature: Feature) {
        push(self.as_object_mut(), FEATURES, feature);
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut collection = Self::new();
        for feature in iter {
            collection.push(feature);
        }
        collection
    }
}

impl GeometryCollection {
    /// Append a geometry of any kind, creating the list if it is unset.
    pub fn push(&mut self, geometry: impl GeometryObject) {
        push(self.as_object_mut(), GEOMETRIES, geometry.into_object());
    }
}
