//! # Any GeoJSON Object
//!
//! [`GeoJson`] is the closed sum over every concrete kind, returned when the
//! kind is only known from the data.

use geoj_schema::{DecodeError, Diagnostics, Object};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::collection::{FeatureCollection, GeometryCollection};
use crate::feature::Feature;
use crate::geometry::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use crate::kind::Kind;
use crate::object::{GeoObject, ToTree};

/// A decoded object of any concrete kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

/// Applies `$body` to the wrapper held by any variant.
macro_rules! each_variant {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            GeoJson::Point($inner) => $body,
            GeoJson::MultiPoint($inner) => $body,
            GeoJson::LineString($inner) => $body,
            GeoJson::MultiLineString($inner) => $body,
            GeoJson::Polygon($inner) => $body,
            GeoJson::MultiPolygon($inner) => $body,
            GeoJson::GeometryCollection($inner) => $body,
            GeoJson::Feature($inner) => $body,
            GeoJson::FeatureCollection($inner) => $body,
        }
    };
}

impl GeoJson {
    pub fn kind(&self) -> Kind {
        each_variant!(self, inner => kind_of(inner))
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn as_object(&self) -> &Object {
        each_variant!(self, inner => inner.as_object())
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        each_variant!(self, inner => inner.as_object_mut())
    }

    pub fn into_object(self) -> Object {
        each_variant!(self, inner => inner.into_object())
    }

    /// Wrap a generic object in the variant its type names.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownType`] if the object's type is not a
    /// concrete GeoJSON kind.
    pub fn from_object(object: Object) -> Result<Self, DecodeError> {
        Ok(match object.type_name().parse::<Kind>()? {
            Kind::Point => GeoJson::Point(object.try_into()?),
            Kind::MultiPoint => GeoJson::MultiPoint(object.try_into()?),
            Kind::LineString => GeoJson::LineString(object.try_into()?),
            Kind::MultiLineString => GeoJson::MultiLineString(object.try_into()?),
            Kind::Polygon => GeoJson::Polygon(object.try_into()?),
            Kind::MultiPolygon => GeoJson::MultiPolygon(object.try_into()?),
            Kind::GeometryCollection => GeoJson::GeometryCollection(object.try_into()?),
            Kind::Feature => GeoJson::Feature(object.try_into()?),
            Kind::FeatureCollection => GeoJson::FeatureCollection(object.try_into()?),
        })
    }

    /// Every violated constraint of the wrapped object.
    pub fn validate(&self) -> Diagnostics {
        self.as_object().validate()
    }

    pub fn is_valid(&self) -> bool {
        self.as_object().is_valid()
    }
}

fn kind_of<T: GeoObject>(_: &T) -> Kind {
    T::KIND
}

impl ToTree for GeoJson {
    fn to_tree(&self) -> Value {
        self.as_object().to_tree()
    }
}

impl Serialize for GeoJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_object().serialize(serializer)
    }
}

impl From<GeoJson> for Object {
    fn from(value: GeoJson) -> Self {
        value.into_object()
    }
}

macro_rules! from_wrapper {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<$name> for GeoJson {
                fn from(value: $name) -> Self {
                    GeoJson::$name(value)
                }
            }
        )*
    };
}

from_wrapper!(
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
);
