//! # Object Kinds
//!
//! The closed set of concrete GeoJSON object types. Each kind's name is its
//! discriminant: the value of the `type` member in the encoded tree.

use std::fmt;
use std::str::FromStr;

use geoj_schema::DecodeError;
use serde::{Deserialize, Serialize};

/// A concrete GeoJSON object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 9] = [
        Kind::Point,
        Kind::MultiPoint,
        Kind::LineString,
        Kind::MultiLineString,
        Kind::Polygon,
        Kind::MultiPolygon,
        Kind::GeometryCollection,
        Kind::Feature,
        Kind::FeatureCollection,
    ];

    /// The discriminant string.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Point => "Point",
            Kind::MultiPoint => "MultiPoint",
            Kind::LineString => "LineString",
            Kind::MultiLineString => "MultiLineString",
            Kind::Polygon => "Polygon",
            Kind::MultiPolygon => "MultiPolygon",
            Kind::GeometryCollection => "GeometryCollection",
            Kind::Feature => "Feature",
            Kind::FeatureCollection => "FeatureCollection",
        }
    }

    /// Parse a discriminant string. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// True for kinds that may appear where a geometry is expected.
    pub fn is_geometry(self) -> bool {
        !matches!(self, Kind::Feature | Kind::FeatureCollection)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_name(s).ok_or_else(|| DecodeError::UnknownType(s.to_string()))
    }
}
