//! # Geometries
//!
//! The six coordinate-bearing geometry kinds. They differ only in the shape
//! of their `coordinates` member, which their schemas declare:
//!
//! | Kind | `coordinates` |
//! |---|---|
//! | Point | a position |
//! | MultiPoint | list of positions |
//! | LineString | list of 2+ positions |
//! | MultiLineString | list (1+) of lists of 2+ positions |
//! | Polygon | list (1+) of linear rings |
//! | MultiPolygon | list (1+) of polygons |
//!
//! Coordinates are stored as decoded and only checked by validation.

use serde_json::Value;

use crate::object::{geo_object, GeoObject, GeometryObject, HasCoordinates};
use crate::registry::COORDINATES;

geo_object!(
    /// A single position.
    Point
);
geo_object!(
    /// A series of positions.
    MultiPoint
);
geo_object!(
    /// A line through two or more positions.
    LineString
);
geo_object!(
    /// A list of line strings.
    MultiLineString
);
geo_object!(
    /// An exterior linear ring followed by any holes.
    Polygon
);
geo_object!(
    /// A list of polygons.
    MultiPolygon
);

macro_rules! coordinate_geometry {
    ($($name:ident),* $(,)?) => {
        $(
            impl GeometryObject for $name {}
            impl HasCoordinates for $name {}

            impl $name {
                /// A geometry with the given coordinates.
                pub fn with_coordinates(coordinates: impl Into<Value>) -> Self {
                    let mut geometry = Self::new();
                    geometry.set_coordinates(coordinates);
                    geometry
                }
            }
        )*
    };
}

coordinate_geometry!(Point, MultiPoint, LineString, MultiLineString, Polygon, MultiPolygon);

impl Point {
    /// A point at `x`, `y`.
    pub fn at(x: f64, y: f64) -> Self {
        Self::with_coordinates(vec![x, y])
    }

    fn ordinate(&self, index: usize) -> Option<f64> {
        let coordinates = self.as_object().get(COORDINATES)?;
        let ordinates = coordinates.elements()?;
        ordinates.get(index)?.as_tree()?.as_f64()
    }

    /// First ordinate (longitude or easting).
    pub fn x(&self) -> Option<f64> {
        self.ordinate(0)
    }

    /// Second ordinate (latitude or northing).
    pub fn y(&self) -> Option<f64> {
        self.ordinate(1)
    }

    /// Third ordinate (altitude), absent for two-dimensional points.
    pub fn z(&self) -> Option<f64> {
        self.ordinate(2)
    }
}
