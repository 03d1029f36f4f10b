//! # GeoJSON Type Declarations
//!
//! Declares every GeoJSON schema once, on first use, and registers it in
//! the process-wide [`TypeRegistry`]. The registry is read-only afterwards.
//!
//! ## Hierarchy
//!
//! ```text
//! GeoJSON (abstract)            type, crs, bbox
//! ├── Geometry (abstract)       + coordinates: position
//! │   ├── Point
//! │   ├── MultiPoint            coordinates: [position]
//! │   ├── LineString            coordinates: [position; 2+]
//! │   ├── MultiLineString       coordinates: [[position; 2+]; 1+]
//! │   ├── Polygon               coordinates: [linear ring; 1+]
//! │   ├── MultiPolygon          coordinates: [polygon; 1+]
//! │   └── GeometryCollection    - coordinates, + geometries: [Geometry]
//! ├── Feature                   + id, geometry: Geometry?, properties: {}?
//! └── FeatureCollection         + features: [Feature]
//! ```

use std::sync::Arc;

use geoj_schema::{FieldSpec, ObjectSchema, SchemaBuilder, TypeRegistry};
use once_cell::sync::Lazy;

use crate::kind::Kind;

/// Name of the abstract root type.
pub const GEOJSON: &str = "GeoJSON";
/// Name of the abstract geometry type.
pub const GEOMETRY: &str = "Geometry";

pub(crate) const TYPE: &str = "type";
pub(crate) const CRS: &str = "crs";
pub(crate) const BBOX: &str = "bbox";
pub(crate) const COORDINATES: &str = "coordinates";
pub(crate) const GEOMETRIES: &str = "geometries";
pub(crate) const ID: &str = "id";
pub(crate) const GEOMETRY_FIELD: &str = "geometry";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const FEATURES: &str = "features";

struct Declared {
    registry: TypeRegistry,
    /// Concrete schemas indexed by `Kind::index`.
    kinds: Vec<Arc<ObjectSchema>>,
}

static DECLARED: Lazy<Declared> = Lazy::new(declare);

fn declare() -> Declared {
    let mut registry = TypeRegistry::new();

    let geojson = registry.register(
        SchemaBuilder::new(GEOJSON)
            .abstract_type()
            .field(TYPE, FieldSpec::discriminant())
            .field(CRS, FieldSpec::opaque().optional().nullable())
            .field(BBOX, FieldSpec::opaque().optional().nullable())
            .build(),
    );
    let geometry = registry.register(
        SchemaBuilder::new(GEOMETRY)
            .extends(&geojson)
            .abstract_type()
            .field(COORDINATES, FieldSpec::position())
            .build(),
    );

    let point = registry.register(SchemaBuilder::new(Kind::Point.name()).extends(&geometry).build());
    let multi_point = registry.register(
        SchemaBuilder::new(Kind::MultiPoint.name())
            .extends(&geometry)
            .field(COORDINATES, FieldSpec::list(FieldSpec::position()))
            .build(),
    );
    let line_string = registry.register(
        SchemaBuilder::new(Kind::LineString.name())
            .extends(&geometry)
            .field(COORDINATES, FieldSpec::list(FieldSpec::position()).min_length(2))
            .build(),
    );
    let multi_line_string = registry.register(
        SchemaBuilder::new(Kind::MultiLineString.name())
            .extends(&geometry)
            .field(
                COORDINATES,
                FieldSpec::list(FieldSpec::list(FieldSpec::position()).min_length(2)).min_length(1),
            )
            .build(),
    );
    let polygon = registry.register(
        SchemaBuilder::new(Kind::Polygon.name())
            .extends(&geometry)
            .field(COORDINATES, FieldSpec::polygon())
            .build(),
    );
    let multi_polygon = registry.register(
        SchemaBuilder::new(Kind::MultiPolygon.name())
            .extends(&geometry)
            .field(COORDINATES, FieldSpec::list(FieldSpec::polygon()).min_length(1))
            .build(),
    );
    let geometry_collection = registry.register(
        SchemaBuilder::new(Kind::GeometryCollection.name())
            .extends(&geometry)
            .exclude(COORDINATES)
            .field(GEOMETRIES, FieldSpec::list(FieldSpec::object(GEOMETRY)))
            .build(),
    );
    let feature = registry.register(
        SchemaBuilder::new(Kind::Feature.name())
            .extends(&geojson)
            .field(ID, FieldSpec::opaque().optional().nullable())
            .field(GEOMETRY_FIELD, FieldSpec::object(GEOMETRY).nullable())
            .field(PROPERTIES, FieldSpec::mapping().nullable())
            .build(),
    );
    let feature_collection = registry.register(
        SchemaBuilder::new(Kind::FeatureCollection.name())
            .extends(&geojson)
            .field(FEATURES, FieldSpec::list(FieldSpec::object(Kind::Feature.name())))
            .build(),
    );

    Declared {
        registry,
        kinds: vec![
            point,
            multi_point,
            line_string,
            multi_line_string,
            polygon,
            multi_polygon,
            geometry_collection,
            feature,
            feature_collection,
        ],
    }
}

/// The process-wide GeoJSON type registry.
pub fn registry() -> &'static TypeRegistry {
    &DECLARED.registry
}

/// The schema of a concrete kind.
pub fn schema(kind: Kind) -> Arc<ObjectSchema> {
    Arc::clone(&DECLARED.kinds[kind.index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_registered_under_its_name() {
        for kind in Kind::ALL {
            let schema = schema(kind);
            assert_eq!(schema.name(), kind.name());
            assert!(!schema.is_abstract());
            assert!(Arc::ptr_eq(registry().get(kind.name()).unwrap(), &schema));
        }
        assert_eq!(registry().len(), Kind::ALL.len() + 2);
    }

    #[test]
    fn abstract_bases_are_registered() {
        assert!(registry().get(GEOJSON).unwrap().is_abstract());
        assert!(registry().get(GEOMETRY).unwrap().is_abstract());
        let concrete: Vec<&str> = registry().concrete_names().collect();
        assert_eq!(concrete.len(), Kind::ALL.len());
        assert!(!concrete.contains(&GEOMETRY));
    }

    #[test]
    fn field_order_follows_declaration() {
        assert_eq!(schema(Kind::Point).field_names(), vec!["type", "crs", "bbox", "coordinates"]);
        assert_eq!(
            schema(Kind::Feature).field_names(),
            vec!["type", "crs", "bbox", "id", "geometry", "properties"]
        );
        assert_eq!(
            schema(Kind::GeometryCollection).field_names(),
            vec!["type", "crs", "bbox", "geometries"]
        );
        assert_eq!(
            schema(Kind::FeatureCollection).field_names(),
            vec!["type", "crs", "bbox", "features"]
        );
    }

    #[test]
    fn geometry_kinds_descend_from_geometry() {
        for kind in Kind::ALL {
            assert_eq!(schema(kind).is_a(GEOMETRY), kind.is_geometry(), "{kind}");
            assert!(schema(kind).is_a(GEOJSON));
        }
    }
}
