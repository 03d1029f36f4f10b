//! # Feature
//!
//! A geometry (or null) plus free-form properties and an optional
//! identifier. The geometry member is polymorphic: decoding picks the
//! concrete geometry kind from its `type` member.

use geoj_schema::{FieldValue, Object};
use serde_json::{Map, Value};

use crate::object::{geo_object, put, GeoObject, GeometryObject};
use crate::registry::{GEOMETRY_FIELD, ID, PROPERTIES};

geo_object!(
    /// A spatially bounded thing: geometry, properties and optional id.
    Feature
);

impl Feature {
    /// A feature with the given geometry and no properties.
    pub fn with_geometry<G: GeometryObject>(geometry: G) -> Self {
        let mut feature = Self::new();
        feature.set_geometry(Some(geometry));
        feature
    }

    /// The identifier, if set and not null.
    pub fn id(&self) -> Option<&Value> {
        self.as_object().get_stored(ID).and_then(FieldValue::as_tree)
    }

    /// Set the identifier. `Value::Null` clears it.
    pub fn set_id(&mut self, id: impl Into<Value>) {
        put(self.as_object_mut(), ID, id.into());
    }

    /// The geometry, if set and not null.
    pub fn geometry(&self) -> Option<&Object> {
        self.as_object()
            .get_stored(GEOMETRY_FIELD)
            .and_then(FieldValue::as_object)
    }

    pub fn geometry_mut(&mut self) -> Option<&mut Object> {
        match self.as_object_mut().get_mut(GEOMETRY_FIELD) {
            Ok(Some(value)) => value.as_object_mut(),
            _ => None,
        }
    }

    /// Set the geometry, or make it null.
    pub fn set_geometry<G: GeometryObject>(&mut self, geometry: Option<G>) {
        let value = match geometry {
            Some(g) => FieldValue::from(g.into_object()),
            None => FieldValue::Tree(Value::Null),
        };
        put(self.as_object_mut(), GEOMETRY_FIELD, value);
    }

    /// The properties mapping, if set and not null.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.as_object()
            .get_stored(PROPERTIES)
            .and_then(FieldValue::as_tree)
            .and_then(Value::as_object)
    }

    /// One property value. An explicit JSON null is returned as `Some(&Value::Null)`.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties()?.get(key)
    }

    /// Replace the properties, or make them null.
    pub fn set_properties(&mut self, properties: Option<Map<String, Value>>) {
        let value = properties.map(Value::Object).unwrap_or(Value::Null);
        put(self.as_object_mut(), PROPERTIES, value);
    }

    /// Insert one property, creating the mapping if it is unset, null or not a mapping.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if self.properties().is_none() {
            self.set_properties(Some(Map::new()));
        }
        if let Ok(Some(FieldValue::Tree(Value::Object(map)))) = self.as_object_mut().get_mut(PROPERTIES) {
            map.insert(key.into(), value.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Polygon};
    use crate::object::ToTree;
    use geoj_schema::DecodeError;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-180.0, 10.0], [20.0, 90.0], [180.0, -5.0], [-30.0, -90.0], [-180.0, 10.0]
                ]]
            },
            "properties": {
                "name": "Beezlebum",
                "occupation": "Lucador",
                "favorite_color": "chartreuse"
            }
        })
    }

    #[test]
    fn decode_feature_with_polygon() {
        let data = sample();
        let feature = Feature::from_tree(&data).unwrap();
        assert!(feature.is_valid(), "{}", feature.validate());
        assert_eq!(feature.type_name(), "Feature");
        let geometry = feature.geometry().unwrap();
        assert_eq!(geometry.type_name(), "Polygon");
        assert_eq!(geometry.get("coordinates").unwrap().to_tree(), data["geometry"]["coordinates"]);
        assert_eq!(feature.property("name"), Some(&json!("Beezlebum")));
        assert_eq!(feature.property("occupation"), Some(&json!("Lucador")));
        assert_eq!(feature.to_tree(), data);
    }

    #[test]
    fn null_geometry_and_properties_are_valid() {
        let mut feature = Feature::from_tree(&sample()).unwrap();
        feature.set_geometry::<Point>(None);
        assert!(feature.is_valid());
        feature.set_properties(None);
        assert!(feature.is_valid());
        assert_eq!(
            feature.to_tree(),
            json!({"type": "Feature", "geometry": null, "properties": null})
        );
    }

    #[test]
    fn id_round_trips() {
        let mut data = sample();
        data["id"] = json!(1234);
        let feature = Feature::from_tree(&data).unwrap();
        assert!(feature.is_valid());
        assert_eq!(feature.id(), Some(&json!(1234)));
        assert_eq!(feature.to_tree(), data);
    }

    #[test]
    fn unknown_geometry_type_is_decode_error() {
        let data = json!({
            "type": "Feature",
            "geometry": {"type": "Spaghetti", "coordinates": [0, 0]},
            "properties": {"name": "Snarf"}
        });
        assert_eq!(
            Feature::from_tree(&data).unwrap_err(),
            DecodeError::UnknownType("Spaghetti".into())
        );
    }

    #[test]
    fn mismatched_feature_type_is_decode_error() {
        let data = json!({
            "type": "Feetchor",
            "geometry": {"type": "Point", "coordinates": [0, 0]},
            "properties": {"name": "Snarf"}
        });
        assert!(matches!(
            Feature::from_tree(&data).unwrap_err(),
            DecodeError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn geometry_must_be_a_geometry() {
        let data = json!({
            "type": "Feature",
            "geometry": {"type": "Feature", "geometry": null, "properties": null},
            "properties": null
        });
        assert!(matches!(
            Feature::from_tree(&data).unwrap_err(),
            DecodeError::NotASubtype { .. }
        ));
    }

    #[test]
    fn missing_geometry_and_properties_decode_as_null() {
        let feature = Feature::from_tree(&json!({"type": "Feature"})).unwrap();
        assert!(feature.is_valid());
        assert!(feature.geometry().is_none());
        assert_eq!(
            feature.to_tree(),
            json!({"type": "Feature", "geometry": null, "properties": null})
        );
    }

    #[test]
    fn explicit_null_property_is_kept() {
        let data = json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-121.487, 38.5773]},
            "properties": {"thumbnail": null, "expires": 0}
        });
        let feature = Feature::from_tree(&data).unwrap();
        assert!(feature.is_valid());
        assert_eq!(feature.property("thumbnail"), Some(&Value::Null));
        assert_eq!(feature.to_tree()["properties"]["thumbnail"], Value::Null);
        assert!(feature.to_tree()["properties"].as_object().unwrap().contains_key("thumbnail"));
    }

    #[test]
    fn non_mapping_properties_are_a_diagnostic() {
        let mut feature = Feature::with_geometry(Point::at(0.0, 0.0));
        feature.as_object_mut().set("properties", json!([1, 2])).unwrap();
        let diags = feature.validate();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.items()[0].path, "/properties");
    }

    #[test]
    fn set_property_creates_mapping() {
        let mut feature = Feature::with_geometry(Polygon::new());
        feature.set_property("name", "x");
        feature.set_property("n", 3);
        assert_eq!(feature.properties().unwrap().len(), 2);
        assert!(!feature.is_valid(), "empty polygon geometry must be invalid");
        assert_eq!(feature.validate().items()[0].path, "/geometry/coordinates");
    }

    #[test]
    fn geometry_mut_edits_in_place() {
        let mut feature = Feature::with_geometry(Point::at(0.0, 0.0));
        feature
            .geometry_mut()
            .unwrap()
            .set("coordinates", json!([0.0, 100.0]))
            .unwrap();
        assert!(!feature.is_valid());
        feature.set_id(Value::Null);
        assert!(feature.id().is_none());
    }
}
