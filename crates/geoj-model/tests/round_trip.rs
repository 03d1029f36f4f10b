//! # Round-Trip and Scenario Tests
//!
//! End-to-end checks through the public API: text in, typed objects,
//! validation, text out.

use geoj_model::{
    dumps, loads, object_from_tree, CodecError, DumpOptions, Feature, FeatureCollection, GeoJson,
    GeoObject, Kind, Point, ToTree,
};
use geoj_schema::DecodeError;
use proptest::prelude::*;
use serde_json::{json, Value};

fn fixtures() -> Vec<Value> {
    vec![
        json!({"type": "Point", "coordinates": [100.0, 0.0]}),
        json!({"type": "MultiPoint", "coordinates": [[100.0, 0.0], [101.0, 1.0]]}),
        json!({"type": "LineString", "coordinates": [[100.0, 0.0], [101.0, 1.0]]}),
        json!({"type": "MultiLineString", "coordinates": [
            [[100.0, 0.0], [101.0, 1.0]],
            [[102.0, 2.0], [103.0, 3.0]]
        ]}),
        json!({"type": "Polygon", "coordinates": [
            [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]],
            [[100.2, 0.2], [100.8, 0.2], [100.8, 0.8], [100.2, 0.8], [100.2, 0.2]]
        ]}),
        json!({"type": "MultiPolygon", "coordinates": [
            [[[102.0, 2.0], [103.0, 2.0], [103.0, 3.0], [102.0, 3.0], [102.0, 2.0]]],
            [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]]
        ]}),
        json!({"type": "GeometryCollection", "geometries": [
            {"type": "Point", "coordinates": [100.0, 0.0]},
            {"type": "LineString", "coordinates": [[101.0, 0.0], [102.0, 1.0]]}
        ]}),
        json!({
            "type": "Feature",
            "id": "f1",
            "geometry": {"type": "Point", "coordinates": [102.0, 0.5]},
            "properties": {"prop0": "value0", "thumbnail": null}
        }),
        json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": null, "properties": {"a": 1}},
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[102.0, 0.0], [103.0, 1.0]]},
                "properties": null
            }
        ]}),
    ]
}

#[test]
fn every_kind_round_trips() {
    let trees = fixtures();
    assert_eq!(trees.len(), Kind::ALL.len());
    for (tree, kind) in trees.iter().zip(Kind::ALL) {
        let obj = object_from_tree(tree).unwrap();
        assert_eq!(obj.kind(), kind);
        assert!(obj.is_valid(), "{kind}: {}", obj.validate());
        assert_eq!(&obj.to_tree(), tree, "{kind}");

        let again = object_from_tree(&obj.to_tree()).unwrap();
        assert_eq!(again.to_tree(), obj.to_tree());
    }
}

#[test]
fn text_round_trip_is_stable() {
    for tree in fixtures() {
        let text = dumps(&object_from_tree(&tree).unwrap(), &DumpOptions::default()).unwrap();
        let reparsed = loads(&text).unwrap();
        assert_eq!(dumps(&reparsed, &DumpOptions::default()).unwrap(), text);
    }
}

#[test]
fn compact_point_text() {
    let obj = loads(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#).unwrap();
    assert_eq!(
        dumps(&obj, &DumpOptions::default()).unwrap(),
        r#"{"type":"Point","coordinates":[0.0,0.0]}"#
    );
}

#[test]
fn point_accessors_through_loads() {
    let GeoJson::Point(point) = loads(r#"{"type":"Point","coordinates":[100.0,0.0]}"#).unwrap() else {
        panic!("expected a Point");
    };
    assert_eq!(point.x(), Some(100.0));
    assert_eq!(point.y(), Some(0.0));
    assert_eq!(point.z(), None);
    assert!(point.is_valid());
}

#[test]
fn short_point_decodes_but_is_invalid() {
    let obj = loads(r#"{"type":"Point","coordinates":[0]}"#).unwrap();
    let diags = obj.validate();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.items()[0].path, "/coordinates");
    assert!(diags.items()[0].message.contains("not a valid set of coordinates"));
}

#[test]
fn unregistered_geometry_type_fails_decode() {
    let text = r#"{
        "type": "Feature",
        "geometry": {"type": "Spaghetti", "coordinates": [0, 0]},
        "properties": {"name": "Snarf"}
    }"#;
    match loads(text) {
        Err(CodecError::Decode(DecodeError::UnknownType(name))) => assert_eq!(name, "Spaghetti"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn misspelled_feature_type_fails_decode() {
    let text = r#"{"type": "Feetchor", "geometry": null, "properties": null}"#;
    assert!(matches!(
        loads(text),
        Err(CodecError::Decode(DecodeError::UnknownType(_)))
    ));
    let tree: Value = serde_json::from_str(text).unwrap();
    assert!(matches!(
        Feature::from_tree(&tree),
        Err(DecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn ten_point_collection() {
    let collection: FeatureCollection = (0..10)
        .map(|i| Feature::with_geometry(Point::at(f64::from(i), f64::from(i))))
        .collect();
    assert!(collection.is_valid(), "{}", collection.validate());
    assert_eq!(collection.len(), 10);
    assert_eq!(collection.iter().count(), collection.len());
    for (i, member) in collection.iter().enumerate() {
        assert_eq!(member, collection.get(i));
        assert_eq!(member.unwrap(), &collection[i]);
    }

    let text = dumps(&collection, &DumpOptions::pretty_printed()).unwrap();
    let GeoJson::FeatureCollection(decoded) = loads(&text).unwrap() else {
        panic!("expected a FeatureCollection");
    };
    assert_eq!(decoded.len(), 10);
    assert_eq!(decoded.to_tree(), collection.to_tree());
}

#[test]
fn diagnostics_collect_every_violation() {
    let text = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200, 100]}, "properties": null},
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 1], [0, 1]]]}, "properties": 5}
        ]
    }"#;
    let obj = loads(text).unwrap();
    let paths: Vec<String> = obj.validate().into_iter().map(|d| d.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            "/features/0/geometry/coordinates",
            "/features/0/geometry/coordinates",
            "/features/1/geometry/coordinates/0",
            "/features/1/geometry/coordinates/0",
            "/features/1/properties",
        ]
    );
}

fn ordinate(bound: f64) -> impl Strategy<Value = f64> {
    (-bound..=bound).prop_map(|v| (v * 1e6).round() / 1e6)
}

fn position() -> impl Strategy<Value = Vec<f64>> {
    (ordinate(180.0), ordinate(90.0)).prop_map(|(x, y)| vec![x, y])
}

proptest! {
    /// Any in-range line string is valid and survives a text round trip.
    #[test]
    fn line_strings_round_trip(positions in prop::collection::vec(position(), 2..16)) {
        let tree = json!({"type": "LineString", "coordinates": positions});
        let obj = object_from_tree(&tree).unwrap();
        prop_assert!(obj.is_valid());
        let text = dumps(&obj, &DumpOptions::default()).unwrap();
        prop_assert_eq!(loads(&text).unwrap().to_tree(), tree);
    }

    /// Validation never depends on how many times it ran.
    #[test]
    fn validation_is_idempotent(x in -400.0f64..400.0, y in -200.0f64..200.0) {
        let point = Point::at(x, y);
        prop_assert_eq!(point.validate(), point.validate());
        let in_bounds = (-180.0..=180.0).contains(&x) && (-90.0..=90.0).contains(&y);
        prop_assert_eq!(point.is_valid(), in_bounds);
    }
}
