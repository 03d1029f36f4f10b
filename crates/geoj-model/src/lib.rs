//! # geoj-model — GeoJSON Object Model
//!
//! The GeoJSON types declared on top of `geoj-schema`, their typed
//! wrappers, and the codec between JSON text and typed objects.
//!
//! ## Layout
//!
//! - [`registry`] declares every schema once and owns the process-wide
//!   [`TypeRegistry`](geoj_schema::TypeRegistry).
//! - [`Kind`] is the closed set of concrete types; [`GeoJson`] is the sum
//!   over their wrappers.
//! - [`geometry`], [`feature`] and [`collection`] hold the wrappers.
//! - [`codec`] parses and renders text: [`loads`], [`dumps`].
//!
//! ## Example
//!
//! ```
//! use geoj_model::{dumps, loads, DumpOptions};
//!
//! let obj = loads(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#).unwrap();
//! assert!(obj.is_valid());
//! let text = dumps(&obj, &DumpOptions::default()).unwrap();
//! assert_eq!(text, r#"{"type":"Point","coordinates":[0.0,0.0]}"#);
//! ```
//!
//! ## Crate Policy
//!
//! - Decoding never validates; validation never fails.
//! - No `.unwrap()` outside tests.

pub mod codec;
pub mod collection;
pub mod feature;
pub mod geojson;
pub mod geometry;
pub mod kind;
pub mod object;
pub mod options;
pub mod registry;

pub use codec::{dumps, from_reader, loads, loads_slice, object_from_tree, to_writer, CodecError};
pub use collection::{FeatureCollection, GeometryCollection};
pub use feature::Feature;
pub use geojson::GeoJson;
pub use geometry::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
pub use kind::Kind;
pub use object::{GeoObject, GeometryObject, HasCoordinates, ToTree};
pub use options::DumpOptions;
pub use registry::{registry, schema};
