//! # Codec Boundary
//!
//! Conversion between JSON text, generic trees and typed objects. Parsing
//! and rendering are delegated to `serde_json`; this module adds the
//! discriminant dispatch on the way in and the rendering options on the way
//! out.
//!
//! Decoding never validates. Call `validate` on the result.

use std::io::{Read, Write};

use geoj_schema::{DecodeError, Object};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

use crate::geojson::GeoJson;
use crate::kind::Kind;
use crate::object::ToTree;
use crate::options::DumpOptions;
use crate::registry::{registry, schema, GEOJSON, TYPE};

/// Errors from turning text into typed objects.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text is not well-formed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The JSON does not describe a resolvable GeoJSON object.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decode a tree into the concrete kind its `type` member names.
///
/// # Errors
///
/// Returns [`DecodeError::NotAMapping`] for a non-object tree,
/// [`DecodeError::MissingType`] when `type` is missing or not a string, and
/// [`DecodeError::UnknownType`] when it names no concrete kind (abstract
/// names included).
pub fn object_from_tree(tree: &Value) -> Result<GeoJson, DecodeError> {
    let map = tree.as_object().ok_or_else(|| DecodeError::NotAMapping {
        expected: GEOJSON.to_string(),
    })?;
    let kind = match map.get(TYPE) {
        Some(Value::String(name)) => name.parse::<Kind>()?,
        _ => return Err(DecodeError::MissingType),
    };
    tracing::trace!(%kind, "decoding top-level object");
    let object = Object::from_tree(schema(kind), tree, registry())?;
    GeoJson::from_object(object)
}

/// Parse JSON text and decode it.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text and
/// [`CodecError::Decode`] for well-formed JSON that is not a resolvable
/// GeoJSON object.
pub fn loads(text: &str) -> Result<GeoJson, CodecError> {
    let tree: Value = serde_json::from_str(text)?;
    Ok(object_from_tree(&tree)?)
}

/// Like [`loads`], from bytes.
///
/// # Errors
///
/// See [`loads`].
pub fn loads_slice(bytes: &[u8]) -> Result<GeoJson, CodecError> {
    let tree: Value = serde_json::from_slice(bytes)?;
    Ok(object_from_tree(&tree)?)
}

/// Like [`loads`], from a reader.
///
/// # Errors
///
/// See [`loads`]. I/O failures surface as [`CodecError::Json`].
pub fn from_reader<R: Read>(reader: R) -> Result<GeoJson, CodecError> {
    let tree: Value = serde_json::from_reader(reader)?;
    Ok(object_from_tree(&tree)?)
}

/// Encode and render to a string.
///
/// # Errors
///
/// Only fails if `serde_json` fails to render the tree.
pub fn dumps<T: ToTree + ?Sized>(value: &T, options: &DumpOptions) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    to_writer(&mut buf, value, options)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Encode and render to a writer.
///
/// # Errors
///
/// Returns the writer's I/O errors, wrapped by `serde_json`.
pub fn to_writer<W: Write, T: ToTree + ?Sized>(
    writer: W,
    value: &T,
    options: &DumpOptions,
) -> Result<(), serde_json::Error> {
    let tree = value.to_tree();
    if options.pretty {
        let indent = " ".repeat(options.indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        tree.serialize(&mut serializer)
    } else {
        serde_json::to_writer(writer, &tree)
    }
}
