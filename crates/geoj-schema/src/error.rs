//! # Error Types
//!
//! Structural failures raised while turning a generic JSON tree into typed
//! objects, or while assigning field values programmatically.
//!
//! Data-shape problems that do not prevent decoding (bad coordinates, short
//! lists, unclosed rings) are never errors; they surface as
//! [`Diagnostic`](crate::Diagnostic)s from validation instead.

use thiserror::Error;

/// A decode could not resolve the structure of its input.
///
/// Decode errors abort the whole decode call. No partially decoded object is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The fragment has no usable `type` member and its target is abstract.
    #[error("missing or invalid GeoJSON object member: `type`")]
    MissingType,

    /// The `type` member names a type that is not registered.
    #[error("missing or invalid GeoJSON object member: `type` ({0:?} is not a known type)")]
    UnknownType(String),

    /// The `type` member names an abstract type, which has no instances.
    #[error("invalid GeoJSON object member: `type` ({0:?} is abstract)")]
    AbstractType(String),

    /// A discriminant field was assigned a value other than its fixed name.
    #[error("value {found:?} is not expected value {expected:?}")]
    TypeMismatch {
        /// The fixed type name of the object.
        expected: String,
        /// The value that was supplied.
        found: String,
    },

    /// The resolved type cannot stand in for the declared field type.
    #[error("type {found:?} is not a {expected}")]
    NotASubtype {
        /// Type the field was declared with.
        expected: String,
        /// Type named by the fragment's discriminant.
        found: String,
    },

    /// A nested object fragment is not a JSON object.
    #[error("expected a JSON object for {expected}")]
    NotAMapping {
        /// Type the fragment was supposed to decode into.
        expected: String,
    },

    /// A field name that the schema does not declare.
    #[error("{schema} has no field named {field:?}")]
    UnknownField {
        /// Schema the lookup was made against.
        schema: String,
        /// The unknown field name.
        field: String,
    },
}
