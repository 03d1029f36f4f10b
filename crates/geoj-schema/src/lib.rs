//! # geoj-schema — Declarative Field & Schema Engine
//!
//! The format-agnostic core of geoj. Types are declared as ordered sets of
//! field descriptors; instances are validated, decoded and encoded field by
//! field against their schema.
//!
//! ## Building Blocks
//!
//! - [`FieldSpec`]: one declared field: kind, default, required, nullable.
//!   Kinds cover opaque values, mappings, positions, lists (with length
//!   bounds and ring closure), nested objects and the `type` discriminant.
//! - [`SchemaBuilder`] / [`ObjectSchema`]: inheritance-aware schema
//!   declaration with explicit field exclusion.
//! - [`TypeRegistry`]: discriminant-to-schema table used for polymorphic
//!   decoding.
//! - [`Object`]: a schema instance with three-state slots
//!   (absent / null / present).
//!
//! ## Crate Policy
//!
//! - Validation is total: it returns [`Diagnostics`] and never fails.
//! - Decoding fails only on unresolvable structure ([`DecodeError`]).
//! - No `.unwrap()` outside tests.

pub mod diagnostic;
pub mod error;
pub mod field;
pub mod object;
pub mod registry;
pub mod schema;

pub use diagnostic::{Diagnostic, Diagnostics};
pub use error::DecodeError;
pub use field::{position_ordinates, DefaultFn, FieldKind, FieldSpec, FieldValue, ListSpec};
pub use object::Object;
pub use registry::TypeRegistry;
pub use schema::{ObjectSchema, SchemaBuilder};
