//! # Field Descriptors
//!
//! A [`FieldSpec`] is the declarative unit attached to one attribute of an
//! object schema. It knows how to validate a value, how to decode it from a
//! generic JSON tree and how to encode it back.
//!
//! Field kinds compose: a linear ring is a list of positions with a closure
//! check, a polygon is a list of linear rings, a multi-polygon is a list of
//! polygons.
//!
//! ## Contract
//!
//! - `validate` appends diagnostics and never fails. An absent or null value
//!   on a required, non-nullable field is reported once and no further checks
//!   run for it.
//! - `decode` only fails when structure cannot be resolved (a nested object
//!   with no usable discriminant). Anything else is kept verbatim so that
//!   validation can report it.
//! - `encode` is the inverse of `decode`. Absent and null values encode to
//!   `None`.

use std::borrow::Cow;

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::error::DecodeError;
use crate::object::Object;
use crate::registry::TypeRegistry;

/// Producer for a field's default value.
pub type DefaultFn = fn() -> FieldValue;

/// Longest rendering of an offending value quoted inside a diagnostic.
const PREVIEW_LIMIT: usize = 64;

/// The internal representation of a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A tree fragment kept as-is: scalars, mappings, positions, opaque payloads.
    Tree(Value),
    /// A decoded list whose elements follow the list's item field.
    List(Vec<FieldValue>),
    /// A nested typed object, owned by its container.
    Object(Box<Object>),
}

impl FieldValue {
    /// Returns true for a tree `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Tree(Value::Null))
    }

    /// Returns the tree fragment, if this is one.
    pub fn as_tree(&self) -> Option<&Value> {
        match self {
            FieldValue::Tree(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested object, if this is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            FieldValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable access to the nested object, if this is one.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            FieldValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Element view over either list representation.
    ///
    /// Decoded lists yield their elements directly; a raw tree array yields
    /// one `Tree` element per item. Anything else is not a list.
    pub fn elements(&self) -> Option<Vec<Cow<'_, FieldValue>>> {
        match self {
            FieldValue::List(items) => Some(items.iter().map(Cow::Borrowed).collect()),
            FieldValue::Tree(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|v| Cow::Owned(FieldValue::Tree(v.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Render this value as a generic tree.
    pub fn to_tree(&self) -> Value {
        match self {
            FieldValue::Tree(v) => v.clone(),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_tree).collect()),
            FieldValue::Object(o) => o.to_tree(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Tree(value)
    }
}

impl From<Object> for FieldValue {
    fn from(object: Object) -> Self {
        FieldValue::Object(Box::new(object))
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

/// What a field holds and which kind-specific rules apply to it.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Any value, passed through untouched.
    Opaque,
    /// A JSON object with arbitrary contents.
    Mapping,
    /// A single position: two or more numeric ordinates within lon/lat bounds.
    Position,
    /// The object's own type name. Reads are fixed; writes must match.
    Discriminant,
    /// A homogeneous list.
    List(ListSpec),
    /// A nested object of the named schema or any registered subtype of it.
    Object {
        /// Registry name of the declared type.
        schema: String,
    },
}

/// Element field and cardinality rules of a list field.
#[derive(Debug, Clone)]
pub struct ListSpec {
    item: Box<FieldSpec>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    closed: bool,
}

impl ListSpec {
    /// The field every element is validated, decoded and encoded with.
    pub fn item(&self) -> &FieldSpec {
        &self.item
    }

    /// Minimum number of elements, if bounded.
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    /// Maximum number of elements, if bounded.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Whether the first and last elements must be the same position.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn validate(&self, name: &str, path: &str, value: &FieldValue, out: &mut Vec<Diagnostic>) {
        let Some(items) = value.elements() else {
            out.push(Diagnostic::new(
                path,
                format!("value of {name} ({}) is not a list", preview(value)),
            ));
            return;
        };

        if let Some(min) = self.min_length {
            if items.len() < min {
                out.push(Diagnostic::new(
                    path,
                    format!("{name} has {} element(s), fewer than min_length {min}", items.len()),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if items.len() > max {
                out.push(Diagnostic::new(
                    path,
                    format!("{name} has {} element(s), more than max_length {max}", items.len()),
                ));
            }
        }

        for (i, item) in items.iter().enumerate() {
            self.item.validate(name, &format!("{path}/{i}"), Some(item), out);
        }

        if self.closed {
            if let (Some(first), Some(last)) = (items.first(), items.last()) {
                if !same_position(first, last) {
                    out.push(Diagnostic::new(
                        path,
                        "linear ring must start and end at the same point",
                    ));
                }
            }
        }
    }
}

/// A declared field: kind plus default, required-ness and nullability.
///
/// Fields are required and non-nullable unless declared otherwise.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    kind: FieldKind,
    default: Option<DefaultFn>,
    required: bool,
    nullable: bool,
}

impl FieldSpec {
    fn with_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            default: None,
            required: true,
            nullable: false,
        }
    }

    /// A field holding any value.
    pub fn opaque() -> Self {
        Self::with_kind(FieldKind::Opaque)
    }

    /// A field holding a JSON object.
    pub fn mapping() -> Self {
        Self::with_kind(FieldKind::Mapping)
    }

    /// A field holding a single position.
    pub fn position() -> Self {
        Self::with_kind(FieldKind::Position)
    }

    /// The `type` discriminant field.
    pub fn discriminant() -> Self {
        Self::with_kind(FieldKind::Discriminant)
    }

    /// A field holding a nested object of `schema` or any subtype of it.
    pub fn object(schema: impl Into<String>) -> Self {
        Self::with_kind(FieldKind::Object {
            schema: schema.into(),
        })
    }

    /// A list whose elements follow `item`.
    pub fn list(item: FieldSpec) -> Self {
        Self::with_kind(FieldKind::List(ListSpec {
            item: Box::new(item),
            min_length: None,
            max_length: None,
            closed: false,
        }))
    }

    /// A closed ring of at least four positions.
    pub fn linear_ring() -> Self {
        let mut ring = Self::list(Self::position()).min_length(4);
        if let FieldKind::List(list) = &mut ring.kind {
            list.closed = true;
        }
        ring
    }

    /// A polygon: one exterior linear ring followed by any number of holes.
    ///
    /// Holes are not checked for containment within the exterior ring.
    pub fn polygon() -> Self {
        Self::list(Self::linear_ring()).min_length(1)
    }

    /// Set the minimum list length. Has no effect on non-list kinds.
    pub fn min_length(mut self, min: usize) -> Self {
        if let FieldKind::List(list) = &mut self.kind {
            list.min_length = Some(min);
        }
        self
    }

    /// Set the maximum list length. Has no effect on non-list kinds.
    pub fn max_length(mut self, max: usize) -> Self {
        if let FieldKind::List(list) = &mut self.kind {
            list.max_length = Some(max);
        }
        self
    }

    /// Mark the field as not required.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Allow the field to hold an explicit null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Value used when the field is read before being set.
    pub fn with_default(mut self, default: DefaultFn) -> Self {
        self.default = Some(default);
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether this is the `type` discriminant.
    pub fn is_discriminant(&self) -> bool {
        matches!(self.kind, FieldKind::Discriminant)
    }

    /// A freshly produced default value, if the field declares one.
    pub fn default_value(&self) -> Option<FieldValue> {
        self.default.map(|produce| produce())
    }

    /// Validate `value` (the current value of field `name` at `path`),
    /// appending one diagnostic per violated constraint.
    pub fn validate(
        &self,
        name: &str,
        path: &str,
        value: Option<&FieldValue>,
        out: &mut Vec<Diagnostic>,
    ) {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            if self.required && !self.nullable {
                out.push(Diagnostic::new(path, format!("missing required field: {name}")));
            }
            return;
        };

        match &self.kind {
            FieldKind::Opaque | FieldKind::Discriminant => {}
            FieldKind::Mapping => {
                if !matches!(value, FieldValue::Tree(Value::Object(_))) {
                    out.push(Diagnostic::new(
                        path,
                        format!("value of {name} ({}) is not a mapping", preview(value)),
                    ));
                }
            }
            FieldKind::Position => validate_position(path, value, out),
            FieldKind::List(list) => list.validate(name, path, value, out),
            FieldKind::Object { schema } => match value.as_object() {
                Some(object) if object.is_a(schema) => object.validate_into(path, out),
                Some(object) => out.push(Diagnostic::new(
                    path,
                    format!("{name} holds a {}, expected a {schema}", object.type_name()),
                )),
                None => out.push(Diagnostic::new(
                    path,
                    format!("value of {name} ({}) is not a {schema} object", preview(value)),
                )),
            },
        }
    }

    /// Convert a tree fragment into this field's internal representation.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when a nested object's concrete type cannot be
    /// resolved through `registry`.
    pub fn decode(&self, tree: &Value, registry: &TypeRegistry) -> Result<FieldValue, DecodeError> {
        match &self.kind {
            FieldKind::List(list) => match tree {
                Value::Array(items) => items
                    .iter()
                    .map(|item| list.item.decode(item, registry))
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List),
                other => Ok(FieldValue::Tree(other.clone())),
            },
            FieldKind::Object { schema } => {
                if tree.is_null() {
                    return Ok(self
                        .default_value()
                        .unwrap_or(FieldValue::Tree(Value::Null)));
                }
                let target = registry.resolve(schema)?;
                let object = Object::decode(target, tree, registry)?;
                Ok(FieldValue::Object(Box::new(object)))
            }
            _ => Ok(FieldValue::Tree(tree.clone())),
        }
    }

    /// Convert an internal value back into a tree fragment.
    pub fn encode(&self, value: Option<&FieldValue>) -> Option<Value> {
        let value = value.filter(|v| !v.is_null())?;
        match (&self.kind, value) {
            (FieldKind::List(list), FieldValue::List(items)) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| list.item.encode(Some(item)).unwrap_or(Value::Null))
                    .collect(),
            )),
            (_, other) => Some(other.to_tree()),
        }
    }
}

/// Numeric ordinates of a position, or `None` if any ordinate is not a number.
pub fn position_ordinates(value: &FieldValue) -> Option<Vec<f64>> {
    value
        .elements()?
        .iter()
        .map(|ordinate| ordinate.as_tree().and_then(Value::as_f64))
        .collect()
}

fn validate_position(path: &str, value: &FieldValue, out: &mut Vec<Diagnostic>) {
    let ordinates = match position_ordinates(value) {
        Some(ordinates) if ordinates.len() >= 2 => ordinates,
        _ => {
            out.push(Diagnostic::new(
                path,
                format!("value {} is not a valid set of coordinates", preview(value)),
            ));
            return;
        }
    };

    if !(-90.0..=90.0).contains(&ordinates[1]) {
        out.push(Diagnostic::new(path, "latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&ordinates[0]) {
        out.push(Diagnostic::new(path, "longitude must be between -180 and 180"));
    }
}

/// Positions compare numerically, so `[100, 0]` and `[100.0, 0.0]` are the same point.
fn same_position(a: &FieldValue, b: &FieldValue) -> bool {
    match (position_ordinates(a), position_ordinates(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.to_tree() == b.to_tree(),
    }
}

fn preview(value: &FieldValue) -> String {
    let rendered = value.to_tree().to_string();
    if rendered.len() <= PREVIEW_LIMIT {
        return rendered;
    }
    let mut end = PREVIEW_LIMIT;
    while !rendered.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &rendered[..end])
}
