//! Schema rule tree
//!
//! Rules are built with a chainable API and carry no behavior of their own;
//! interpretation lives in [`crate::validate`].

use serde_json::Value;
use std::collections::BTreeMap;

/// Value kinds a field rule can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Array,
    Object,
    /// A string holding a syntactically valid email address.
    Email,
    /// A string holding an absolute URL.
    Url,
}

/// Rule for a single field.
///
/// A rule without a kind accepts any value (used for free-form content
/// fields). `fields` nests a full sub-schema under an `Object` rule;
/// `items` applies one element rule to every entry of an `Array`.
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub(crate) kind: Option<FieldKind>,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) one_of: Vec<String>,
    pub(crate) min_items: Option<usize>,
    pub(crate) fields: Option<Schema>,
    pub(crate) items: Option<Box<Field>>,
}

impl Field {
    fn of(kind: FieldKind) -> Self {
        Field {
            kind: Some(kind),
            ..Field::default()
        }
    }

    pub fn string() -> Self {
        Self::of(FieldKind::String)
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn array() -> Self {
        Self::of(FieldKind::Array)
    }

    pub fn object() -> Self {
        Self::of(FieldKind::Object)
    }

    pub fn email() -> Self {
        Self::of(FieldKind::Email)
    }

    pub fn url() -> Self {
        Self::of(FieldKind::Url)
    }

    /// Rule that accepts any value.
    pub fn any() -> Self {
        Field::default()
    }

    /// Mark the field as required; absence becomes a violation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value copied into the output when the input key is absent.
    pub fn default_to(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict a string field to a fixed value set.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = values.into_iter().map(Into::into).collect();
        self
    }

    /// Require an array to hold at least `min` elements.
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Require a non-empty array.
    pub fn non_empty(self) -> Self {
        self.min_items(1)
    }

    /// Element rule applied to every entry of an array field.
    pub fn items(mut self, rule: Field) -> Self {
        self.items = Some(Box::new(rule));
        self
    }

    /// Nested schema applied to an object field.
    pub fn fields(mut self, schema: Schema) -> Self {
        self.fields = Some(schema);
        self
    }
}

/// Ordered mapping from field name to rule.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub(crate) fields: BTreeMap<String, Field>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// Add a rule for `name`, replacing any previous rule.
    pub fn field(mut self, name: &str, rule: Field) -> Self {
        self.fields.insert(name.to_string(), rule);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
