//! Declarative structural schema validation for provider payloads
//!
//! A schema is plain data: a mapping from field name to a rule describing
//! the expected kind, requiredness, default value, legal value set and any
//! nested rules. A generic recursive traversal interprets the rule tree
//! against a `serde_json::Value`, so supporting a new provider field is a
//! schema edit rather than a code change.

pub mod rules;
pub mod validate;

// Re-export commonly used types
pub use rules::{Field, FieldKind, Schema};
pub use validate::{ValidationReport, Violations};
