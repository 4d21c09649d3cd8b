//! Thin client for the Mandrill transactional-email HTTP API
//!
//! Builds provider-conformant request payloads from a user-supplied message
//! description, validates them against a structural schema, merges
//! configuration defaults and dispatches through a uniform HTTP wrapper
//! that normalizes success and error responses. Provider-reported errors
//! (HTTP status >= 400) resolve as ordinary responses; only transport
//! failures reject.

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod schema;

// Re-export commonly used types
pub use client::{ApiResponse, MandrillClient};
pub use config::MandrillConfig;
pub use error::MandrillError;
pub use message::{
    Attachment, MergeVar, Message, Recipient, RecipientType, SendOptions, SendTemplateOptions,
    TemplateOptions,
};
pub use schema::message_schema;
pub use schema_common::{ValidationReport, Violations};
