//! Message and operation-option types
//!
//! `Message` mirrors the provider message object. Every field is optional
//! and absent fields are skipped during serialization, so the schema sees
//! exactly what the caller supplied and applies its own defaults. Fields
//! the client does not model can be sent through `extra`; the validator
//! passes them along unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Recipient slot on the provider wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    From,
    To,
    Bcc,
    Cc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
    /// Defaults to `to` during validation when unset.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecipientType>,
}

impl Recipient {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            kind: None,
        }
    }
}

/// One per-message template substitution, `{name, content}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeVar {
    pub name: String,
    pub content: Value,
}

/// Attachment or inline image. `content` is base64 for binary payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// The semantic email-send request prior to provider wire encoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub to: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_html: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_css: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_strip_qs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_recipients: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_content_link: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub global_merge_vars: Vec<MergeVar>,
    /// Per-recipient merge variables, `{rcpt, vars}` entries.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub merge_vars: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub google_analytics_domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Per-recipient metadata, `{rcpt, values}` entries.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recipient_metadata: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<Attachment>,
    /// Provider fields the client does not model; forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for [`crate::MandrillClient::send_message`].
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Whether the provider queues the send. Unset means `true`; an
    /// explicit `Some(false)` requests synchronous sending.
    pub async_send: Option<bool>,
    /// Dedicated IP pool to send from.
    pub ip_pool: Option<String>,
    /// Deliver at this time instead of immediately.
    pub send_at: Option<DateTime<Utc>>,
}

/// Options for [`crate::MandrillClient::send_message_template`].
#[derive(Debug, Clone, Default)]
pub struct SendTemplateOptions {
    /// Name of the stored template to render. Required.
    pub template_name: Option<String>,
    /// Template language merged into the message payload when set.
    pub merge_language: Option<String>,
    pub async_send: Option<bool>,
    pub ip_pool: Option<String>,
    pub send_at: Option<DateTime<Utc>>,
}

/// Options for template creation and update.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// Template name. Required.
    pub name: Option<String>,
    pub subject: Option<String>,
    /// Publish immediately instead of saving a draft.
    pub publish: bool,
    pub labels: Vec<String>,
}
