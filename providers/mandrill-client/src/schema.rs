//! Structural schema for the provider message object
//!
//! Schema-as-data: the rule tree below is the single source of truth for
//! what a sendable message looks like. New provider fields are added here,
//! not in code.

use schema_common::{Field, Schema};

fn recipient_schema() -> Schema {
    Schema::new()
        .field("email", Field::email().required())
        .field("name", Field::string().required())
        .field(
            "type",
            Field::string()
                .default_to("to")
                .one_of(["from", "to", "bcc", "cc"]),
        )
}

fn attachment_schema() -> Schema {
    Schema::new()
        .field("type", Field::string())
        .field("name", Field::string())
        .field("content", Field::any())
}

/// Rule tree for the provider message object.
pub fn message_schema() -> Schema {
    Schema::new()
        .field("html", Field::string())
        .field("text", Field::string())
        .field("subject", Field::string().required())
        .field("from_email", Field::string().required())
        .field("from_name", Field::string().required())
        .field(
            "to",
            Field::array()
                .required()
                .non_empty()
                .items(Field::object().fields(recipient_schema())),
        )
        .field(
            "headers",
            Field::object().fields(Schema::new().field("Reply-To", Field::string())),
        )
        .field("important", Field::boolean())
        .field("track_opens", Field::boolean())
        .field("auto_text", Field::boolean().default_to(true))
        .field("auto_html", Field::boolean())
        .field("inline_css", Field::boolean())
        .field("url_strip_qs", Field::boolean())
        .field("preserve_recipients", Field::boolean().default_to(false))
        .field("view_content_link", Field::boolean())
        .field("bcc_address", Field::email())
        .field("tracking_domain", Field::url())
        .field("signing_domain", Field::url())
        .field("return_path_domain", Field::string())
        .field("merge", Field::boolean())
        .field("merge_language", Field::string())
        .field("global_merge_vars", Field::array())
        .field("merge_vars", Field::array())
        .field("tags", Field::array())
        .field("subaccount", Field::string())
        .field("google_analytics_domains", Field::array())
        .field("google_analytics_campaign", Field::string())
        .field(
            "metadata",
            Field::object().fields(Schema::new().field("website", Field::url())),
        )
        .field(
            "recipient_metadata",
            Field::array().items(
                Field::object().fields(
                    Schema::new()
                        .field("rcpt", Field::email())
                        .field("values", Field::object()),
                ),
            ),
        )
        .field(
            "attachments",
            Field::array().items(Field::object().fields(attachment_schema())),
        )
        .field(
            "images",
            Field::array().items(Field::object().fields(attachment_schema())),
        )
}
