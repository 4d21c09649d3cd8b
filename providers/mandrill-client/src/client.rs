//! Mandrill API client
//!
//! Every operation builds a request body, optionally validates it, and
//! funnels through [`MandrillClient::dispatch`]. Provider-reported errors
//! (HTTP status >= 400) resolve as ordinary [`ApiResponse`] values with the
//! parsed payload intact; only transport failures reject. A disabled client
//! never touches the network and resolves to a synthetic empty response.

use crate::config::MandrillConfig;
use crate::error::MandrillError;
use crate::message::{MergeVar, Message, SendOptions, SendTemplateOptions, TemplateOptions};
use crate::schema::message_schema;
use chrono::{DateTime, Utc};
use reqwest::Client;
use schema_common::Schema;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Normalized provider response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    /// Response body parsed as JSON; `Null` when the body was not JSON.
    pub body: Value,
    /// The response body exactly as received.
    pub raw_body: String,
}

impl ApiResponse {
    /// True when the provider reported an error status.
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    fn dummy() -> Self {
        Self {
            status_code: 200,
            body: Value::Array(Vec::new()),
            raw_body: "[]".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendRequest {
    key: String,
    message: Value,
    #[serde(rename = "async")]
    send_async: bool,
    ip_pool: Option<String>,
    send_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendTemplateRequest {
    key: String,
    template_name: String,
    template_content: Vec<MergeVar>,
    message: Value,
    #[serde(rename = "async")]
    send_async: bool,
    ip_pool: Option<String>,
    send_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct TemplateRequest {
    key: String,
    name: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    publish: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TemplateNameRequest {
    key: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct TemplateListRequest {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

/// Provider wire format for scheduled sends, UTC.
fn format_send_at(send_at: DateTime<Utc>) -> String {
    send_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Empty and null sender fields count as unset, like absent ones.
fn fill_sender_field(object: &mut Map<String, Value>, name: &str, fallback: Option<&str>) {
    let unset = match object.get(name) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };

    if unset {
        object.insert(
            name.to_string(),
            Value::String(fallback.unwrap_or_default().to_string()),
        );
    }
}

pub struct MandrillClient {
    http: Client,
    config: MandrillConfig,
    schema: Schema,
}

impl MandrillClient {
    /// Create a client from explicit configuration.
    pub fn new(config: MandrillConfig) -> Result<Self, MandrillError> {
        config.validate().map_err(MandrillError::Configuration)?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| {
                MandrillError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            config,
            schema: message_schema(),
        })
    }

    /// Create a client from environment variables.
    ///
    /// Reads `MANDRILL_API_KEY`, `MANDRILL__*` overrides and an optional
    /// config file named by `MANDRILL_CONFIG_PATH`.
    pub fn from_env() -> Result<Self, MandrillError> {
        let config = MandrillConfig::from_env()
            .map_err(|e| MandrillError::Configuration(e.to_string()))?;
        Self::new(config)
    }

    pub fn config(&self) -> &MandrillConfig {
        &self.config
    }

    fn key(&self) -> String {
        self.config.api_key.clone().unwrap_or_default()
    }

    /// Low-level request primitive shared by every operation.
    ///
    /// A disabled client resolves to the dummy response without network
    /// activity. Otherwise the body is posted as JSON to `base_url + path`
    /// with the configured timeout; the response resolves regardless of
    /// status code, and only transport failures reject.
    pub async fn dispatch<B>(&self, path: &str, body: &B) -> Result<ApiResponse, MandrillError>
    where
        B: Serialize + ?Sized,
    {
        if !self.config.enabled {
            info!("Mandrill disabled, dummy send to {}", path);
            return Ok(ApiResponse::dummy());
        }

        let url = format!("{}{}", self.config.base_url, path);
        debug!("Dispatching request to {}", url);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let raw_body = response.text().await?;
        let body = serde_json::from_str(&raw_body).unwrap_or(Value::Null);

        debug!("Mandrill responded with status {}", status_code);

        Ok(ApiResponse {
            status_code,
            body,
            raw_body,
        })
    }

    /// Fill sender defaults and validate against the message schema.
    fn prepare_message(&self, message: &Message) -> Result<Value, MandrillError> {
        let mut value = serde_json::to_value(message)
            .map_err(|e| MandrillError::Request(format!("Message could not be encoded: {e}")))?;

        if let Some(object) = value.as_object_mut() {
            fill_sender_field(
                object,
                "from_email",
                self.config.default_from_email.as_deref(),
            );
            fill_sender_field(
                object,
                "from_name",
                self.config.default_from_name.as_deref(),
            );
        }

        let report = self.schema.validate(&value);
        if !report.valid {
            return Err(MandrillError::Validation(report.errors));
        }

        Ok(report.data)
    }

    /// Send a message.
    ///
    /// <https://mandrillapp.com/api/docs/messages.JSON.html>
    pub async fn send_message(
        &self,
        message: &Message,
        opts: &SendOptions,
    ) -> Result<ApiResponse, MandrillError> {
        let message = self.prepare_message(message)?;

        let body = SendRequest {
            key: self.key(),
            message,
            send_async: opts.async_send.unwrap_or(true),
            ip_pool: opts.ip_pool.clone(),
            send_at: opts.send_at.map(format_send_at),
        };

        self.dispatch("messages/send.json", &body).await
    }

    /// Send a message rendered from a stored template.
    ///
    /// `replacements` become the message's `global_merge_vars` in slice
    /// order, replacing any caller-supplied entries.
    pub async fn send_message_template(
        &self,
        message: &Message,
        replacements: &[(&str, &str)],
        opts: &SendTemplateOptions,
    ) -> Result<ApiResponse, MandrillError> {
        let template_name = opts.template_name.clone().ok_or_else(|| {
            MandrillError::Request(
                "A template name is required to send a templated message".to_string(),
            )
        })?;

        let mut message = self.prepare_message(message)?;
        if let Some(object) = message.as_object_mut() {
            if let Some(language) = &opts.merge_language {
                object.insert("merge_language".to_string(), json!(language));
            }
            let merge_vars: Vec<Value> = replacements
                .iter()
                .map(|(name, content)| json!({"name": name, "content": content}))
                .collect();
            object.insert("global_merge_vars".to_string(), Value::Array(merge_vars));
        }

        let body = SendTemplateRequest {
            key: self.key(),
            template_name,
            template_content: Vec::new(),
            message,
            send_async: opts.async_send.unwrap_or(true),
            ip_pool: opts.ip_pool.clone(),
            send_at: opts.send_at.map(format_send_at),
        };

        self.dispatch("messages/send-template.json", &body).await
    }

    /// Store a new template under `opts.name`.
    pub async fn add_template(
        &self,
        code: &str,
        opts: &TemplateOptions,
    ) -> Result<ApiResponse, MandrillError> {
        let body = self.template_request(code, opts, "create")?;
        self.dispatch("templates/add.json", &body).await
    }

    /// Replace the stored template named by `opts.name`.
    pub async fn update_template(
        &self,
        code: &str,
        opts: &TemplateOptions,
    ) -> Result<ApiResponse, MandrillError> {
        let body = self.template_request(code, opts, "update")?;
        self.dispatch("templates/update.json", &body).await
    }

    /// Fetch information about a stored template.
    pub async fn get_template(&self, name: &str) -> Result<ApiResponse, MandrillError> {
        let body = self.template_name_request(name, "look up")?;
        self.dispatch("templates/info.json", &body).await
    }

    /// Publish the stored template's draft content.
    pub async fn publish_template(&self, name: &str) -> Result<ApiResponse, MandrillError> {
        let body = self.template_name_request(name, "publish")?;
        self.dispatch("templates/publish.json", &body).await
    }

    /// List stored templates, optionally restricted to one label.
    pub async fn list_templates(
        &self,
        filter: Option<&str>,
    ) -> Result<ApiResponse, MandrillError> {
        let body = TemplateListRequest {
            key: self.key(),
            label: filter.map(str::to_string),
        };

        self.dispatch("templates/list.json", &body).await
    }

    fn template_request(
        &self,
        code: &str,
        opts: &TemplateOptions,
        action: &str,
    ) -> Result<TemplateRequest, MandrillError> {
        let name = opts
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                MandrillError::Request(format!("A template name is required to {action} a template"))
            })?;

        Ok(TemplateRequest {
            key: self.key(),
            name,
            code: code.to_string(),
            subject: opts.subject.clone(),
            publish: opts.publish,
            labels: opts.labels.clone(),
        })
    }

    fn template_name_request(
        &self,
        name: &str,
        action: &str,
    ) -> Result<TemplateNameRequest, MandrillError> {
        if name.trim().is_empty() {
            return Err(MandrillError::Request(format!(
                "A template name is required to {action} a template"
            )));
        }

        Ok(TemplateNameRequest {
            key: self.key(),
            name: name.to_string(),
        })
    }
}
