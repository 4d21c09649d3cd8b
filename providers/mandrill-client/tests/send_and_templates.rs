//! Operation-level behavior: body construction, validation short-circuits
//! and template preconditions.

use chrono::TimeZone;
use mandrill_client::{
    MandrillClient, MandrillConfig, MandrillError, Message, Recipient, SendOptions,
    SendTemplateOptions, TemplateOptions,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn client_for(mock_server: &MockServer) -> MandrillClient {
    let config = MandrillConfig {
        base_url: format!("{}/", mock_server.uri()),
        default_from_email: Some("team@example.com".to_string()),
        default_from_name: Some("Team".to_string()),
        ..MandrillConfig::with_api_key("test-api-key")
    };
    MandrillClient::new(config).unwrap()
}

fn sample_message() -> Message {
    Message {
        subject: Some("Hi".to_string()),
        from_email: Some("a@b.com".to_string()),
        from_name: Some("A".to_string()),
        to: vec![Recipient::new("c@d.com", "C")],
        ..Message::default()
    }
}

#[tokio::test]
async fn test_send_message_posts_validated_body() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .and(body_partial_json(json!({
            "key": "test-api-key",
            "async": true,
            "message": {
                "subject": "Hi",
                "from_email": "a@b.com",
                "to": [{"email": "c@d.com", "name": "C", "type": "to"}]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"email": "c@d.com", "status": "sent"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .send_message(&sample_message(), &SendOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body[0]["status"], json!("sent"));
}

#[tokio::test]
async fn test_send_message_honors_explicit_sync() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .and(body_partial_json(json!({"async": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = SendOptions {
        async_send: Some(false),
        ..SendOptions::default()
    };

    client_for(&mock_server)
        .send_message(&sample_message(), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_message_carries_schedule_options() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .and(body_partial_json(json!({
            "ip_pool": "Main Pool",
            "send_at": "2026-03-14 09:26:53"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = SendOptions {
        ip_pool: Some("Main Pool".to_string()),
        send_at: Some(chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()),
        ..SendOptions::default()
    };

    client_for(&mock_server)
        .send_message(&sample_message(), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_message_never_reaches_network() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let message = Message {
        subject: Some("Hi".to_string()),
        from_email: Some("a@b.com".to_string()),
        from_name: Some("A".to_string()),
        to: vec![Recipient::new("not-an-email", "C")],
        ..Message::default()
    };

    let result = client_for(&mock_server)
        .send_message(&message, &SendOptions::default())
        .await;

    let violations = match result {
        Err(MandrillError::Validation(violations)) => violations,
        other => panic!("Expected Validation error, got {other:?}"),
    };
    assert_eq!(
        violations.get("to[0].email"),
        Some("is not a valid email address")
    );
}

#[tokio::test]
async fn test_send_template_posts_ordered_merge_vars() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/messages/send-template.json"))
        .and(body_partial_json(json!({
            "key": "test-api-key",
            "template_name": "welcome",
            "template_content": [],
            "message": {
                "merge_language": "handlebars",
                "global_merge_vars": [
                    {"name": "first", "content": "One"},
                    {"name": "second", "content": "Two"}
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"email": "c@d.com", "status": "queued"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = SendTemplateOptions {
        template_name: Some("welcome".to_string()),
        merge_language: Some("handlebars".to_string()),
        ..SendTemplateOptions::default()
    };

    let response = client_for(&mock_server)
        .send_message_template(
            &sample_message(),
            &[("first", "One"), ("second", "Two")],
            &opts,
        )
        .await
        .unwrap();

    assert_eq!(response.body[0]["status"], json!("queued"));
}

#[tokio::test]
async fn test_send_template_requires_template_name() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .send_message_template(&sample_message(), &[], &SendTemplateOptions::default())
        .await;

    match result {
        Err(MandrillError::Request(message)) => {
            assert!(message.contains("template"), "message was: {message}");
        }
        other => panic!("Expected Request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_template_posts_code_and_options() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/templates/add.json"))
        .and(body_partial_json(json!({
            "key": "test-api-key",
            "name": "welcome",
            "code": "<p>*|NAME|*</p>",
            "subject": "Welcome!",
            "publish": true,
            "labels": ["onboarding"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "welcome", "slug": "welcome"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = TemplateOptions {
        name: Some("welcome".to_string()),
        subject: Some("Welcome!".to_string()),
        publish: true,
        labels: vec!["onboarding".to_string()],
    };

    let response = client_for(&mock_server)
        .add_template("<p>*|NAME|*</p>", &opts)
        .await
        .unwrap();

    assert_eq!(response.body["slug"], json!("welcome"));
}

#[tokio::test]
async fn test_add_template_requires_name() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .add_template("<p>code</p>", &TemplateOptions::default())
        .await;

    assert!(matches!(result, Err(MandrillError::Request(_))));
}

#[tokio::test]
async fn test_update_template_uses_update_endpoint() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/templates/update.json"))
        .and(body_partial_json(json!({
            "name": "welcome",
            "code": "<p>v2</p>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "welcome"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = TemplateOptions {
        name: Some("welcome".to_string()),
        ..TemplateOptions::default()
    };

    client_for(&mock_server)
        .update_template("<p>v2</p>", &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_and_publish_template_post_key_and_name() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/templates/info.json"))
        .and(body_partial_json(json!({"key": "test-api-key", "name": "welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "welcome"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/templates/publish.json"))
        .and(body_partial_json(json!({"key": "test-api-key", "name": "welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "welcome"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.get_template("welcome").await.unwrap();
    client.publish_template("welcome").await.unwrap();
}

#[tokio::test]
async fn test_list_templates_label_filter() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/templates/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "welcome", "labels": ["mylabel"]}
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.list_templates(Some("mylabel")).await.unwrap();
    client.list_templates(None).await.unwrap();

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 2);

    let filtered: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(filtered["label"], json!("mylabel"));

    let unfiltered: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert!(unfiltered.get("label").is_none());
}
