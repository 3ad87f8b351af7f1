use crate::helpers::{spawn_app, Backend};
use courier::email::AutoSubmitted;
use lettre::message::Mailbox;
use rocket::http::Status;

#[tokio::test]
async fn deliveries_go_through_smtp_when_bulk_is_disabled() {
    // arrange
    let app = spawn_app(Backend::Standard).await;
    let body = serde_json::json!({
        "to": "a@x.com",
        "subject": "Hi",
        "body": "hello",
    });

    // act
    let response = app.post_deliveries(&body).await;

    // assert
    assert_eq!(response.status(), Status::Ok);
    let emails = app.smtp_emails();
    assert_eq!(emails.len(), 1, "Expected 1 email, {} were sent", emails.len());
    assert_eq!(emails[0].from, "Canvas <notifications@example.com>");
    assert_eq!(emails[0].to, vec!["a@x.com".to_string()]);
    assert_eq!(emails[0].text.as_deref(), Some("hello"));
    assert_eq!(emails[0].html, None);
    assert_eq!(emails[0].reply_to.as_deref(), Some("reply@example.com"));
    assert_eq!(emails[0].auto_submitted, AutoSubmitted::AutoReplied);
    assert!(app.bulk_emails().is_empty());
}

#[tokio::test]
async fn smtp_deliveries_keep_both_bodies_and_name_the_reply_to() {
    // arrange
    let app = spawn_app(Backend::Standard).await;
    let body = serde_json::json!({
        "to": "a@x.com",
        "subject": "Hi",
        "body": "hello",
        "html_body": "<p>hello</p>",
        "context": "course_42",
        "reply_to_name": "Course Inbox",
    });

    // act
    let response = app.post_deliveries(&body).await;

    // assert
    assert_eq!(response.status(), Status::Ok);
    let emails = app.smtp_emails();
    assert_eq!(emails[0].text.as_deref(), Some("hello"));
    assert_eq!(emails[0].html.as_deref(), Some("<p>hello</p>"));
    assert_eq!(emails[0].auto_submitted, AutoSubmitted::AutoGenerated);
    let reply_to: Mailbox = emails[0].reply_to.as_deref().unwrap().parse().unwrap();
    assert_eq!(reply_to.name.as_deref(), Some("Course Inbox"));
    assert_eq!(AsRef::<str>::as_ref(&reply_to.email), "reply@example.com");
}

#[tokio::test]
async fn bulk_deliveries_register_every_recipient() {
    // arrange
    let app = spawn_app(Backend::Bulk { accept: true }).await;
    let body = serde_json::json!({
        "to": ["a@x.com", "b@x.com"],
        "subject": "Hi",
        "body": "hello",
        "html_body": "<p>hello</p>",
    });

    // act
    let response = app.post_deliveries(&body).await;

    // assert
    assert_eq!(response.status(), Status::Ok);
    let emails = app.bulk_emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(
        emails[0].destinations,
        vec!["a@x.com".to_string(), "b@x.com".to_string()]
    );
    assert_eq!(emails[0].text_body.as_deref(), Some("hello"));
    assert_eq!(emails[0].html_body, None);
    assert_eq!(emails[0].sender_alias.as_deref(), Some("Canvas"));
    assert_eq!(emails[0].subject.as_deref(), Some("Hi"));
    assert!(app.smtp_emails().is_empty());
}

#[tokio::test]
async fn bulk_deliveries_fall_back_to_html() {
    // arrange
    let app = spawn_app(Backend::Bulk { accept: true }).await;
    let body = serde_json::json!({
        "to": "a@x.com",
        "from_name": "Ursula",
        "subject": "Hi",
        "html_body": "<p>hello</p>",
    });

    // act
    let response = app.post_deliveries(&body).await;

    // assert
    assert_eq!(response.status(), Status::Ok);
    let emails = app.bulk_emails();
    assert_eq!(emails[0].text_body, None);
    assert_eq!(emails[0].html_body.as_deref(), Some("<p>hello</p>"));
    assert_eq!(emails[0].sender_alias.as_deref(), Some("Ursula"));
}

#[tokio::test]
async fn rejected_bulk_delivery_returns_a_502() {
    // arrange
    let app = spawn_app(Backend::Bulk { accept: false }).await;
    let body = serde_json::json!({
        "to": "a@x.com",
        "subject": "Hi",
        "body": "hello",
    });

    // act
    let response = app.post_deliveries(&body).await;

    // assert
    assert_eq!(response.status(), Status::BadGateway);
    assert_eq!(app.bulk_emails().len(), 1);
}

#[tokio::test]
async fn deliveries_return_a_400_when_data_is_missing() {
    // arrange
    let app = spawn_app(Backend::Standard).await;
    let test_cases = vec![
        (serde_json::json!({"subject": "Hi", "body": "hello"}), "missing the recipient"),
        (serde_json::json!({"to": "a@x.com", "body": "hello"}), "missing the subject"),
        (serde_json::json!({"to": "a@x.com", "subject": "Hi"}), "missing both bodies"),
        (serde_json::json!({"to": [], "subject": "Hi", "body": "hello"}), "empty recipient list"),
        (serde_json::json!({"to": ["a@x.com", ""], "subject": "Hi", "body": "hello"}), "a blank recipient"),
    ];

    for (invalid_body, error_message) in test_cases {
        // act
        let response = app.post_deliveries(&invalid_body).await;

        // assert
        assert_eq!(
            response.status(),
            Status::BadRequest,
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
    assert!(app.smtp_emails().is_empty());
}

#[tokio::test]
async fn deliveries_return_a_400_when_a_display_name_contains_line_breaks() {
    // arrange
    let app = spawn_app(Backend::Standard).await;
    let test_cases = vec![
        (
            serde_json::json!({"to": "a@x.com", "from_name": "Evil\r\nBcc: x@y.com", "subject": "Hi", "body": "hello"}),
            "sender name",
        ),
        (
            serde_json::json!({"to": "a@x.com", "reply_to_name": "Evil\nBcc: x@y.com", "subject": "Hi", "body": "hello"}),
            "reply-to name",
        ),
    ];

    for (body, field) in test_cases {
        // act
        let response = app.post_deliveries(&body).await;

        // assert
        assert_eq!(
            response.status(),
            Status::BadRequest,
            "The API did not fail with 400 Bad Request when the {} contained a line break.",
            field
        );
    }
    assert!(app.smtp_emails().is_empty());
}
