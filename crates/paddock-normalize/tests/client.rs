//! Integration tests for `ClassifierClient` and the normalizer fallback
//! behavior, using wiremock HTTP mocks.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paddock_normalize::{normalize_model_trim, normalize_options, ClassifierClient, NormalizeError};

fn test_client(base_url: &str) -> ClassifierClient {
    ClassifierClient::with_base_url(
        Some("test-key".to_string()),
        "test-model",
        30,
        3,
        0,
        base_url,
    )
    .expect("client construction should not fail")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn complete_returns_the_message_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hello")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let content = client.complete("instruction", "input").await.unwrap();
    assert_eq!(content, "hello");
}

#[tokio::test]
async fn model_trim_parses_a_structured_response() {
    let server = MockServer::start().await;

    let content = r#"{"model": "911", "trim": "GT3 RS", "generation": "991.1", "year": 2016}"#;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = normalize_model_trim(Some(&client), "16k-Mile 2016 Porsche 911 GT3 RS").await;
    assert_eq!(result.model.as_deref(), Some("911"));
    assert_eq!(result.trim.as_deref(), Some("GT3 RS"));
    assert_eq!(result.generation.as_deref(), Some("991.1"));
    assert_eq!(result.year, Some(2016));
}

#[tokio::test]
async fn code_fenced_response_still_parses() {
    let server = MockServer::start().await;

    let content = "```json\n{\"model\": \"911\", \"trim\": \"Turbo S\", \"generation\": null, \"year\": 2011}\n```";
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = normalize_model_trim(Some(&client), "2011 Porsche 911 Turbo S").await;
    assert_eq!(result.trim.as_deref(), Some("Turbo S"));
    assert_eq!(result.generation, None);
}

#[tokio::test]
async fn overloaded_service_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let content = client.complete("instruction", "input").await.unwrap();
    assert_eq!(content, "ok");
}

#[tokio::test]
async fn rate_limit_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.complete("instruction", "input").await.unwrap_err();
    assert!(matches!(err, NormalizeError::RateLimited(_)));

    server.verify().await;
}

#[tokio::test]
async fn rate_limited_normalizer_falls_back_deterministically() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = normalize_model_trim(Some(&client), "8k-Mile 2004 Porsche 911 GT3").await;

    // Deterministic fallback output, not an error and not all-null.
    assert_eq!(result.model.as_deref(), Some("911"));
    assert_eq!(result.trim.as_deref(), Some("GT3"));
    assert_eq!(result.year, Some(2004));

    server.verify().await;
}

#[tokio::test]
async fn unparseable_response_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("I could not classify this title.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = normalize_model_trim(Some(&client), "8k-Mile 2004 Porsche 911 GT3").await;
    assert_eq!(result.trim.as_deref(), Some("GT3"));
}

#[tokio::test]
async fn options_array_response_is_used() {
    let server = MockServer::start().await;

    let content = r#"["Sport Chrono Package", "Carbon-Ceramic Brakes"]"#;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = normalize_options(Some(&client), "Sport Chrono Pkg; PCCB").await;
    assert_eq!(
        options,
        vec!["Sport Chrono Package", "Carbon-Ceramic Brakes"]
    );
}

#[tokio::test]
async fn options_wrapper_object_is_accepted() {
    let server = MockServer::start().await;

    let content = r#"{"options": ["Sport Bucket Seats"]}"#;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = normalize_options(Some(&client), "bucket seats").await;
    assert_eq!(options, vec!["Sport Bucket Seats"]);
}

#[tokio::test]
async fn failed_options_call_degrades_to_naive_split() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = normalize_options(Some(&client), "Sport Chrono, PCCB").await;
    assert_eq!(options, vec!["Sport Chrono", "PCCB"]);
}

#[tokio::test]
async fn empty_content_is_an_empty_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  ")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.complete("instruction", "input").await.unwrap_err();
    assert!(matches!(err, NormalizeError::EmptyResponse));
}
