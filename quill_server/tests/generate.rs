use axum::http::StatusCode;
use quill::{ContentType, ErrorBody, ErrorDetail, GenerationRequest, GenerationResult};
use serde_json::json;

mod utils;

use utils::Upstream;

fn robots() -> GenerationRequest {
    GenerationRequest::builder()
        .topic("robots")
        .style("funny")
        .content_type(ContentType::Poem)
        .build()
}

#[tokio::test]
async fn generate_route() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = Upstream::writing("Gears that giggle");
    let base_url = upstream.spawn().await?;
    let url = utils::spawn_server(utils::config(&base_url, Some("test-key"))).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{url}/generate"))
        .json(&robots())
        .send()
        .await?;
    let response = utils::assert_ok_response(response).await?;
    let result = response.json::<GenerationResult>().await?;
    assert_eq!(
        result,
        GenerationResult {
            content: "Gears that giggle".to_string(),
            content_type: "poem".to_string(),
            style: "funny".to_string(),
            topic: "robots".to_string(),
        }
    );

    // The model got the key and a prompt built from the request.
    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].api_key.as_deref(), Some("test-key"));
    assert!(calls[0].prompt().starts_with("Write a funny poem about robots."));
    assert!(calls[0].prompt().contains("12-16 lines"));
    Ok(())
}

#[tokio::test]
async fn invalid_bodies_are_unprocessable() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = Upstream::writing("unused");
    let base_url = upstream.spawn().await?;
    let url = utils::spawn_server(utils::config(&base_url, Some("test-key"))).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{url}/generate"))
        .json(&json!({"topic": "robots", "style": "funny", "content_type": "limerick"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<ErrorBody>().await?;
    assert!(matches!(body.detail, ErrorDetail::Issues(issues) if issues.len() == 1));
    assert!(upstream.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_api_key() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = Upstream::writing("unused");
    let base_url = upstream.spawn().await?;
    let url = utils::spawn_server(utils::config(&base_url, None)).await?;

    let response = reqwest::Client::new()
        .post(format!("{url}/generate"))
        .json(&robots())
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<ErrorBody>().await?;
    assert_eq!(
        body.detail,
        ErrorDetail::Message("Error generating content: API key not configured".to_string())
    );
    assert!(upstream.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn upstream_failures() -> Result<(), Box<dyn std::error::Error>> {
    // The model answers, but with nothing.
    let upstream = Upstream::new(StatusCode::OK, json!({"candidates": []}));
    let base_url = upstream.spawn().await?;
    let url = utils::spawn_server(utils::config(&base_url, Some("test-key"))).await?;
    let response = reqwest::Client::new()
        .post(format!("{url}/generate"))
        .json(&robots())
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<ErrorBody>().await?;
    assert_eq!(
        body.detail,
        ErrorDetail::Message("Error generating content: 500: Failed to generate content".to_string())
    );

    // The model rejects the key.
    let upstream = Upstream::new(
        StatusCode::BAD_REQUEST,
        json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key."}}),
    );
    let base_url = upstream.spawn().await?;
    let url = utils::spawn_server(utils::config(&base_url, Some("bad-key"))).await?;
    let response = reqwest::Client::new()
        .post(format!("{url}/generate"))
        .json(&robots())
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<ErrorBody>().await?;
    let ErrorDetail::Message(message) = body.detail else {
        panic!("expected a message detail");
    };
    assert!(message.starts_with("Error generating content: "));
    assert!(message.contains("API key not valid"));
    Ok(())
}
