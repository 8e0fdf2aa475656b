use housebuild_estimator::{
    Error,
    config::LlmConfig,
    estimation::{DurationEstimator, EstimationRequest, estimation_output_schema},
    llm::{ChatCompletionRequest, ChatMessage, LlmClient, OpenAiClient},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

fn create_test_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        provider: "openai".to_string(),
        base_url: format!("{}/v1", server.uri()),
        api_key: "test-api-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        temperature: Some(0.2),
        max_tokens: None,
    }
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
                "refusal": null
            },
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 96,
            "completion_tokens": 24,
            "total_tokens": 120
        }
    })
}

#[tokio::test]
async fn test_structured_request_and_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "duration_estimate", "strict": true }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"{"durationEstimate":"2 weeks","reasoning":"Cure time"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server));
    let request = ChatCompletionRequest::new(vec![ChatMessage::user("Pour the slab")])
        .with_output_schema(estimation_output_schema());

    let response = client.create_chat_completion(request).await.unwrap();

    assert_eq!(response.id, "chatcmpl-123");
    assert_eq!(response.model, "gpt-4o-mini");
    assert_eq!(
        response.first_content(),
        Some(r#"{"durationEstimate":"2 weeks","reasoning":"Cure time"}"#)
    );
    assert_eq!(response.usage.unwrap().total_tokens, 120);
}

#[tokio::test]
async fn test_provider_error_is_model_invocation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "The model `gpt-4o-mini` does not exist",
                "type": "invalid_request_error",
                "param": null,
                "code": "model_not_found"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server));
    let err = client
        .create_chat_completion(ChatCompletionRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelInvocation(ref m) if m.contains("does not exist")));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {
                "message": "The server is overloaded",
                "type": "server_error",
                "param": null,
                "code": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(create_test_config(&server));
    let err = client
        .create_chat_completion(ChatCompletionRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelInvocation(_)));
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_unreachable_provider_is_model_invocation() {
    let config = LlmConfig {
        provider: "openai".to_string(),
        // Nothing listens on the discard port.
        base_url: "http://127.0.0.1:9/v1".to_string(),
        api_key: "test-api-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        temperature: None,
        max_tokens: None,
    };

    let err = OpenAiClient::new(config)
        .create_chat_completion(ChatCompletionRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelInvocation(_)));
}

#[tokio::test]
async fn test_estimator_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"{"durationEstimate":"4 days","reasoning":"Standard installation with minor adjustments."}"#,
        )))
        .expect(2)
        .mount(&server)
        .await;

    let estimator =
        DurationEstimator::new(Arc::new(OpenAiClient::new(create_test_config(&server))));

    for _ in 0..2 {
        let result = estimator
            .estimate_duration(EstimationRequest::new(
                "Install kitchen cabinets and countertops",
            ))
            .await
            .unwrap();
        assert_eq!(result.duration_estimate, "4 days");
    }

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.ends_with("Task Description: Install kitchen cabinets and countertops"));
    assert_eq!(body["messages"][0]["role"], "user");
}

#[tokio::test]
async fn test_estimator_rejects_refusal_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("I cannot estimate that without more detail.")),
        )
        .mount(&server)
        .await;

    let estimator =
        DurationEstimator::new(Arc::new(OpenAiClient::new(create_test_config(&server))));
    let err = estimator
        .estimate_duration(EstimationRequest::new("Do the thing"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SchemaValidation(_)));
}
