use super::prompt::render_prompt;
use super::types::{EstimationRequest, EstimationResult};
use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmClient, OutputSchema},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

const SCHEMA_NAME: &str = "duration_estimate";

/// JSON schema the model output must satisfy: two required string fields.
pub fn estimation_output_schema() -> OutputSchema {
    OutputSchema::new(
        SCHEMA_NAME,
        json!({
            "type": "object",
            "properties": {
                "durationEstimate": {
                    "type": "string",
                    "description": "The estimated duration of the task or step, including units."
                },
                "reasoning": {
                    "type": "string",
                    "description": "The reasoning behind the duration estimate."
                }
            },
            "required": ["durationEstimate", "reasoning"],
            "additionalProperties": false
        }),
    )
    .with_description("Duration estimate for a house building task or step")
}

// Fields stay optional so a missing field is reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEstimate {
    duration_estimate: Option<String>,
    reasoning: Option<String>,
}

/// Stateless estimate service over an injected model client.
///
/// Cloning is cheap and clones share the client; calls never share state, so
/// any number may run concurrently.
#[derive(Clone)]
pub struct DurationEstimator {
    client: Arc<dyn LlmClient>,
}

impl DurationEstimator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Asks the model for an estimate. Exactly one model call per invocation;
    /// errors from the client propagate unchanged.
    pub async fn estimate_duration(&self, request: EstimationRequest) -> Result<EstimationResult> {
        info!(
            description_len = request.task_description.len(),
            "Requesting duration estimate"
        );

        let llm_request = ChatCompletionRequest::new(vec![ChatMessage::user(render_prompt(
            &request.task_description,
        ))])
        .with_output_schema(estimation_output_schema());

        let response = self.client.create_chat_completion(llm_request).await?;

        match parse_estimate(&response) {
            Ok(result) => {
                info!(
                    duration_estimate = %result.duration_estimate,
                    "Duration estimate received"
                );
                Ok(result)
            }
            Err(e) => {
                warn!("Model response failed validation: {}", e);
                Err(e)
            }
        }
    }
}

fn parse_estimate(response: &ChatCompletionResponse) -> Result<EstimationResult> {
    let content = response
        .first_content()
        .ok_or_else(|| Error::schema_validation("model returned no choices"))?;

    let trimmed = content.trim();
    debug!("Validating {} bytes of model output", trimmed.len());

    // Plain JSON first; fenced output is only a fallback.
    let raw: RawEstimate = match serde_json::from_str(trimmed) {
        Ok(raw) => raw,
        Err(plain_err) => {
            let fenced = extract_json(trimmed);
            if fenced == trimmed {
                return Err(invalid_estimate(plain_err));
            }
            serde_json::from_str(fenced).map_err(invalid_estimate)?
        }
    };

    Ok(EstimationResult {
        duration_estimate: required_field(raw.duration_estimate, "durationEstimate")?,
        reasoning: required_field(raw.reasoning, "reasoning")?,
    })
}

fn invalid_estimate(e: serde_json::Error) -> Error {
    Error::schema_validation(format!("model output is not a valid estimate: {}", e))
}

fn required_field(value: Option<String>, name: &str) -> Result<String> {
    match value {
        None => Err(Error::schema_validation(format!(
            "missing required field `{}`",
            name
        ))),
        Some(v) if v.trim().is_empty() => Err(Error::schema_validation(format!(
            "required field `{}` is empty",
            name
        ))),
        Some(v) => Ok(v),
    }
}

/// Some OpenAI-compatible backends ignore `response_format` and wrap the JSON
/// in a markdown fence.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start_idx) = trimmed.find("```json") {
        let after_fence = &trimmed[start_idx + 7..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    if let Some(start_idx) = trimmed.find("```") {
        let after_fence = &trimmed[start_idx + 3..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    trimmed
}
