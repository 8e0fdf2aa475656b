use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub task_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Magnitude plus unit as the model phrased it, e.g. "3 days".
    pub duration_estimate: String,
    pub reasoning: String,
}

impl EstimationRequest {
    pub fn new(task_description: impl Into<String>) -> Self {
        Self {
            task_description: task_description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case() {
        let request: EstimationRequest =
            serde_json::from_value(json!({"taskDescription": "Pour footings"})).unwrap();
        assert_eq!(request, EstimationRequest::new("Pour footings"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = EstimationResult {
            duration_estimate: "2 weeks".to_string(),
            reasoning: "Curing time".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"durationEstimate": "2 weeks", "reasoning": "Curing time"})
        );
    }
}
