use housebuild_estimator::{
    Result,
    config::{Config, EstimationConfig, LlmConfig, LogsConfig, ServerConfig},
    project::{ItemStatus, Phase, Project, Step, Task},
};
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
                json: false,
            },
        },
        llm: LlmConfig {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            max_tokens: None,
        },
        estimation: EstimationConfig { timeout_secs: 5 },
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// A small project: one phase, one task with two steps
pub fn create_test_project() -> Project {
    Project {
        id: "proj-1".to_string(),
        name: "Dream House Construction".to_string(),
        phases: vec![Phase {
            id: "phase-4".to_string(),
            name: "Interior Finishing".to_string(),
            order: 4,
            tasks: vec![Task {
                id: "task-4-1".to_string(),
                name: "Kitchen Installation".to_string(),
                status: ItemStatus::Pending,
                order: 1,
                steps: vec![
                    Step {
                        id: "task-4-1-step-1".to_string(),
                        name: "Install cabinets".to_string(),
                        order: 1,
                        ..Default::default()
                    },
                    Step {
                        id: "task-4-1-step-2".to_string(),
                        name: "Fit countertops".to_string(),
                        order: 2,
                        depends_on_step_id: Some("task-4-1-step-1".to_string()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"
    json: false

llm:
  provider: "openai"
  base_url: "http://localhost:1234/v1"
  api_key: "test-api-key"
  model: "gpt-4o-mini"
  temperature: 0.3

estimation:
  timeout_secs: 15
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

llm:
  provider: "openai"
"#;
