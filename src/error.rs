use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model invocation error: {0}")]
    ModelInvocation(String),

    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("FSM error: {0}")]
    Fsm(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Config(s) => Self::Config(s.clone()),
            Self::ModelInvocation(s) => Self::ModelInvocation(s.clone()),
            Self::SchemaValidation(s) => Self::SchemaValidation(s.clone()),
            Self::InvalidInput(s) => Self::InvalidInput(s.clone()),
            Self::Fsm(s) => Self::Fsm(s.clone()),
            Self::NotFound { kind, id } => Self::NotFound {
                kind: *kind,
                id: id.clone(),
            },
            Self::Internal(s) => Self::Internal(s.clone()),
            // For errors that can't be cloned, convert to string representation
            Self::Serialization(e) => Self::Internal(format!("Serialization error: {}", e)),
            Self::Yaml(e) => Self::Internal(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Internal(format!("IO error: {}", e)),
            Self::AddrParse(e) => Self::Internal(format!("Address parse error: {}", e)),
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn model_invocation(msg: impl Into<String>) -> Self {
        Self::ModelInvocation(msg.into())
    }

    pub fn schema_validation(msg: impl Into<String>) -> Self {
        Self::SchemaValidation(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn fsm(msg: impl Into<String>) -> Self {
        Self::Fsm(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable tag for the error variant, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::ModelInvocation(_) => "model_invocation",
            Self::SchemaValidation(_) => "schema_validation",
            Self::InvalidInput(_) => "invalid_input",
            Self::Fsm(_) => "fsm",
            Self::NotFound { .. } => "not_found",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
            Self::Io(_) => "io",
            Self::AddrParse(_) => "addr_parse",
            Self::Internal(_) => "internal",
        }
    }
}
