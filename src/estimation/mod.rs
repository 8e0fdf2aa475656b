//! AI-assisted duration estimates for house-building tasks and steps.
//!
//! [`DurationEstimator`] is the single-call service: it renders the fixed
//! prompt, asks the injected [`LlmClient`](crate::llm::LlmClient) for a
//! structured answer and validates it. [`EstimatorSession`] is the interactive
//! workflow around it (submit, review, accept).

mod prompt;
mod service;
pub mod session;
mod types;

pub use prompt::{PROMPT_TEMPLATE, render_prompt};
pub use service::{DurationEstimator, estimation_output_schema};
pub use session::{EstimatorEvent, EstimatorSession, EstimatorState};
pub use types::{EstimationRequest, EstimationResult};
