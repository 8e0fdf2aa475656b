use super::{DurationEstimator, EstimationRequest, EstimationResult};
use crate::{Error, Result, project::EstimateTarget};
use tracing::{debug, error, info, warn};

pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please provide a description for the item.";
pub const ESTIMATE_FAILED_MESSAGE: &str = "Failed to get an estimate. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorState {
    Idle,
    Requesting,
    Suggested,
    Failed,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorEvent {
    Submit,
    EstimateReceived,
    EstimateFailed,
    Accept,
    Reset,
}

/// One round of "describe the item, get a suggestion, accept it" for a task
/// or step.
#[derive(Debug, Clone)]
pub struct EstimatorSession {
    state: EstimatorState,
    item_name: String,
    initial_description: String,
    description: String,
    suggestion: Option<EstimationResult>,
    last_error: Option<String>,
}

impl EstimatorSession {
    pub fn new(item_name: impl Into<String>, initial_description: impl Into<String>) -> Self {
        let initial_description = initial_description.into();
        Self {
            state: EstimatorState::Idle,
            item_name: item_name.into(),
            description: initial_description.clone(),
            initial_description,
            suggestion: None,
            last_error: None,
        }
    }

    pub fn current_state(&self) -> EstimatorState {
        self.state
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn suggestion(&self) -> Option<&EstimationResult> {
        self.suggestion.as_ref()
    }

    /// User-facing message for the last failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn transition(&mut self, event: EstimatorEvent) -> Result<()> {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (_, EstimatorEvent::Reset) => EstimatorState::Idle,
            // A request left in flight by a cancelled submit is superseded.
            (
                EstimatorState::Idle
                | EstimatorState::Requesting
                | EstimatorState::Suggested
                | EstimatorState::Failed,
                EstimatorEvent::Submit,
            ) => EstimatorState::Requesting,
            (EstimatorState::Requesting, EstimatorEvent::EstimateReceived) => {
                EstimatorState::Suggested
            }
            (EstimatorState::Requesting, EstimatorEvent::EstimateFailed) => EstimatorState::Failed,
            (EstimatorState::Suggested, EstimatorEvent::Accept) => EstimatorState::Accepted,
            _ => {
                warn!(
                    "Invalid estimator transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::fsm(format!(
                    "Invalid transition from {:?} with event {:?}",
                    old_state, event
                )));
            }
        };

        debug!(
            "Estimator transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }

    /// Requests an estimate for the current description.
    ///
    /// A blank description is rejected before any model call and leaves the
    /// state unchanged. On failure the session moves to `Failed`, keeps a
    /// retry-friendly message and returns the underlying error.
    pub async fn submit(&mut self, estimator: &DurationEstimator) -> Result<&EstimationResult> {
        if self.description.trim().is_empty() {
            self.last_error = Some(EMPTY_DESCRIPTION_MESSAGE.to_string());
            return Err(Error::invalid_input("task description must not be empty"));
        }

        self.transition(EstimatorEvent::Submit)?;
        self.last_error = None;
        self.suggestion = None;

        let request = EstimationRequest::new(self.description.clone());
        match estimator.estimate_duration(request).await {
            Ok(result) => {
                self.transition(EstimatorEvent::EstimateReceived)?;
                Ok(self.suggestion.insert(result))
            }
            Err(e) => {
                error!("Error estimating duration for '{}': {}", self.item_name, e);
                self.transition(EstimatorEvent::EstimateFailed)?;
                self.last_error = Some(ESTIMATE_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Writes the pending suggestion onto `target` and returns the
    /// confirmation message.
    pub fn accept<T: EstimateTarget + ?Sized>(&mut self, target: &mut T) -> Result<String> {
        if self.state != EstimatorState::Suggested {
            return Err(Error::fsm(format!(
                "No suggestion to accept in state {:?}",
                self.state
            )));
        }
        let suggestion = self
            .suggestion
            .clone()
            .ok_or_else(|| Error::internal("suggested state without a suggestion"))?;

        self.transition(EstimatorEvent::Accept)?;
        target.apply_estimate(&suggestion);

        info!(
            "Applied AI duration estimate '{}' to '{}'",
            suggestion.duration_estimate,
            target.name()
        );
        Ok(format!(
            "AI's duration estimate for \"{}\" has been applied.",
            self.item_name
        ))
    }

    /// Back to a fresh dialog with the initial description.
    pub fn reset(&mut self) {
        // Reset is valid from every state.
        let _ = self.transition(EstimatorEvent::Reset);
        self.description = self.initial_description.clone();
        self.suggestion = None;
        self.last_error = None;
    }
}
