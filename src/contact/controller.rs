//! Contact form submission lifecycle.
//!
//! ```text
//! Idle --submit--> Validating --ok--> Submitting --delivered--> Succeeded --> Idle (fields cleared)
//!                       |                  |
//!                       +--invalid--> Idle +--failed--> Failed(reason) --> Idle (fields kept)
//! ```
//!
//! The event loop drives the two halves separately: [`SubmissionController::submit`]
//! returns a [`PendingDelivery`] for the loop to hand to the delivery
//! collaborator, and [`SubmissionController::complete`] applies the outcome
//! once it arrives. A second submit while one is in flight is refused.

use super::delivery::{self, DeliveryOutcome, MessageDelivery, OutgoingMessage, GENERIC_FAILURE};
use super::fields::{validate, FieldError, FieldId, FormFields};
use thiserror::Error;

pub type AttemptId = u64;

pub const SUCCESS_NOTICE: &str = "Message sent! I'll get back to you soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a message is already being sent")]
    Busy,
    #[error("invalid fields: {}", join_errors(.0))]
    Invalid(Vec<FieldError>),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompleteError {
    #[error("attempt {0} is not in flight")]
    UnknownAttempt(AttemptId),
}

/// A validated message waiting to be handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelivery {
    pub attempt: AttemptId,
    pub message: OutgoingMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Dismissible notification produced by a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

pub type SubmissionObserver = Box<dyn Fn(&SubmissionState) + Send + Sync>;

pub struct SubmissionController {
    state: SubmissionState,
    fields: FormFields,
    errors: Vec<FieldError>,
    in_flight: Option<AttemptId>,
    next_attempt: AttemptId,
    notice: Option<Notice>,
    observers: Vec<SubmissionObserver>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            fields: FormFields::default(),
            errors: Vec::new(),
            in_flight: None,
            next_attempt: 1,
            notice: None,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: SubmissionObserver) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Editable access to a draft field; `None` while a send is in flight.
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut String> {
        if self.is_busy() {
            return None;
        }
        Some(self.fields.get_mut(id))
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, id: FieldId) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Replace the draft with `fields` and submit it.
    pub fn submit(&mut self, fields: FormFields) -> Result<PendingDelivery, SubmitError> {
        if self.is_busy() {
            tracing::debug!("submit ignored while a message is in flight");
            return Err(SubmitError::Busy);
        }
        self.fields = fields;
        self.submit_current()
    }

    /// Submit the controller-owned draft.
    pub fn submit_current(&mut self) -> Result<PendingDelivery, SubmitError> {
        if self.is_busy() {
            tracing::debug!("submit ignored while a message is in flight");
            return Err(SubmitError::Busy);
        }

        self.transition(SubmissionState::Validating);
        let errors = validate(&self.fields);
        if !errors.is_empty() {
            tracing::debug!(failing = errors.len(), "contact form rejected by validation");
            self.errors = errors.clone();
            self.transition(SubmissionState::Idle);
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.notice = None;
        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.in_flight = Some(attempt);
        self.transition(SubmissionState::Submitting);
        tracing::info!(attempt, "contact form submitting");

        Ok(PendingDelivery {
            attempt,
            message: OutgoingMessage {
                name: self.fields.name.clone(),
                email: self.fields.email.clone(),
                message: self.fields.message.clone(),
            },
        })
    }

    /// Apply the outcome of `attempt` and return the terminal state it
    /// passed through before settling back to Idle.
    pub fn complete(
        &mut self,
        attempt: AttemptId,
        outcome: DeliveryOutcome,
    ) -> Result<SubmissionState, CompleteError> {
        if self.in_flight != Some(attempt) {
            tracing::warn!(attempt, "ignoring outcome for an attempt that is not in flight");
            return Err(CompleteError::UnknownAttempt(attempt));
        }
        self.in_flight = None;

        let terminal = match outcome {
            DeliveryOutcome::Delivered => {
                self.transition(SubmissionState::Succeeded);
                self.fields = FormFields::default();
                self.errors.clear();
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    text: SUCCESS_NOTICE.to_string(),
                });
                SubmissionState::Succeeded
            }
            DeliveryOutcome::Failed { reason } => {
                let reason = reason.unwrap_or_else(|| GENERIC_FAILURE.to_string());
                let failed = SubmissionState::Failed(reason.clone());
                self.transition(failed.clone());
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    text: reason,
                });
                failed
            }
        };
        self.transition(SubmissionState::Idle);
        Ok(terminal)
    }

    /// Submit and deliver inline; the collaborator is called at most once.
    pub async fn submit_with(
        &mut self,
        fields: FormFields,
        delivery: &dyn MessageDelivery,
    ) -> Result<SubmissionState, SubmitError> {
        let pending = self.submit(fields)?;
        let outcome = delivery::deliver(delivery, &pending.message).await;
        // The attempt was created just above, so it is the one in flight.
        Ok(self
            .complete(pending.attempt, outcome)
            .unwrap_or_else(|_| self.state.clone()))
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::trace!(from = ?self.state, to = ?next, "submission transition");
        self.state = next;
        for observer in &self.observers {
            observer(&self.state);
        }
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}
