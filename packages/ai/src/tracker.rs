//! Per-request loading / result / error state.
//!
//! Requests about different subjects are independent of each other; a
//! subject that is already pending cannot be submitted again until it
//! completes.

use std::collections::HashMap;

use thiserror::Error;

use crate::{InsightError, InsightSubject};

/// State of the most recent request for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    /// Never requested.
    Idle,
    /// In flight.
    Pending,
    /// Completed with generated text.
    Succeeded(String),
    /// Completed with a user-facing error message.
    Failed(String),
}

/// Returned by [`RequestTracker::begin`] for a subject already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("A request for {0} is already in progress")]
pub struct AlreadyPending(pub InsightSubject);

/// Request state keyed by [`InsightSubject`].
#[derive(Debug, Default)]
pub struct RequestTracker {
    states: HashMap<InsightSubject, RequestState>,
}

const IDLE: RequestState = RequestState::Idle;

impl RequestTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `subject` as pending, clearing its previous result.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyPending`] if `subject` is already in flight.
    pub fn begin(&mut self, subject: InsightSubject) -> Result<(), AlreadyPending> {
        if self.is_pending(&subject) {
            return Err(AlreadyPending(subject));
        }
        self.states.insert(subject, RequestState::Pending);
        Ok(())
    }

    /// Records the outcome of a request for `subject`.
    pub fn complete(&mut self, subject: InsightSubject, result: Result<String, InsightError>) {
        if !self.is_pending(&subject) {
            log::warn!("Completing {subject} which was not pending");
        }
        let state = match result {
            Ok(text) => RequestState::Succeeded(text),
            Err(e) => RequestState::Failed(e.to_string()),
        };
        self.states.insert(subject, state);
    }

    /// Current state for `subject`; [`RequestState::Idle`] if never seen.
    #[must_use]
    pub fn state(&self, subject: &InsightSubject) -> &RequestState {
        self.states.get(subject).unwrap_or(&IDLE)
    }

    /// Whether `subject` is in flight.
    #[must_use]
    pub fn is_pending(&self, subject: &InsightSubject) -> bool {
        matches!(self.state(subject), RequestState::Pending)
    }

    /// Every subject currently in flight.
    pub fn pending(&self) -> impl Iterator<Item = &InsightSubject> {
        self.states
            .iter()
            .filter(|(_, s)| matches!(s, RequestState::Pending))
            .map(|(k, _)| k)
    }
}
