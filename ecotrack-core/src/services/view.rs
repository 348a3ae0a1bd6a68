//! View state shared by every page controller
//!
//! Each controller owns one or more `View`s. A view moves
//! `Idle -> Pending -> Success | Failed` per submission and goes back to
//! `Idle` on new input or when its request is cancelled.

use std::future::Future;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::result::{Error, Result};

/// What the front end renders for a view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Pending,
    Success(T),
    /// User-facing message, verbatim
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Request lifecycle for one form or list on a page
#[derive(Debug)]
pub struct View<T> {
    name: &'static str,
    state: ViewState<T>,
    cancel: CancellationToken,
}

impl<T> View<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: ViewState::Idle,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ViewState::Pending)
    }

    /// Value of the last successful submission
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            ViewState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            ViewState::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Failure message currently shown, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// New input discards the previous outcome
    pub fn reset(&mut self) {
        self.state = ViewState::Idle;
    }

    /// Token that abandons the in-flight request when cancelled
    /// (navigation away, caller deadline)
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Record a failure and hand the error back to the caller
    pub(crate) fn fail(&mut self, error: Error) -> Error {
        warn!(view = self.name, error = %error, "view failed");
        self.state = ViewState::Failed(error.to_string());
        error
    }

    /// Settle a pending submission with its value
    pub(crate) fn succeed(&mut self, value: T) {
        debug!(view = self.name, "view succeeded");
        self.state = ViewState::Success(value);
    }

    /// Put the view in `Pending` and wait for `request`.
    ///
    /// A failure settles the view as `Failed`. Success leaves it `Pending` so
    /// the controller can turn the payload into the view value and `succeed`.
    pub(crate) async fn run<R, F>(&mut self, request: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        self.state = ViewState::Pending;
        let token = self.cancel.clone();

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            result = request => result,
        };

        match outcome {
            Ok(value) => Ok(value),
            Err(Error::Cancelled) => {
                debug!(view = self.name, "request cancelled");
                self.state = ViewState::Idle;
                self.cancel = CancellationToken::new();
                Err(Error::Cancelled)
            }
            Err(e) => Err(self.fail(e)),
        }
    }
}

/// Every field must hold something other than whitespace
pub(crate) fn require_fields(fields: &[&str], message: &str) -> Result<()> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(Error::validation(message));
    }
    Ok(())
}
