//! # Auth form state machine
//!
//! ```text
//! Anonymous --submit(valid)-----------------> Submitting
//! Submitting --sign-in success--------------> Navigated   (terminal, leaves the page)
//! Submitting --sign-up success(identity)----> LinkPrompt  (terminal for the form)
//! Submitting --failure / abort--------------> Anonymous { failure }
//! ```
//!
//! Which view renders is read straight off the variant: there is no nullable
//! "user" field to infer it from, and nothing leads out of `LinkPrompt`.

use crate::error::{FlowError, OperationFailure};
use crate::models::{AccountIdentity, FormMode};

/// Where the auth form is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// The form is shown. `failure` carries the last failed attempt, if any.
    Anonymous { failure: Option<OperationFailure> },
    /// An account operation is in flight.
    Submitting,
    /// Sign-up succeeded; the bank-link prompt replaces the form.
    LinkPrompt { identity: AccountIdentity },
    /// Sign-in succeeded and the client navigated to `route`.
    Navigated { route: String },
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Anonymous { failure: None }
    }
}

/// The two mutually exclusive views of the auth component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Form,
    LinkPrompt,
}

/// How a submission ended, fed back into the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    SignedIn { route: String },
    Registered(AccountIdentity),
    Failed(OperationFailure),
}

impl FlowState {
    pub fn view(&self) -> View {
        match self {
            FlowState::LinkPrompt { .. } => View::LinkPrompt,
            _ => View::Form,
        }
    }

    pub fn identity(&self) -> Option<&AccountIdentity> {
        match self {
            FlowState::LinkPrompt { identity } => Some(identity),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&OperationFailure> {
        match self {
            FlowState::Anonymous { failure } => failure.as_ref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FlowState::Submitting)
    }

    /// No further submissions are accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::LinkPrompt { .. } | FlowState::Navigated { .. })
    }

    pub(crate) fn begin(&self) -> Result<FlowState, FlowError> {
        match self {
            FlowState::Anonymous { .. } => Ok(FlowState::Submitting),
            FlowState::Submitting => Err(FlowError::Busy),
            FlowState::LinkPrompt { .. } | FlowState::Navigated { .. } => Err(FlowError::Closed),
        }
    }

    /// Apply a resolution. Only a submitting form moves; anything else is stale.
    pub(crate) fn resolve(&self, resolution: Resolution) -> FlowState {
        if !self.is_submitting() {
            tracing::debug!(state = ?self, "ignoring stale resolution");
            return self.clone();
        }
        match resolution {
            Resolution::SignedIn { route } => FlowState::Navigated { route },
            Resolution::Registered(identity) => FlowState::LinkPrompt { identity },
            Resolution::Failed(failure) => FlowState::Anonymous {
                failure: Some(failure),
            },
        }
    }
}

/// Whether a submission is in flight, and how the last one ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Failed,
    Succeeded,
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// Title and subtitle above the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub fn header(mode: FormMode, state: &FlowState) -> Header {
    match (state.view(), mode) {
        (View::LinkPrompt, _) => Header {
            title: "Link Account",
            subtitle: "Link your account to get started",
        },
        (View::Form, FormMode::SignIn) => Header {
            title: "Sign in",
            subtitle: "Please enter your details",
        },
        (View::Form, FormMode::SignUp) => Header {
            title: "Sign up",
            subtitle: "Please enter your details",
        },
    }
}

pub fn submit_label(mode: FormMode, submission: SubmissionState) -> &'static str {
    match (submission, mode) {
        (SubmissionState::Submitting, _) => "Loading...",
        (_, FormMode::SignIn) => "Sign in",
        (_, FormMode::SignUp) => "Sign up",
    }
}

/// Prompt and link text of the footer that switches modes.
pub fn footer(mode: FormMode) -> (&'static str, &'static str) {
    match mode {
        FormMode::SignIn => ("Don't have an account?", "Sign up"),
        FormMode::SignUp => ("Already have an account?", "Sign in"),
    }
}
