//! # Form controller
//!
//! [`FormController`] owns one auth form instance: its [`FormMode`], the schema
//! for that mode, the [`FlowState`] and the [`SubmissionState`]. A submission
//! goes through four steps:
//!
//! 1. The state machine must accept a new submission (`Anonymous` only) and the
//!    schema must accept the values. Otherwise no account operation runs.
//! 2. State becomes `Submitting` and a fresh [`CancellationToken`] is armed.
//! 3. The account operation runs, raced against the token.
//! 4. The resolution is applied to the state machine. A drop guard then clears
//!    the token and returns the submission state to `Idle`, whether the
//!    operation succeeded, failed, or the future itself was dropped.
//!
//! Everything the outside world needs to react to (state changes, navigation,
//! failures) goes through a [`FlowObserver`], so the controller has no
//! dependency on any UI framework.

use std::cell::{Cell, RefCell};
use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::config::DashboardConfig;
use crate::error::{FlowError, OperationFailure, ServiceError};
use crate::machine::{self, FlowState, Header, Resolution, SubmissionState, View};
use crate::models::{AccountIdentity, FormMode};
use crate::schema::{FieldError, Field, FormValues, Schema, ValidatedForm};
use crate::service::AccountService;

/// Receives everything a rendering layer has to react to.
pub trait FlowObserver {
    fn state_changed(&self, _state: &FlowState) {}
    fn submission_changed(&self, _submission: SubmissionState) {}
    /// Called exactly once, after a successful sign-in.
    fn navigate(&self, _route: &str) {}
    /// Diagnostic hook for failed submissions.
    fn failure(&self, _failure: &OperationFailure) {}
}

/// Observer that only writes failures to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl FlowObserver for TracingObserver {
    fn failure(&self, failure: &OperationFailure) {
        tracing::warn!(kind = ?failure.kind, "submission failed: {}", failure.message);
    }
}

/// Who pulled the plug on an in-flight submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    User,
    Timeout,
}

/// How an accepted submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Navigated { route: String },
    LinkPrompt(AccountIdentity),
    Failed(OperationFailure),
}

pub struct FormController<S, O = TracingObserver> {
    mode: FormMode,
    schema: Schema,
    home: String,
    service: S,
    observer: O,
    state: RefCell<FlowState>,
    submission: Cell<SubmissionState>,
    cancel: RefCell<Option<CancellationToken>>,
    abort_reason: Cell<Option<AbortReason>>,
}

impl<S: AccountService> FormController<S, TracingObserver> {
    pub fn new(mode: FormMode, service: S, config: &DashboardConfig) -> Self {
        Self::with_observer(mode, service, TracingObserver, config)
    }
}

impl<S: AccountService, O: FlowObserver> FormController<S, O> {
    pub fn with_observer(mode: FormMode, service: S, observer: O, config: &DashboardConfig) -> Self {
        Self {
            mode,
            schema: Schema::for_mode(mode),
            home: config.routes.home.clone(),
            service,
            observer,
            state: RefCell::new(FlowState::default()),
            submission: Cell::new(SubmissionState::Idle),
            cancel: RefCell::new(None),
            abort_reason: Cell::new(None),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fields to render, in order.
    pub fn fields(&self) -> Vec<Field> {
        self.schema.fields().collect()
    }

    pub fn state(&self) -> FlowState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> View {
        self.state.borrow().view()
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission.get()
    }

    pub fn header(&self) -> Header {
        machine::header(self.mode, &self.state.borrow())
    }

    pub fn submit_label(&self) -> &'static str {
        machine::submit_label(self.mode, self.submission.get())
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(*self.state.borrow(), FlowState::Anonymous { .. }) && !self.submission.get().is_busy()
    }

    /// Validate one field without submitting.
    pub fn check_field(&self, field: Field, values: &FormValues) -> Option<FieldError> {
        self.schema.validate_field(field, values)
    }

    /// Validate and, when the values pass, run the account operation for this mode.
    pub async fn submit(&self, values: &FormValues) -> Result<SubmitOutcome, FlowError> {
        let next = self.state.borrow().begin()?;
        let form = self.schema.validate(values).map_err(|errors| {
            tracing::debug!(mode = %self.mode, invalid = errors.len(), "submission rejected by schema");
            FlowError::Validation(errors)
        })?;

        let cancel = CancellationToken::new();
        self.cancel.replace(Some(cancel.clone()));
        self.abort_reason.set(None);
        self.set_state(next);
        self.set_submission(SubmissionState::Submitting);
        let _reset = ResetOnDrop { controller: self };

        tracing::info!(mode = %self.mode, "submitting");
        let resolution = self.run(form, &cancel).await;

        let outcome = match &resolution {
            Resolution::SignedIn { route } => SubmitOutcome::Navigated {
                route: route.clone(),
            },
            Resolution::Registered(identity) => SubmitOutcome::LinkPrompt(identity.clone()),
            Resolution::Failed(failure) => SubmitOutcome::Failed(failure.clone()),
        };

        match &outcome {
            SubmitOutcome::Failed(failure) => {
                self.set_submission(SubmissionState::Failed);
                self.observer.failure(failure);
            }
            _ => self.set_submission(SubmissionState::Succeeded),
        }
        let next = self.state.borrow().resolve(resolution);
        self.set_state(next);

        if let SubmitOutcome::Navigated { route } = &outcome {
            tracing::info!(%route, "signed in");
            self.observer.navigate(route);
        }
        Ok(outcome)
    }

    /// Abort the in-flight submission. Returns `false` when nothing is in flight.
    pub fn abort(&self, reason: AbortReason) -> bool {
        let cancel = self.cancel.borrow();
        match cancel.as_ref() {
            Some(token) if !token.is_cancelled() => {
                tracing::info!(?reason, mode = %self.mode, "aborting submission");
                self.abort_reason.set(Some(reason));
                token.cancel();
                true
            }
            _ => false,
        }
    }

    async fn run(&self, form: ValidatedForm, cancel: &CancellationToken) -> Resolution {
        let result = match &form {
            ValidatedForm::SignIn(credentials) => self
                .guarded(cancel, self.service.authenticate(credentials, cancel))
                .await
                .and_then(|session| match session {
                    Some(user) => {
                        tracing::debug!(user = %user.id, "session established");
                        Ok(Resolution::SignedIn {
                            route: self.home.clone(),
                        })
                    }
                    None => Err(ServiceError::rejected("Invalid email or password").into()),
                }),
            ValidatedForm::SignUp(request) => self
                .guarded(cancel, self.service.register(request, cancel))
                .await
                .map(Resolution::Registered),
        };
        result.unwrap_or_else(Resolution::Failed)
    }

    async fn guarded<T>(
        &self,
        cancel: &CancellationToken,
        call: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, OperationFailure> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(self.abort_failure()),
            result = call => result.map_err(OperationFailure::from),
        }
    }

    fn abort_failure(&self) -> OperationFailure {
        match self.abort_reason.get() {
            Some(AbortReason::Timeout) => OperationFailure::timed_out(),
            _ => OperationFailure::cancelled(),
        }
    }

    fn set_state(&self, next: FlowState) {
        self.state.replace(next.clone());
        self.observer.state_changed(&next);
    }

    fn set_submission(&self, submission: SubmissionState) {
        self.submission.set(submission);
        self.observer.submission_changed(submission);
    }
}

/// Returns the controller to idle when a submission ends, however it ends.
struct ResetOnDrop<'a, S: AccountService, O: FlowObserver> {
    controller: &'a FormController<S, O>,
}

impl<S: AccountService, O: FlowObserver> Drop for ResetOnDrop<'_, S, O> {
    fn drop(&mut self) {
        let c = self.controller;
        c.cancel.replace(None);
        let interrupted = c.state.borrow().is_submitting();
        if interrupted {
            c.set_state(FlowState::Anonymous {
                failure: Some(OperationFailure::cancelled()),
            });
        }
        c.set_submission(SubmissionState::Idle);
    }
}
