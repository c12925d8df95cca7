//! # Horizon auth flow
//!
//! Framework-free core of the Horizon dashboard: the data model, validation
//! schemas, the auth form state machine and its controller, the bank-link
//! prompt state, and the dashboard configuration. The `ui` crate renders these
//! with Dioxus; the `api` crate reuses the models and schemas on the server.

pub mod config;
pub mod controller;
pub mod error;
pub mod link;
pub mod machine;
pub mod models;
pub mod schema;
pub mod service;

#[cfg(test)]
mod memory;

pub use config::DashboardConfig;
pub use controller::{AbortReason, FlowObserver, FormController, SubmitOutcome, TracingObserver};
pub use error::{FailureKind, FlowError, OperationFailure, ServiceError};
pub use link::LinkState;
pub use machine::{FlowState, Header, SubmissionState, View};
pub use models::{
    format_amount, AccountIdentity, BankSummary, Credentials, DashboardSummary, FormMode,
    ProfileDetails, SignUpRequest, UserInfo,
};
pub use schema::{Field, FieldError, FormValues, Schema, ValidatedForm, ValidationErrors};
pub use service::AccountService;

/// Re-exported so callers can hand tokens to [`AccountService`] implementations.
pub use tokio_util::sync::CancellationToken;
