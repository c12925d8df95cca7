//! [`AccountService`] backed by the fullstack server functions.

use api::{RejectionKind, SignUpResponse};
use dioxus::prelude::ServerFnError;
use flow::{
    AccountIdentity, AccountService, CancellationToken, Credentials, ServiceError, SignUpRequest,
    UserInfo,
};

/// Calls `api::sign_in` / `api::sign_up`.
///
/// Cancellation is handled by the caller dropping the in-flight request, so the
/// token is not consulted here.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerAccounts;

impl AccountService for ServerAccounts {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        _cancel: &CancellationToken,
    ) -> Result<Option<UserInfo>, ServiceError> {
        api::sign_in(credentials.email.clone(), credentials.password.clone())
            .await
            .map_err(unavailable)
    }

    async fn register(
        &self,
        request: &SignUpRequest,
        _cancel: &CancellationToken,
    ) -> Result<AccountIdentity, ServiceError> {
        match api::sign_up(request.clone()).await.map_err(unavailable)? {
            SignUpResponse::Created(user) => Ok(AccountIdentity::new(user)),
            SignUpResponse::Rejected { kind, message } => Err(rejection(kind, message)),
        }
    }
}

fn rejection(kind: RejectionKind, message: String) -> ServiceError {
    match kind {
        RejectionKind::DuplicateAccount => ServiceError::conflict(message),
        RejectionKind::InvalidInput => ServiceError::rejected(message),
    }
}

fn unavailable(e: ServerFnError) -> ServiceError {
    ServiceError::unavailable(e.to_string())
}
