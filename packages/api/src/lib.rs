//! # API crate — shared fullstack server functions for Horizon
//!
//! Defines every Dioxus server function the web frontend calls, along with the
//! server-only modules behind them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Session helpers, Argon2 password hashing, the in-process account directory |
//! | [`error`] | `server` | [`error::ApiError`] and its conversion to `ServerFnError` |
//! | [`link`] | `server` | Plaid client: link tokens, public token exchange, account balances |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `sign_in`, `sign_up`, `logout`
//! - **Bank linking**: `create_link_token`, `exchange_public_token`
//! - **Dashboard**: `get_dashboard`

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

pub mod auth;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod link;

pub use flow::{AccountIdentity, BankSummary, DashboardSummary, SignUpRequest, UserInfo};

/// Why the server refused to create an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RejectionKind {
    DuplicateAccount,
    InvalidInput,
}

/// Result of a sign-up attempt that reached the server.
///
/// Refusals travel as a value so the client can tell a duplicate account
/// (unrecoverable) apart from a transport failure (retry).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SignUpResponse {
    Created(UserInfo),
    Rejected { kind: RejectionKind, message: String },
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let Some(user_id) = auth::current_user_id(&session)
        .await
        .map_err(error::server_error)?
    else {
        return Ok(None);
    };
    Ok(auth::directory().find(&user_id).await)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password. `None` means the credentials were rejected.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<Option<UserInfo>, ServerFnError> {
    let credentials = flow::Credentials { email, password };
    let user = auth::directory()
        .verify(&credentials)
        .await
        .map_err(error::server_error)?;

    let Some(user) = user else {
        tracing::debug!("sign-in rejected");
        return Ok(None);
    };

    auth::start_session(&session, &user.id)
        .await
        .map_err(error::server_error)?;
    tracing::info!(user = %user.id, "signed in");
    Ok(Some(user))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(email: String, password: String) -> Result<Option<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/sign-up", session: tower_sessions::Session)]
pub async fn sign_up(request: SignUpRequest) -> Result<SignUpResponse, ServerFnError> {
    let response = sign_up_response(auth::directory().create(&request).await)
        .map_err(error::server_error)?;

    if let SignUpResponse::Created(user) = &response {
        auth::start_session(&session, &user.id)
            .await
            .map_err(error::server_error)?;
    }
    Ok(response)
}

/// Turn refusals the client must see into [`SignUpResponse::Rejected`].
/// Anything else stays an error for the server-function boundary.
#[cfg(feature = "server")]
fn sign_up_response(
    created: Result<UserInfo, error::ApiError>,
) -> Result<SignUpResponse, error::ApiError> {
    use error::ApiError;

    match created {
        Ok(user) => Ok(SignUpResponse::Created(user)),
        Err(ApiError::DuplicateAccount) => Ok(SignUpResponse::Rejected {
            kind: RejectionKind::DuplicateAccount,
            message: ApiError::DuplicateAccount.to_string(),
        }),
        Err(ApiError::InvalidInput(message)) => Ok(SignUpResponse::Rejected {
            kind: RejectionKind::InvalidInput,
            message,
        }),
        Err(e) => Err(e),
    }
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-up")]
pub async fn sign_up(request: SignUpRequest) -> Result<SignUpResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Create a Plaid link token for the signed-in user.
#[cfg(feature = "server")]
#[post("/api/link/token", session: tower_sessions::Session)]
pub async fn create_link_token() -> Result<String, ServerFnError> {
    let user_id = auth::require_user_id(&session)
        .await
        .map_err(error::server_error)?;
    let client = link::PlaidClient::new().map_err(error::server_error)?;
    client
        .create_link_token(&user_id)
        .await
        .map_err(error::server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/link/token")]
pub async fn create_link_token() -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Exchange the public token from Plaid Link and attach the accounts it grants.
#[cfg(feature = "server")]
#[post("/api/link/exchange", session: tower_sessions::Session)]
pub async fn exchange_public_token(public_token: String) -> Result<Vec<BankSummary>, ServerFnError> {
    let user_id = auth::require_user_id(&session)
        .await
        .map_err(error::server_error)?;
    let client = link::PlaidClient::new().map_err(error::server_error)?;
    let banks = client
        .link_accounts(&public_token)
        .await
        .map_err(error::server_error)?;
    auth::directory()
        .link_banks(&user_id, banks)
        .await
        .map_err(error::server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/link/exchange")]
pub async fn exchange_public_token(public_token: String) -> Result<Vec<BankSummary>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Everything the home dashboard shows. `None` for anonymous visitors.
#[cfg(feature = "server")]
#[get("/api/dashboard", session: tower_sessions::Session)]
pub async fn get_dashboard() -> Result<Option<DashboardSummary>, ServerFnError> {
    let Some(user_id) = auth::current_user_id(&session)
        .await
        .map_err(error::server_error)?
    else {
        return Ok(None);
    };
    let directory = auth::directory();
    let Some(user) = directory.find(&user_id).await else {
        return Ok(None);
    };
    let banks = directory.banks(&user_id).await;
    Ok(Some(DashboardSummary { user, banks }))
}

#[cfg(not(feature = "server"))]
#[get("/api/dashboard")]
pub async fn get_dashboard() -> Result<Option<DashboardSummary>, ServerFnError> {
    Ok(None)
}
