//! # The account service seam
//!
//! [`AccountService`] is the boundary between the form flow and whatever
//! actually authenticates users and creates accounts. The web client plugs in
//! an implementation backed by Dioxus server functions; the controller tests
//! use an in-memory one.
//!
//! Both operations receive the submission's [`CancellationToken`]. The
//! controller also races the call against the token, so an implementation that
//! ignores it still cannot hold the form hostage.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;
use crate::models::{AccountIdentity, Credentials, SignUpRequest, UserInfo};

pub trait AccountService {
    /// Sign in. `Ok(None)` is a falsy session result and counts as a failure.
    fn authenticate(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Option<UserInfo>, ServiceError>>;

    /// Create an account and return its identity.
    fn register(
        &self,
        request: &SignUpRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<AccountIdentity, ServiceError>>;
}

impl<S: AccountService> AccountService for std::rc::Rc<S> {
    fn authenticate(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Option<UserInfo>, ServiceError>> {
        (**self).authenticate(credentials, cancel)
    }

    fn register(
        &self,
        request: &SignUpRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<AccountIdentity, ServiceError>> {
        (**self).register(request, cancel)
    }
}
