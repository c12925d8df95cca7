use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::error::ServiceError;
use crate::models::{AccountIdentity, Credentials, SignUpRequest, UserInfo};
use crate::service::AccountService;

#[derive(Clone, Debug)]
struct Account {
    password: String,
    user: UserInfo,
}

/// In-memory AccountService for the controller tests. Passwords are kept as given.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccounts {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> ServiceError {
    ServiceError::unavailable("account store is unavailable")
}

impl AccountService for MemoryAccounts {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<Option<UserInfo>, ServiceError> {
        if cancel.is_cancelled() {
            return Err(ServiceError::new(crate::FailureKind::Cancelled, "cancelled"));
        }
        let accounts = self.accounts.lock().map_err(poisoned)?;
        Ok(accounts
            .get(&credentials.email.to_lowercase())
            .filter(|a| a.password == credentials.password)
            .map(|a| a.user.clone()))
    }

    async fn register(
        &self,
        request: &SignUpRequest,
        cancel: &CancellationToken,
    ) -> Result<AccountIdentity, ServiceError> {
        if cancel.is_cancelled() {
            return Err(ServiceError::new(crate::FailureKind::Cancelled, "cancelled"));
        }
        let email = request.credentials.email.to_lowercase();
        let mut accounts = self.accounts.lock().map_err(poisoned)?;
        if accounts.contains_key(&email) {
            return Err(ServiceError::conflict("An account with this email already exists"));
        }
        let user = UserInfo {
            id: format!("user-{}", accounts.len() + 1),
            email: email.clone(),
            first_name: Some(request.profile.first_name.clone()),
            last_name: Some(request.profile.last_name.clone()),
        };
        accounts.insert(
            email,
            Account {
                password: request.credentials.password.clone(),
                user: user.clone(),
            },
        );
        Ok(AccountIdentity::new(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::ProfileDetails;

    fn request(email: &str) -> SignUpRequest {
        SignUpRequest {
            credentials: Credentials {
                email: email.to_string(),
                password: "password1".to_string(),
            },
            profile: ProfileDetails {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                address: "1 Main St".to_string(),
                city: "London".to_string(),
                state: "NY".to_string(),
                postal_code: "11101".to_string(),
                date_of_birth: "1815-12-10".to_string(),
                national_id: "1234".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let accounts = MemoryAccounts::new();
        let cancel = CancellationToken::new();
        assert!(accounts.is_empty());

        let identity = accounts.register(&request("ada@example.com"), &cancel).await.unwrap();
        assert_eq!(identity.id(), "user-1");
        assert_eq!(accounts.len(), 1);

        let good = Credentials {
            email: "Ada@Example.com".to_string(),
            password: "password1".to_string(),
        };
        let user = accounts.authenticate(&good, &cancel).await.unwrap();
        assert_eq!(user, Some(identity.user));

        let bad = Credentials {
            password: "nope".to_string(),
            ..good
        };
        assert_eq!(accounts.authenticate(&bad, &cancel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let accounts = MemoryAccounts::new();
        let cancel = CancellationToken::new();
        accounts.register(&request("ada@example.com"), &cancel).await.unwrap();

        let err = accounts.register(&request("ada@example.com"), &cancel).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Conflict);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let accounts = MemoryAccounts::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = accounts.register(&request("ada@example.com"), &cancel).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Cancelled);
        assert!(accounts.is_empty());
    }
}
