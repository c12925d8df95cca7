//! # Account directory
//!
//! Process-wide store of registered accounts, standing in for the external
//! identity backend. Sign-up details are re-validated with the same
//! [`flow::Schema`] the browser uses, passwords are kept only as Argon2 hashes,
//! and each account carries the banks linked to it.
//!
//! [`directory`] returns the lazily created process-wide instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use flow::{BankSummary, Credentials, FormMode, FormValues, Schema, SignUpRequest, UserInfo};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::error::ApiError;

#[derive(Debug, Clone)]
struct StoredAccount {
    user: UserInfo,
    password_hash: String,
    banks: Vec<BankSummary>,
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<String, StoredAccount>,
    /// Lowercased email → account id.
    by_email: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: RwLock<Accounts>,
}

static DIRECTORY: OnceLock<AccountDirectory> = OnceLock::new();

/// Get or initialize the shared account directory.
pub fn directory() -> &'static AccountDirectory {
    DIRECTORY.get_or_init(AccountDirectory::default)
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account from a sign-up request.
    pub async fn create(&self, request: &SignUpRequest) -> Result<UserInfo, ApiError> {
        let request = match Schema::for_mode(FormMode::SignUp).validate(&FormValues::from(request)) {
            Ok(flow::ValidatedForm::SignUp(request)) => request,
            Ok(flow::ValidatedForm::SignIn(_)) => {
                return Err(ApiError::InvalidInput("Expected sign-up details".to_string()))
            }
            Err(errors) => return Err(ApiError::InvalidInput(errors.to_string())),
        };
        let email = request.credentials.email.clone();

        if self.accounts.read().await.by_email.contains_key(&email) {
            return Err(ApiError::DuplicateAccount);
        }
        let password_hash = hash_password(&request.credentials.password)?;

        let mut accounts = self.accounts.write().await;
        // Re-check under the write lock; hashing ran unlocked.
        if accounts.by_email.contains_key(&email) {
            return Err(ApiError::DuplicateAccount);
        }
        let user = UserInfo {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            first_name: Some(request.profile.first_name.clone()),
            last_name: Some(request.profile.last_name.clone()),
        };
        accounts.by_email.insert(email, user.id.clone());
        accounts.by_id.insert(
            user.id.clone(),
            StoredAccount {
                user: user.clone(),
                password_hash,
                banks: Vec::new(),
            },
        );
        tracing::info!(user = %user.id, "account created");
        Ok(user)
    }

    /// Check credentials. `Ok(None)` means unknown email or wrong password.
    pub async fn verify(&self, credentials: &Credentials) -> Result<Option<UserInfo>, ApiError> {
        let email = credentials.email.trim().to_lowercase();
        let accounts = self.accounts.read().await;
        let Some(account) = accounts
            .by_email
            .get(&email)
            .and_then(|id| accounts.by_id.get(id))
        else {
            return Ok(None);
        };
        if verify_password(&credentials.password, &account.password_hash)? {
            Ok(Some(account.user.clone()))
        } else {
            Ok(None)
        }
    }

    pub async fn find(&self, user_id: &str) -> Option<UserInfo> {
        self.accounts.read().await.by_id.get(user_id).map(|a| a.user.clone())
    }

    /// Attach newly linked banks, replacing any with the same id.
    pub async fn link_banks(
        &self,
        user_id: &str,
        banks: Vec<BankSummary>,
    ) -> Result<Vec<BankSummary>, ApiError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.by_id.get_mut(user_id).ok_or(ApiError::NotAuthenticated)?;
        for bank in banks {
            account.banks.retain(|b| b.id != bank.id);
            account.banks.push(bank);
        }
        Ok(account.banks.clone())
    }

    pub async fn banks(&self, user_id: &str) -> Vec<BankSummary> {
        self.accounts
            .read()
            .await
            .by_id
            .get(user_id)
            .map(|a| a.banks.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow::ProfileDetails;

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            credentials: Credentials {
                email: email.to_string(),
                password: password.to_string(),
            },
            profile: ProfileDetails {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                address: "1 Main St".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                postal_code: "11101".to_string(),
                date_of_birth: "1990-04-21".to_string(),
                national_id: "1234".to_string(),
            },
        }
    }

    fn bank(id: &str, balance: f64) -> BankSummary {
        BankSummary {
            id: id.to_string(),
            institution: "Plaid Checking".to_string(),
            mask: Some("0000".to_string()),
            current_balance: balance,
        }
    }

    #[tokio::test]
    async fn test_create_and_verify() {
        let dir = AccountDirectory::new();
        let user = dir.create(&request("Ada@Example.com", "password1")).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(dir.find(&user.id).await, Some(user.clone()));

        let good = Credentials {
            email: "ada@example.com".to_string(),
            password: "password1".to_string(),
        };
        assert_eq!(dir.verify(&good).await.unwrap(), Some(user));

        let wrong = Credentials {
            password: "password2".to_string(),
            ..good.clone()
        };
        assert_eq!(dir.verify(&wrong).await.unwrap(), None);

        let unknown = Credentials {
            email: "nobody@example.com".to_string(),
            ..good
        };
        assert_eq!(dir.verify(&unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_refused() {
        let dir = AccountDirectory::new();
        dir.create(&request("ada@example.com", "password1")).await.unwrap();
        let err = dir.create(&request("ADA@example.com", "password2")).await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateAccount));
    }

    #[tokio::test]
    async fn test_invalid_details_are_refused() {
        let dir = AccountDirectory::new();
        let err = dir.create(&request("ada@example.com", "short")).await.unwrap_err();
        let ApiError::InvalidInput(message) = err else {
            panic!("expected invalid input");
        };
        assert!(message.contains("Password must be at least 8 characters"));
    }

    #[tokio::test]
    async fn test_link_banks_replaces_by_id() {
        let dir = AccountDirectory::new();
        let user = dir.create(&request("ada@example.com", "password1")).await.unwrap();

        dir.link_banks(&user.id, vec![bank("a", 10.0), bank("b", 20.0)]).await.unwrap();
        let banks = dir.link_banks(&user.id, vec![bank("a", 15.0)]).await.unwrap();

        assert_eq!(banks.len(), 2);
        assert_eq!(dir.banks(&user.id).await, banks);
        assert!(banks.iter().any(|b| b.id == "a" && b.current_balance == 15.0));

        let err = dir.link_banks("missing", vec![bank("c", 1.0)]).await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }
}
