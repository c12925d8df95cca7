//! Minimal Plaid HTTP client: link token creation, public token exchange and
//! account balances.

use flow::BankSummary;
use serde::{Deserialize, Serialize};

use super::config::LinkConfig;
use crate::error::ApiError;

#[derive(Serialize)]
struct LinkTokenRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    client_name: &'a str,
    products: &'a [String],
    country_codes: &'a [String],
    language: &'a str,
    user: LinkUser<'a>,
}

#[derive(Serialize)]
struct LinkUser<'a> {
    client_user_id: &'a str,
}

#[derive(Deserialize)]
struct LinkTokenResponse {
    link_token: String,
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    public_token: &'a str,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    access_token: String,
    item_id: String,
}

#[derive(Serialize)]
struct AccountsRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    access_token: &'a str,
}

#[derive(Deserialize)]
struct AccountsResponse {
    accounts: Vec<PlaidAccount>,
}

#[derive(Debug, Deserialize)]
struct PlaidAccount {
    account_id: String,
    name: String,
    official_name: Option<String>,
    mask: Option<String>,
    balances: PlaidBalances,
}

#[derive(Debug, Deserialize)]
struct PlaidBalances {
    current: Option<f64>,
}

/// Error body Plaid returns with non-2xx statuses.
#[derive(Deserialize)]
struct PlaidError {
    error_code: String,
    error_message: String,
}

pub struct PlaidClient {
    http: reqwest::Client,
    config: LinkConfig,
}

impl PlaidClient {
    /// Build a client from environment configuration.
    pub fn new() -> Result<Self, ApiError> {
        let config = LinkConfig::from_env().map_err(ApiError::Config)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: LinkConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a link token scoped to `user_id`.
    pub async fn create_link_token(&self, user_id: &str) -> Result<String, ApiError> {
        let c = &self.config;
        let body = LinkTokenRequest {
            client_id: &c.client_id,
            secret: &c.secret,
            client_name: &c.client_name,
            products: &c.products,
            country_codes: &c.country_codes,
            language: &c.language,
            user: LinkUser {
                client_user_id: user_id,
            },
        };
        let response: LinkTokenResponse = self.post("/link/token/create", &body).await?;
        Ok(response.link_token)
    }

    /// Exchange a public token and fetch the accounts it grants access to.
    pub async fn link_accounts(&self, public_token: &str) -> Result<Vec<BankSummary>, ApiError> {
        let c = &self.config;
        let exchange: ExchangeResponse = self
            .post(
                "/item/public_token/exchange",
                &ExchangeRequest {
                    client_id: &c.client_id,
                    secret: &c.secret,
                    public_token,
                },
            )
            .await?;
        tracing::info!(item = %exchange.item_id, "bank item linked");

        let accounts: AccountsResponse = self
            .post(
                "/accounts/get",
                &AccountsRequest {
                    client_id: &c.client_id,
                    secret: &c.secret,
                    access_token: &exchange.access_token,
                },
            )
            .await?;
        Ok(summaries(accounts.accounts))
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let response = self
            .http
            .post(format!("{}{}", self.config.base_url, path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<PlaidError>().await {
                Ok(e) => format!("{}: {}", e.error_code, e.error_message),
                Err(_) => format!("HTTP {status}"),
            };
            return Err(ApiError::Link(message));
        }
        Ok(response.json().await?)
    }
}

fn summaries(accounts: Vec<PlaidAccount>) -> Vec<BankSummary> {
    accounts
        .into_iter()
        .map(|a| BankSummary {
            id: a.account_id,
            institution: a.official_name.unwrap_or(a.name),
            mask: a.mask,
            current_balance: a.balances.current.unwrap_or(0.0),
        })
        .collect()
}
