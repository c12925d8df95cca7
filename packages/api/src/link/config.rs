//! Aggregator configuration from environment variables.

/// Plaid credentials and link settings.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub client_id: String,
    pub secret: String,
    /// API host for the selected environment.
    pub base_url: String,
    pub client_name: String,
    pub products: Vec<String>,
    pub country_codes: Vec<String>,
    pub language: String,
}

impl LinkConfig {
    /// Read `PLAID_CLIENT_ID`, `PLAID_SECRET` and `PLAID_ENV` (default `sandbox`).
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let client_id = std::env::var("PLAID_CLIENT_ID")
            .map_err(|_| "PLAID_CLIENT_ID not set")?;
        let secret = std::env::var("PLAID_SECRET")
            .map_err(|_| "PLAID_SECRET not set")?;
        let env = std::env::var("PLAID_ENV").unwrap_or_else(|_| "sandbox".to_string());

        Ok(Self {
            client_id,
            secret,
            base_url: base_url(&env)?.to_string(),
            client_name: "Horizon".to_string(),
            products: vec!["auth".to_string(), "transactions".to_string()],
            country_codes: vec!["US".to_string()],
            language: "en".to_string(),
        })
    }
}

fn base_url(env: &str) -> Result<&'static str, String> {
    match env {
        "sandbox" => Ok("https://sandbox.plaid.com"),
        "development" => Ok("https://development.plaid.com"),
        "production" => Ok("https://production.plaid.com"),
        other => Err(format!("Unknown PLAID_ENV: {other}")),
    }
}
