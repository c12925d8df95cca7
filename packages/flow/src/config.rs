//! # Dashboard configuration — `horizon.toml`
//!
//! ```toml
//! [routes]
//! home = "/"
//! sign_in = "/sign-in"
//! sign_up = "/sign-up"
//!
//! [submit]
//! timeout_secs = 30   # 0 disables the timeout
//! ```
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::FormMode;

/// Top-level configuration stored in `horizon.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
}

/// Client-side routes the auth flow navigates between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_home")]
    pub home: String,
    #[serde(default = "default_sign_in")]
    pub sign_in: String,
    #[serde(default = "default_sign_up")]
    pub sign_up: String,
}

fn default_home() -> String {
    "/".to_string()
}

fn default_sign_in() -> String {
    "/sign-in".to_string()
}

fn default_sign_up() -> String {
    "/sign-up".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            sign_in: default_sign_in(),
            sign_up: default_sign_up(),
        }
    }
}

impl RoutesConfig {
    /// Route of the form for `mode`.
    pub fn form(&self, mode: FormMode) -> &str {
        match mode {
            FormMode::SignIn => &self.sign_in,
            FormMode::SignUp => &self.sign_up,
        }
    }
}

/// Submission settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Abort an in-flight submission after this many seconds. 0 disables.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl SubmitConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(u64::from(self.timeout_secs)))
    }
}

impl DashboardConfig {
    /// Builder method to set the submission timeout.
    pub fn with_timeout(mut self, secs: u32) -> Self {
        self.submit.timeout_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "horizon.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.routes.home, "/");
        assert_eq!(config.submit.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            [routes]
            home = "/dashboard"

            [submit]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.home, "/dashboard");
        assert_eq!(config.routes.form(FormMode::SignUp), "/sign-up");
        assert_eq!(config.submit.timeout(), None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::default().with_timeout(5);
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }
}
