//! This crate contains all shared UI for the workspace: the sign-in / sign-up
//! form, the bank-link prompt and the home dashboard widgets.

use std::time::Duration;

use dioxus::prelude::*;
use flow::DashboardConfig;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const HORIZON_CSS: Asset = asset!("/assets/horizon.css");

mod accounts;
pub use accounts::ServerAccounts;

mod auth;
pub use auth::{remember_user, use_auth, AuthProvider, AuthState, LogoutButton};

pub mod activity_log;
pub use activity_log::{log_activity, log_failure, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

mod form_field;
pub use form_field::FormField;

mod auth_form;
pub use auth_form::AuthForm;

mod plaid_link;
pub use plaid_link::PlaidLink;

mod header_box;
pub use header_box::HeaderBox;

mod total_balance_box;
pub use total_balance_box::TotalBalanceBox;

mod right_sidebar;
pub use right_sidebar::RightSidebar;

/// Routes and submit settings, from context when the app provides them.
pub fn use_dashboard_config() -> DashboardConfig {
    try_use_context::<DashboardConfig>().unwrap_or_default()
}

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
