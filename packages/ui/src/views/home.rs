//! Home dashboard: greeting, total balance and the profile sidebar.

use dioxus::prelude::*;
use flow::DashboardSummary;

use crate::auth::{remember_user, use_auth};
use crate::{HeaderBox, RightSidebar, TotalBalanceBox};

const SUBTEXT: &str = "Access and manage your account and transactions efficiently";

/// Loads the dashboard for the session. `on_anonymous` fires when nobody is signed in.
#[component]
pub fn HomeView(on_anonymous: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let dashboard = use_resource(|| async move { api::get_dashboard().await });

    let current: Option<Result<Option<DashboardSummary>, String>> = match &*dashboard.read() {
        Some(Ok(summary)) => Some(Ok(summary.clone())),
        Some(Err(e)) => Some(Err(e.to_string())),
        None => None,
    };

    use_effect(move || match &*dashboard.read() {
        Some(Ok(Some(summary))) => remember_user(&mut auth, summary.user.clone()),
        Some(Ok(None)) => {
            tracing::debug!("no session, leaving the dashboard");
            on_anonymous.call(());
        }
        _ => {}
    });

    match current {
        None => rsx! {
            section { class: "home home-loading", "Loading..." }
        },
        Some(Err(e)) => rsx! {
            section {
                class: "home",
                div { class: "form-error", role: "alert", "Could not load your dashboard: {e}" }
            }
        },
        Some(Ok(None)) => rsx! {},
        Some(Ok(Some(summary))) => {
            let greeting = summary
                .user
                .first_name
                .clone()
                .unwrap_or_else(|| "Guest".to_string());
            rsx! {
                section {
                    class: "home",
                    div {
                        class: "home-content",
                        header {
                            class: "home-header",
                            HeaderBox {
                                title: "Welcome",
                                user: greeting,
                                subtext: SUBTEXT,
                            }
                            TotalBalanceBox {
                                total_banks: summary.total_banks(),
                                total_current_balance: summary.total_current_balance(),
                            }
                        }
                    }
                    RightSidebar { user: summary.user.clone(), banks: summary.banks.clone() }
                }
            }
        }
    }
}
