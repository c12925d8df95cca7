use dioxus::prelude::*;
use flow::{format_amount, BankSummary, UserInfo};

use crate::LogoutButton;

/// Banks shown as cards before the list collapses.
const VISIBLE_BANKS: usize = 2;

/// Profile banner and the user's first linked banks.
#[component]
pub fn RightSidebar(user: UserInfo, banks: Vec<BankSummary>) -> Element {
    let initial = user
        .display_name()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let name = user.full_name();
    let hidden = banks.len().saturating_sub(VISIBLE_BANKS);

    rsx! {
        aside {
            class: "right-sidebar",
            section {
                class: "profile",
                div { class: "profile-banner" }
                div {
                    class: "profile-img",
                    span { class: "profile-initial", "{initial}" }
                }
                div {
                    class: "profile-details",
                    h1 { class: "profile-name", "{name}" }
                    p { class: "profile-email", "{user.email}" }
                }
                LogoutButton { class: "form-link" }
            }

            section {
                class: "banks",
                h2 { class: "header-2", "My Banks" }
                if banks.is_empty() {
                    p { class: "banks-empty", "No banks linked yet." }
                }
                for bank in banks.iter().take(VISIBLE_BANKS) {
                    div {
                        key: "{bank.id}",
                        class: "bank-card",
                        p { class: "bank-card-name", "{bank.institution}" }
                        if let Some(mask) = &bank.mask {
                            p { class: "bank-card-mask", "●●●● {mask}" }
                        }
                        p { class: "bank-card-balance", "{format_amount(bank.current_balance)}" }
                    }
                }
                if hidden > 0 {
                    p { class: "banks-more", "+{hidden} more" }
                }
            }
        }
    }
}
