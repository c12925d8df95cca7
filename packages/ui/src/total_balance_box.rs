use dioxus::prelude::*;
use flow::format_amount;

#[component]
pub fn TotalBalanceBox(total_banks: usize, total_current_balance: f64) -> Element {
    let amount = format_amount(total_current_balance);

    rsx! {
        section {
            class: "total-balance",
            div {
                class: "total-balance-chart",
                span { class: "total-balance-count", "{total_banks}" }
            }
            div {
                class: "total-balance-details",
                h2 { class: "header-2", "Bank Accounts: {total_banks}" }
                div {
                    class: "total-balance-amount",
                    p { class: "total-balance-label", "Total Current Balance" }
                    p { class: "total-balance-value", "{amount}" }
                }
            }
        }
    }
}
