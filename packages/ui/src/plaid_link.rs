//! Bank-link prompt shown after sign-up.
//!
//! A link token is requested as soon as the prompt mounts. Opening the Plaid
//! widget hands that token to the Plaid Link script through `document::eval`;
//! the widget answers with either a public token (exchanged server-side for
//! account balances) or an exit, possibly carrying an error.

use dioxus::prelude::*;
use flow::{AccountIdentity, BankSummary, LinkState};
use serde::Deserialize;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::components::{Button, ButtonVariant};

const PLAID_LINK_SCRIPT: &str = "https://cdn.plaid.com/link/v2/stable/link-initialize.js";

const OPEN_PLAID_LINK: &str = r#"
const token = await dioxus.recv();
if (typeof Plaid === "undefined") {
    dioxus.send({ publicToken: null, error: "Plaid Link failed to load" });
} else {
    const handler = Plaid.create({
        token,
        onSuccess: (public_token) => dioxus.send({ publicToken: public_token, error: null }),
        onExit: (err) => dioxus.send({
            publicToken: null,
            error: err ? (err.display_message || err.error_message || "Bank linking failed") : null,
        }),
    });
    handler.open();
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkReply {
    public_token: Option<String>,
    error: Option<String>,
}

/// Open Plaid Link. `Ok(None)` means the user closed it without linking.
async fn open_plaid_link(link_token: &str) -> Result<Option<String>, String> {
    let mut eval = document::eval(OPEN_PLAID_LINK);
    eval.send(link_token.to_string()).map_err(|e| e.to_string())?;
    let reply: LinkReply = eval.recv().await.map_err(|e| e.to_string())?;
    match (reply.public_token, reply.error) {
        (Some(public_token), _) => Ok(Some(public_token)),
        (None, Some(error)) => Err(error),
        (None, None) => Ok(None),
    }
}

#[component]
pub fn PlaidLink(
    identity: AccountIdentity,
    #[props(default)] variant: ButtonVariant,
    on_linked: EventHandler<Vec<BankSummary>>,
) -> Element {
    let mut link = use_signal(LinkState::default);
    let mut log = use_activity_log();

    let _token = use_resource(move || async move {
        let result = api::create_link_token().await.map_err(|e| e.to_string());
        if let Err(e) = &result {
            log_activity(&mut log, LogLevel::Error, &format!("Could not prepare bank linking: {e}"));
        }
        let next = link.peek().token_loaded(result);
        link.set(next);
    });

    let open = move |_: MouseEvent| async move {
        let Some((next, link_token)) = link.peek().open() else {
            return;
        };
        link.set(next);

        let public_token = match open_plaid_link(&link_token).await {
            Ok(Some(public_token)) => public_token,
            Ok(None) => {
                let next = link.peek().exited(None);
                link.set(next);
                return;
            }
            Err(e) => {
                log_activity(&mut log, LogLevel::Warning, &format!("Plaid Link exited: {e}"));
                let next = link.peek().exited(Some(e));
                link.set(next);
                return;
            }
        };

        match api::exchange_public_token(public_token).await {
            Ok(banks) => {
                log_activity(
                    &mut log,
                    LogLevel::Success,
                    &format!("Linked {} account(s)", banks.len()),
                );
                let next = link.peek().linked(banks.clone());
                link.set(next);
                on_linked.call(banks);
            }
            Err(e) => {
                log_activity(&mut log, LogLevel::Error, &format!("Bank linking failed: {e}"));
                let next = link.peek().exited(Some(e.to_string()));
                link.set(next);
            }
        }
    };

    let state = link();

    rsx! {
        document::Script { src: PLAID_LINK_SCRIPT }

        div {
            class: "plaid-link",
            p {
                class: "plaid-link-welcome",
                "Welcome, {identity.user.display_name()}. Connect a bank to see your balances."
            }
            Button {
                variant,
                class: "plaid-link-button",
                disabled: !state.can_open(),
                onclick: open,
                "{state.button_label()}"
            }
            if let Some(error) = state.error() {
                p { class: "form-message", role: "alert", "{error}" }
            }
        }
    }
}
