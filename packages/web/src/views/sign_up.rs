use dioxus::prelude::*;
use flow::FormMode;
use ui::AuthForm;

use super::{route_for, use_redirect_signed_in};

#[component]
pub fn SignUp() -> Element {
    let nav = use_navigator();
    use_redirect_signed_in();

    rsx! {
        main {
            class: "auth-page",
            AuthForm {
                mode: FormMode::SignUp,
                on_navigate: move |route: String| {
                    nav.push(route_for(&route));
                },
            }
        }
    }
}
