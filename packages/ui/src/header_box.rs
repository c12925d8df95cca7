use dioxus::prelude::*;

/// Page heading. With `user` set it renders as a greeting.
#[component]
pub fn HeaderBox(title: String, subtext: String, user: Option<String>) -> Element {
    rsx! {
        div {
            class: "header-box",
            h1 {
                class: "header-box-title",
                "{title}"
                if let Some(user) = user {
                    span { class: "text-bankGradient", " {user}" }
                }
            }
            p { class: "header-box-subtext", "{subtext}" }
        }
    }
}
