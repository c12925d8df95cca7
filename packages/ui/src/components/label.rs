use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, #[props(default)] class: String, children: Element) -> Element {
    rsx! {
        label { class: "label {class}", r#for: "{html_for}", {children} }
    }
}
