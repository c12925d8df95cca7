use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] name: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] class: String,
    #[props(default)] invalid: bool,
    #[props(default)] disabled: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            name: "{name}",
            class: if invalid { "input input-invalid {class}" } else { "input {class}" },
            r#type: r#type,
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            "aria-invalid": invalid,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}
