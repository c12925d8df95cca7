use dioxus::prelude::*;
use flow::Field;

use crate::components::{Input, Label};

/// One labelled input of the auth form, with its validation message.
#[component]
pub fn FormField(
    field: Field,
    value: String,
    error: Option<String>,
    #[props(default)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    let id = format!("field-{}", field.name());

    rsx! {
        div {
            class: "form-item",
            Label { html_for: "{id}", class: "form-label", "{field.label()}" }
            Input {
                id: "{id}",
                name: field.name(),
                r#type: field.input_type(),
                placeholder: field.placeholder(),
                value,
                invalid: error.is_some(),
                disabled,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "form-message", "{message}" }
            }
        }
    }
}
