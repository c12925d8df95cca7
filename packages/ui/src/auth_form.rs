//! The sign-in / sign-up form.
//!
//! Rendering is driven by two signals mirrored from a [`FormController`]
//! through [`SignalObserver`]; the controller itself owns the state machine.

use std::rc::Rc;

use dioxus::prelude::*;
use flow::machine;
use flow::{
    AbortReason, BankSummary, FlowError, FlowObserver, FlowState, FormController, FormMode,
    FormValues, OperationFailure, SubmissionState, ValidationErrors, View,
};

use crate::activity_log::{log_failure, use_activity_log, ActivityLog};
use crate::auth::{remember_user, use_auth, AuthState};
use crate::components::{Button, ButtonVariant};
use crate::{icons, sleep, use_dashboard_config, FormField, Icon, PlaidLink, ServerAccounts};

/// Writes controller events into component signals.
#[derive(Clone, Copy)]
struct SignalObserver {
    state: Signal<FlowState>,
    submission: Signal<SubmissionState>,
    auth: Signal<AuthState>,
    log: Signal<ActivityLog>,
    on_navigate: EventHandler<String>,
}

/// Late events can arrive after the form unmounted.
fn store<T: 'static>(mut signal: Signal<T>, value: T) {
    if let Ok(mut slot) = signal.try_write() {
        *slot = value;
    }
}

impl FlowObserver for SignalObserver {
    fn state_changed(&self, state: &FlowState) {
        store(self.state, state.clone());
        if let FlowState::LinkPrompt { identity } = state {
            let mut auth = self.auth;
            remember_user(&mut auth, identity.user.clone());
        }
    }

    fn submission_changed(&self, submission: SubmissionState) {
        store(self.submission, submission);
    }

    fn navigate(&self, route: &str) {
        self.on_navigate.call(route.to_string());
    }

    fn failure(&self, failure: &OperationFailure) {
        let mut log = self.log;
        log_failure(&mut log, failure);
    }
}

type Controller = FormController<ServerAccounts, SignalObserver>;

async fn abort_after(controller: Rc<Controller>, limit: std::time::Duration) {
    sleep(limit).await;
    if controller.abort(AbortReason::Timeout) {
        tracing::warn!(?limit, "submission timed out");
    }
}

/// Auth form for one [`FormMode`]. After sign-up it turns into the bank-link prompt.
///
/// `on_navigate` receives the route to leave for: home after sign-in, or after
/// a bank has been linked.
#[component]
pub fn AuthForm(mode: FormMode, on_navigate: EventHandler<String>) -> Element {
    let config = use_dashboard_config();
    let flow_state = use_signal(FlowState::default);
    let submission = use_signal(SubmissionState::default);
    let mut values = use_signal(FormValues::new);
    let mut errors = use_signal(ValidationErrors::default);
    let auth = use_auth();
    let log = use_activity_log();

    let controller = use_hook(|| {
        let observer = SignalObserver {
            state: flow_state,
            submission,
            auth,
            log,
            on_navigate,
        };
        Rc::new(FormController::with_observer(mode, ServerAccounts, observer, &config))
    });

    let timeout = config.submit.timeout();
    let home = config.routes.home.clone();
    let switch_route = config.routes.form(mode.other()).to_string();

    let on_submit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if !controller.can_submit() {
                return;
            }
            let timer = timeout.map(|limit| spawn(abort_after(controller.clone(), limit)));
            let controller = controller.clone();
            let snapshot = values.peek().clone();
            spawn(async move {
                let result = controller.submit(&snapshot).await;
                if let Some(timer) = timer {
                    timer.cancel();
                }
                match result {
                    Ok(_) => store(errors, ValidationErrors::default()),
                    Err(FlowError::Validation(invalid)) => store(errors, invalid),
                    Err(e) => tracing::debug!("submission not started: {e}"),
                }
            });
        }
    };

    let on_linked = {
        let home = home.clone();
        move |_: Vec<BankSummary>| on_navigate.call(home.clone())
    };

    let on_cancel = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            controller.abort(AbortReason::User);
        }
    };

    let state = flow_state();
    let busy = submission().is_busy();
    let submit_text = machine::submit_label(mode, submission());
    let heading = machine::header(mode, &state);
    let (footer_prompt, footer_link) = machine::footer(mode);

    rsx! {
        section {
            class: "auth-form",
            header {
                class: "auth-header",
                a { class: "auth-logo", href: "{home}", "Horizon" }
                h1 { class: "auth-title", "{heading.title}" }
                p { class: "auth-subtitle", "{heading.subtitle}" }
            }

            match state.view() {
                View::LinkPrompt => rsx! {
                    if let Some(identity) = state.identity() {
                        PlaidLink {
                            identity: identity.clone(),
                            on_linked,
                        }
                    }
                },
                View::Form => rsx! {
                    form {
                        class: "auth-fields",
                        novalidate: true,
                        onsubmit: on_submit,

                        if let Some(failure) = state.failure() {
                            div {
                                class: "form-error",
                                role: "alert",
                                p { "{failure.message}" }
                                if !failure.is_recoverable() {
                                    a { href: "{switch_route}", "{footer_link} instead" }
                                }
                            }
                        }

                        for field in controller.fields() {
                            FormField {
                                key: "{field.name()}",
                                field,
                                value: values.read().get(field).to_string(),
                                error: errors.read().for_field(field).map(|e| e.message.clone()),
                                disabled: busy,
                                oninput: move |value: String| {
                                    values.write().set(field, value);
                                    if errors.peek().for_field(field).is_some() {
                                        errors.write().clear(field);
                                    }
                                },
                            }
                        }

                        div {
                            class: "auth-actions",
                            Button {
                                variant: ButtonVariant::Primary,
                                class: "form-btn",
                                r#type: "submit",
                                disabled: busy,
                                if busy {
                                    Icon { class: "spin", width: 16, height: 16, icon: icons::FaSpinner }
                                }
                                "{submit_text}"
                            }
                            if busy {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: on_cancel,
                                    "Cancel"
                                }
                            }
                        }
                    }

                    footer {
                        class: "auth-footer",
                        p { "{footer_prompt}" }
                        a { class: "form-link", href: "{switch_route}", "{footer_link}" }
                    }
                },
            }
        }
    }
}
