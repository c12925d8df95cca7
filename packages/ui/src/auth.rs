//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use flow::UserInfo;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::use_dashboard_config;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// A session already existed when the app loaded. Never set by a sign-in
    /// or sign-up made since.
    pub restored: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            restored: false,
        }
    }
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    pub fn signed_in(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// Apply the startup session lookup. A user remembered in the meantime wins
    /// over an empty answer that was already in flight.
    pub fn session_loaded(&mut self, user: Option<UserInfo>) {
        self.restored = user.is_some();
        if user.is_some() || self.user.is_none() {
            self.user = user;
        }
        self.loading = false;
    }

    /// Record a user who just signed in or up. Returns whether anything changed.
    pub fn remember(&mut self, user: UserInfo) -> bool {
        if !self.loading && self.user.as_ref() == Some(&user) {
            return false;
        }
        self.user = Some(user);
        self.loading = false;
        true
    }

    /// Whether the sign-in / sign-up pages should send the visitor home.
    pub fn skips_auth_pages(&self) -> bool {
        self.restored
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Record `user` as signed in. No-op when nothing changed or the provider is gone.
pub fn remember_user(auth: &mut Signal<AuthState>, user: UserInfo) {
    let changed = match auth.try_peek() {
        Ok(state) => {
            let mut next = state.clone();
            next.remember(user).then_some(next)
        }
        Err(_) => None,
    };
    if let Some(next) = changed {
        if let Ok(mut state) = auth.try_write() {
            *state = next;
        }
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        let user = match api::get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to load current user: {}", e);
                None
            }
        };
        auth_state.write().session_loaded(user);
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let mut log = use_activity_log();
    let sign_in_route = use_dashboard_config().routes.sign_in;

    let onclick = move |_| {
        let sign_in_route = sign_in_route.clone();
        async move {
            match api::logout().await {
                Ok(()) => {
                    auth_state.set(AuthState::signed_out());
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&sign_in_route);
                        }
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    tracing::debug!(route = %sign_in_route, "signed out");
                }
                Err(e) => {
                    log_activity(&mut log, LogLevel::Error, &format!("Sign out failed: {e}"));
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
