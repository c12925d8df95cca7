use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

mod home;
pub use home::Home;

mod sign_in;
pub use sign_in::SignIn;

mod sign_up;
pub use sign_up::SignUp;

/// Resolve a route path handed out by the auth flow. Unknown paths go home.
fn route_for(path: &str) -> Route {
    path.parse::<Route>().unwrap_or_else(|_| {
        tracing::warn!(%path, "unknown route, going home");
        Route::Home {}
    })
}

/// Send visitors who are already signed in to the dashboard.
///
/// Only a session that existed before this page was used counts: one restored
/// at startup, or a user already known when the page mounted. A sign-up on
/// this page also signs the user in, and must stay for the bank-link prompt.
fn use_redirect_signed_in() {
    let auth = use_auth();
    let nav = use_navigator();
    let signed_in_at_mount = use_hook(|| auth.peek().signed_in());

    use_effect(move || {
        if signed_in_at_mount || auth().skips_auth_pages() {
            nav.replace(Route::Home {});
        }
    });
}
