use dioxus::prelude::*;

use flow::DashboardConfig;
use ui::{ActivityLog, ActivityLogPanel, ActivityLogToggle, AuthProvider};
use views::{Home, SignIn, SignUp};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/sign-in")]
    SignIn {},
    #[route("/sign-up")]
    SignUp {},
}

const HORIZON_TOML: &str = include_str!("../horizon.toml");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,api=info,flow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Sessions live in memory, like the account directory behind them.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7)
                .try_into()
                .expect("session expiry fits"),
        )); // 7 days

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

/// Load `horizon.toml`, falling back to defaults when it does not parse.
fn load_config() -> DashboardConfig {
    DashboardConfig::from_toml(HORIZON_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}: {}", DashboardConfig::filename(), e);
        DashboardConfig::default()
    })
}

#[component]
fn App() -> Element {
    use_context_provider(load_config);
    use_context_provider(|| Signal::new(ActivityLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::HORIZON_CSS }

        AuthProvider {
            Router::<Route> {}
        }
        ActivityLogPanel {}
        ActivityLogToggle {}
    }
}
