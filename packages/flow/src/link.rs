//! Bank-link prompt state.
//!
//! ```text
//! Preparing --token--> Ready --open--> Linking --public token exchanged--> Linked
//!     |                  ^                |
//!     +--error--> Unavailable             +--exit / error--> Ready { error }
//! ```

use crate::models::BankSummary;

#[derive(Clone, Debug, PartialEq)]
pub enum LinkState {
    /// Waiting for a link token from the aggregator.
    Preparing,
    /// No link token could be obtained.
    Unavailable { message: String },
    /// The widget can be opened. `error` is the last failed attempt.
    Ready { link_token: String, error: Option<String> },
    /// The external widget is open.
    Linking { link_token: String },
    Linked { banks: Vec<BankSummary> },
}

impl Default for LinkState {
    fn default() -> Self {
        LinkState::Preparing
    }
}

impl LinkState {
    pub fn token_loaded(&self, result: Result<String, String>) -> LinkState {
        match (self, result) {
            (LinkState::Preparing, Ok(link_token)) => LinkState::Ready {
                link_token,
                error: None,
            },
            (LinkState::Preparing, Err(message)) => LinkState::Unavailable { message },
            _ => self.clone(),
        }
    }

    /// Open the widget. Returns the token to hand to it, if the prompt is ready.
    pub fn open(&self) -> Option<(LinkState, String)> {
        match self {
            LinkState::Ready { link_token, .. } => Some((
                LinkState::Linking {
                    link_token: link_token.clone(),
                },
                link_token.clone(),
            )),
            _ => None,
        }
    }

    /// The widget closed without linking anything.
    pub fn exited(&self, error: Option<String>) -> LinkState {
        match self {
            LinkState::Linking { link_token } => LinkState::Ready {
                link_token: link_token.clone(),
                error,
            },
            _ => self.clone(),
        }
    }

    pub fn linked(&self, banks: Vec<BankSummary>) -> LinkState {
        match self {
            LinkState::Linking { .. } => LinkState::Linked { banks },
            _ => self.clone(),
        }
    }

    pub fn can_open(&self) -> bool {
        matches!(self, LinkState::Ready { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LinkState::Unavailable { message } => Some(message),
            LinkState::Ready { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            LinkState::Preparing => "Loading...",
            LinkState::Unavailable { .. } | LinkState::Ready { .. } => "Connect bank",
            LinkState::Linking { .. } => "Linking...",
            LinkState::Linked { .. } => "Bank connected",
        }
    }
}
