//! # Domain models shared by the client and the server
//!
//! These types cross the server/client boundary via Dioxus server functions,
//! so every one of them is `Serialize + Deserialize`.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`FormMode`] | Which flow a form instance runs: sign-in or sign-up. Fixed for the form's lifetime. |
//! | [`Credentials`] | Email and password, required in both modes. |
//! | [`ProfileDetails`] | The extra sign-up fields (name, address, date of birth, national id). |
//! | [`SignUpRequest`] | Credentials plus profile, the argument of the register operation. |
//! | [`UserInfo`] | Client-safe projection of a user account. |
//! | [`AccountIdentity`] | The account created by a successful sign-up; drives the link prompt. |
//! | [`BankSummary`] / [`DashboardSummary`] | What the home dashboard renders. |

use serde::{Deserialize, Serialize};

/// Which of the two supported flows a form is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormMode {
    SignIn,
    SignUp,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::SignIn => "sign-in",
            FormMode::SignUp => "sign-up",
        }
    }

    /// The mode the footer link switches to.
    pub fn other(&self) -> FormMode {
        match self {
            FormMode::SignIn => FormMode::SignUp,
            FormMode::SignUp => FormMode::SignIn,
        }
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Keeps passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code: "NY"
    pub state: String,
    pub postal_code: String,
    /// ISO calendar date: "1990-04-21"
    pub date_of_birth: String,
    pub national_id: String,
}

impl std::fmt::Debug for ProfileDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDetails")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("city", &self.city)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Everything the register operation needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub credentials: Credentials,
    pub profile: ProfileDetails,
}

/// User information safe to send to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if no first name is set.
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(&self.email)
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// The account created by a successful sign-up.
///
/// Its presence is what switches the auth form over to the bank-link prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub user: UserInfo,
}

impl AccountIdentity {
    pub fn new(user: UserInfo) -> Self {
        Self { user }
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }
}

/// A bank account linked through the aggregator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub id: String,
    pub institution: String,
    /// Last digits of the account number: "0000"
    pub mask: Option<String>,
    pub current_balance: f64,
}

/// Data behind the home dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user: UserInfo,
    pub banks: Vec<BankSummary>,
}

impl DashboardSummary {
    pub fn total_banks(&self) -> usize {
        self.banks.len()
    }

    pub fn total_current_balance(&self) -> f64 {
        self.banks.iter().map(|b| b.current_balance).sum()
    }
}

/// Format an amount as US dollars: `1250.25` → `"$1,250.25"`.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
