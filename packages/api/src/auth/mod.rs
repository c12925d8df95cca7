//! Authentication: sessions, password hashing and the account directory.

#[cfg(feature = "server")]
mod directory;
#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use directory::{directory, AccountDirectory};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{current_user_id, require_user_id, start_session, SESSION_USER_ID_KEY};
