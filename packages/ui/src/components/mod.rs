//! Small form primitives shared by the auth pages and the dashboard.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::Input;

mod label;
pub use label::Label;
