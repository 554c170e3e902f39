//! Utility functions and helpers.

pub mod credentials;
pub mod progress;
pub mod text;

pub use credentials::Credentials;
pub use progress::ProgressLog;
pub use text::format_body;
