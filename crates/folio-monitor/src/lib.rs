//! Logging setup and notification delivery.

mod logging;
mod notify;

pub use logging::setup_logging;
pub use notify::LogNotifier;
