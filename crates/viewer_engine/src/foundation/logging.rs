//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring a second initialization
///
/// Useful in tests where several entry points may race to install a logger.
pub fn try_init() {
    let _ = env_logger::try_init();
}
