//! Common utilities and types shared by the lingo crates

pub mod error;
pub mod logging;
pub mod test_utils;

// Re-export commonly used types
pub use error::{LingoError, Result};
pub use logging::{
    init_default_logging, init_dev_logging, init_logging, init_prod_logging, LoggingConfig,
};
