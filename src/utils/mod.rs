pub mod logging;

pub use logging::{log_startup, truncate_text};
