//! Maps forecast pipeline failures to wxdash_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::app_error;
