mod auth;
mod metrics;

pub use auth::{admin_only, authenticate};
pub use metrics::track_metrics;
