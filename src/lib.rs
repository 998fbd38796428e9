pub mod alerts;
pub mod config;
pub mod engine;
pub mod errors;
pub mod issues;
pub mod logging;
pub mod reconcile;
pub mod skipped;
pub mod types;
pub mod utils;

// Re-export commonly used items for convenience
pub use alerts::AlertQueue;
pub use config::AppConfig;
pub use engine::{ReportPlan, ReportingEngine};
pub use errors::AppError;
pub use types::{Issue, IssueLevel};
