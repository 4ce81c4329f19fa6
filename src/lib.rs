pub mod assessment;
pub mod benefit;
pub mod config;
pub mod format;
pub mod guardrail;
pub mod output;
pub mod priority;
pub mod projection;
pub mod readiness;
pub mod scenario;
pub mod server;
