pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reputation;

pub use config::{Settings, SourcePolicy};
pub use error::VerifyError;
pub use models::VerificationResult;
pub use pipeline::VerificationOrchestrator;
