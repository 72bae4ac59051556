//! coldtons-common: Shared errors, configuration and the outbound HTTP client
//! used across all ColDToNs crates.

pub mod error;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::{AtnfConfig, Config, HeasarcConfig, ServerConfig};
pub use error::{ColdtonsError, Result};
