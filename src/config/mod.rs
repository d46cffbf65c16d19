//! Configuration module for the OmniSpread client.

pub mod service;

// Re-export commonly used items
pub use service::SERVICE;
