//! Configuration for Warden.
//! Explicit, validated structs passed into each component constructor;
//! no ambient singletons.

pub mod confidence_weights;
pub mod scan_config;

pub use confidence_weights::ConfidenceWeights;
pub use scan_config::ScanConfig;
