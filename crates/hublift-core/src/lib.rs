#![deny(missing_docs)]
#![doc = "Configuration, input and error contracts for centrality-based hypergraph lifting."]

pub mod config;
pub mod errors;
pub mod input;
pub mod provenance;

pub use config::{LiftingConfig, NetworkType};
pub use errors::{ErrorInfo, LiftError};
pub use input::{FeatureTable, GraphInput};
pub use provenance::SchemaVersion;
