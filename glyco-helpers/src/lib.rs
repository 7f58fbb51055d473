// Include submodules
mod common;
mod schema;

// Re-export types from submodules
pub use common::Measurements;
pub use schema::{FEATURE_COUNT, FEATURES, FeatureField, Outcome};
