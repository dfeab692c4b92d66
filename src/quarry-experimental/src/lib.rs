//! Experimental feature gating for Quarry CLI.
//!
//! Unstable functionality is guarded by a closed, compiled-in set of named
//! features. This crate owns the mapping between feature values and their
//! canonical names, the parsing of configuration strings into feature sets,
//! and the error raised when a gated operation runs without its feature
//! enabled. Which features are enabled is decided and stored by the
//! configuration layer, not here.

pub mod error;
pub mod features;
pub mod parse;

pub use error::{MissingExperimentalFeature, require_experimental_feature};
pub use features::ExperimentalFeature;
pub use parse::{parse_experimental_feature, parse_features, parse_features_with};
