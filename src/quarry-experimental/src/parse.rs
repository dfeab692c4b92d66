//! Conversion of untrusted configuration strings into feature values.
//!
//! Configuration sources evolve over time: an older binary reading a newer
//! configuration (or a typo) must degrade gracefully instead of aborting.
//! Unknown names are therefore warned about and skipped, never escalated to
//! an error.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::features::ExperimentalFeature;

static FEATURES_BY_NAME: Lazy<HashMap<&'static str, ExperimentalFeature>> = Lazy::new(|| {
    ExperimentalFeature::ALL
        .iter()
        .map(|feature| (feature.name(), *feature))
        .collect()
});

/// Look up a feature by its canonical name.
///
/// Exact match only: no trimming, no case folding, no aliases.
pub fn parse_experimental_feature(name: &str) -> Option<ExperimentalFeature> {
    FEATURES_BY_NAME.get(name).copied()
}

/// Parse a collection of feature names into the corresponding feature set.
///
/// Unknown names are reported through `tracing::warn!` and skipped.
pub fn parse_features<I>(names: I) -> HashSet<ExperimentalFeature>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    parse_features_with(names, |message| tracing::warn!("{}", message))
}

/// Like [`parse_features`], but with an explicit warning sink.
///
/// `warn` is invoked once per unrecognized occurrence, with a message naming
/// the offending input, and never for recognized names.
pub fn parse_features_with<I, W>(names: I, mut warn: W) -> HashSet<ExperimentalFeature>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: FnMut(&str),
{
    let mut features = HashSet::new();
    for name in names {
        let name = name.as_ref();
        match parse_experimental_feature(name) {
            Some(feature) => {
                features.insert(feature);
            }
            None => warn(&format!("unknown experimental feature '{}'", name)),
        }
    }
    features
}
