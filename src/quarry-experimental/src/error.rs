//! The hard-failure side of feature gating.

use std::collections::HashSet;

use thiserror::Error;

use crate::features::ExperimentalFeature;

/// An experimental feature was required for some operation but is not
/// enabled.
///
/// Raised at the point a gated operation is denied; the operation does not
/// proceed until the caller re-invokes it with the feature enabled. There is
/// no degraded-mode fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "experimental feature '{missing_feature}' is disabled; \
     use '--extra-experimental-features {missing_feature}' to override"
)]
pub struct MissingExperimentalFeature {
    /// The feature that was required but not enabled.
    pub missing_feature: ExperimentalFeature,
}

impl MissingExperimentalFeature {
    pub fn new(missing_feature: ExperimentalFeature) -> Self {
        Self { missing_feature }
    }
}

/// Check a gated call site against the caller-owned enabled set.
///
/// Returns [`MissingExperimentalFeature`] when `feature` is absent; gated
/// code is expected to propagate it rather than continue.
pub fn require_experimental_feature(
    feature: ExperimentalFeature,
    enabled: &HashSet<ExperimentalFeature>,
) -> Result<(), MissingExperimentalFeature> {
    if enabled.contains(&feature) {
        Ok(())
    } else {
        Err(MissingExperimentalFeature::new(feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_feature() {
        let error = MissingExperimentalFeature::new(ExperimentalFeature::Flakes);
        assert_eq!(error.missing_feature, ExperimentalFeature::Flakes);
    }

    #[test]
    fn test_message_names_feature() {
        let message = MissingExperimentalFeature::new(ExperimentalFeature::Flakes).to_string();
        assert!(message.contains("flakes"));
        assert!(message.contains("disabled"));
    }

    #[test]
    fn test_require_enabled_feature() {
        let enabled = HashSet::from([ExperimentalFeature::Flakes]);
        assert!(require_experimental_feature(ExperimentalFeature::Flakes, &enabled).is_ok());
    }

    #[test]
    fn test_require_missing_feature() {
        let enabled = HashSet::from([ExperimentalFeature::Flakes]);
        let error = require_experimental_feature(ExperimentalFeature::Cgroups, &enabled)
            .unwrap_err();
        assert_eq!(error.missing_feature, ExperimentalFeature::Cgroups);
    }

    #[test]
    fn test_require_against_empty_set() {
        let enabled = HashSet::new();
        assert!(require_experimental_feature(ExperimentalFeature::NixCommand, &enabled).is_err());
    }
}
