//! Feature definitions and the compiled-in name table.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parse::parse_experimental_feature;

/// An unstable capability that must be explicitly enabled before the
/// functionality it gates will run.
///
/// The set of features is closed and known at compile time. Every variant
/// has exactly one canonical hyphenated name, written out in
/// [`ExperimentalFeature::name`] rather than derived from the variant
/// identifier, so reordering or renaming variants never changes
/// configuration compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentalFeature {
    /// Derivations with content-addressed outputs.
    CaDerivations,
    /// Derivations that may access impure resources while building.
    ImpureDerivations,
    /// Flake references, lock files and the flake registry.
    Flakes,
    /// The unified command-line interface.
    NixCommand,
    /// Builds that invoke the build system recursively.
    RecursiveNix,
    /// Disallow bare URL literals in expressions.
    NoUrlLiterals,
    /// Fetching a pre-built closure from a substituter.
    FetchClosure,
    /// Loading a flake directly into the REPL.
    ReplFlake,
    /// Automatic allocation of build user IDs.
    AutoAllocateUids,
    /// Running builds inside their own cgroup.
    Cgroups,
    /// Overriding the daemon's trust decision for a client.
    DaemonTrustOverride,
    /// Derivations whose build plans are produced by other builds.
    DynamicDerivations,
    /// Timestamp values in parsed TOML.
    ParseTomlTimestamps,
    /// Opening the local store without taking the global lock.
    ReadOnlyLocalStore,
    /// Machine-readable REPL output for external drivers.
    ReplAutomation,
}

impl ExperimentalFeature {
    /// Every feature, in declaration order.
    pub const ALL: [ExperimentalFeature; 15] = [
        Self::CaDerivations,
        Self::ImpureDerivations,
        Self::Flakes,
        Self::NixCommand,
        Self::RecursiveNix,
        Self::NoUrlLiterals,
        Self::FetchClosure,
        Self::ReplFlake,
        Self::AutoAllocateUids,
        Self::Cgroups,
        Self::DaemonTrustOverride,
        Self::DynamicDerivations,
        Self::ParseTomlTimestamps,
        Self::ReadOnlyLocalStore,
        Self::ReplAutomation,
    ];

    /// The canonical hyphenated name, as it appears in configuration input.
    ///
    /// Stable across releases unless a feature is deliberately renamed.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CaDerivations => "ca-derivations",
            Self::ImpureDerivations => "impure-derivations",
            Self::Flakes => "flakes",
            Self::NixCommand => "nix-command",
            Self::RecursiveNix => "recursive-nix",
            Self::NoUrlLiterals => "no-url-literals",
            Self::FetchClosure => "fetch-closure",
            Self::ReplFlake => "repl-flake",
            Self::AutoAllocateUids => "auto-allocate-uids",
            Self::Cgroups => "cgroups",
            Self::DaemonTrustOverride => "daemon-trust-override",
            Self::DynamicDerivations => "dynamic-derivations",
            Self::ParseTomlTimestamps => "parse-toml-timestamps",
            Self::ReadOnlyLocalStore => "read-only-local-store",
            Self::ReplAutomation => "repl-automation",
        }
    }

    /// A one-line description for feature listings and documentation.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CaDerivations => {
                "Derivations whose outputs are addressed by their contents rather than their inputs"
            }
            Self::ImpureDerivations => {
                "Derivations that may access the network and other impure resources during the build"
            }
            Self::Flakes => "Flake references, lock files and the flake registry",
            Self::NixCommand => "The experimental unified command-line interface",
            Self::RecursiveNix => {
                "Builds that invoke the build system recursively from inside the build sandbox"
            }
            Self::NoUrlLiterals => "Reject bare URL literals in the expression language",
            Self::FetchClosure => "Fetching a pre-built store closure from a substituter",
            Self::ReplFlake => "Passing a flake reference directly to the REPL",
            Self::AutoAllocateUids => {
                "Automatic allocation of build user IDs instead of a static build group"
            }
            Self::Cgroups => "Running each build inside its own cgroup",
            Self::DaemonTrustOverride => {
                "Overriding whether the daemon trusts a connecting client, for testing"
            }
            Self::DynamicDerivations => {
                "Derivations whose build plans are themselves produced by builds"
            }
            Self::ParseTomlTimestamps => "Timestamp values when parsing TOML",
            Self::ReadOnlyLocalStore => {
                "Opening the local store in read-only mode, without taking the global lock"
            }
            Self::ReplAutomation => "Machine-readable REPL output for driving it programmatically",
        }
    }
}

/// Renders the canonical name.
impl fmt::Display for ExperimentalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ExperimentalFeature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ExperimentalFeature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NameVisitor;

        impl Visitor<'_> for NameVisitor {
            type Value = ExperimentalFeature;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("the canonical name of an experimental feature")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_experimental_feature(value)
                    .ok_or_else(|| E::custom(format!("unknown experimental feature '{}'", value)))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        for feature in ExperimentalFeature::ALL {
            assert_eq!(parse_experimental_feature(feature.name()), Some(feature));
        }
    }

    #[test]
    fn test_all_has_no_duplicates() {
        let unique: HashSet<_> = ExperimentalFeature::ALL.into_iter().collect();
        assert_eq!(unique.len(), ExperimentalFeature::ALL.len());
    }

    #[test]
    fn test_names_are_lowercase_hyphenated() {
        for feature in ExperimentalFeature::ALL {
            let name = feature.name();
            assert!(!name.is_empty());
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "unexpected character in '{}'",
                name
            );
            // Repeated calls return the same name.
            assert_eq!(name, feature.name());
        }
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(
            ExperimentalFeature::CaDerivations.to_string(),
            "ca-derivations"
        );
        for feature in ExperimentalFeature::ALL {
            assert_eq!(feature.to_string(), feature.name());
        }
    }

    #[test]
    fn test_descriptions_are_nonempty() {
        for feature in ExperimentalFeature::ALL {
            assert!(!feature.description().is_empty());
        }
    }

    #[test]
    fn test_serialize_as_canonical_name() {
        let json = serde_json::to_string(&ExperimentalFeature::Flakes).unwrap();
        assert_eq!(json, "\"flakes\"");
    }

    #[test]
    fn test_deserialize_round_trip() {
        for feature in ExperimentalFeature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            let back: ExperimentalFeature = serde_json::from_str(&json).unwrap();
            assert_eq!(back, feature);
        }
    }

    #[test]
    fn test_deserialize_unknown_name_fails() {
        let result = serde_json::from_str::<ExperimentalFeature>("\"not-a-real-feature\"");
        assert!(result.is_err());
    }
}
