//! Built-in stitch catalog.
//!
//! Maps stitch keywords to the motion parameters used when rendering them:
//! horizontal advance per stitch, plunge depth below the fabric plane, and
//! yarn consumed per stitch. The catalog is built once and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The stitch types of the pattern language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StitchKind {
    /// Slip stitch: shallow, tight advance.
    Slip,
    /// Chain stitch: the foundation stitch.
    Chain,
    /// Single crochet.
    Single,
    /// Double crochet: deepest plunge, widest advance.
    Double,
}

impl StitchKind {
    /// The pattern-language keyword, upper-case.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Slip => "SLIP",
            Self::Chain => "CHAIN",
            Self::Single => "SINGLE",
            Self::Double => "DOUBLE",
        }
    }

    /// Lower-case name used in instruction comments.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Slip => "slip",
            Self::Chain => "chain",
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for StitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for StitchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SLIP" => Ok(Self::Slip),
            "CHAIN" => Ok(Self::Chain),
            "SINGLE" => Ok(Self::Single),
            "DOUBLE" => Ok(Self::Double),
            _ => Err(format!("Unknown stitch keyword: {}", s)),
        }
    }
}

/// Motion parameters for rendering one stitch type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StitchDefinition {
    /// Which stitch this definition renders.
    pub kind: StitchKind,
    /// Horizontal advance per stitch.
    pub spacing_mm: f64,
    /// How far below the fabric plane the tool travels.
    pub plunge_depth_mm: f64,
    /// Yarn consumed per stitch.
    pub yarn_feed_mm: f64,
}

static CATALOG: Lazy<BTreeMap<&'static str, StitchDefinition>> = Lazy::new(|| {
    let mut catalog = BTreeMap::new();
    for definition in [
        StitchDefinition {
            kind: StitchKind::Slip,
            spacing_mm: 3.5,
            plunge_depth_mm: 1.0,
            yarn_feed_mm: 0.3,
        },
        StitchDefinition {
            kind: StitchKind::Chain,
            spacing_mm: 5.0,
            plunge_depth_mm: 1.5,
            yarn_feed_mm: 0.5,
        },
        StitchDefinition {
            kind: StitchKind::Single,
            spacing_mm: 4.5,
            plunge_depth_mm: 2.0,
            yarn_feed_mm: 0.6,
        },
        StitchDefinition {
            kind: StitchKind::Double,
            spacing_mm: 5.5,
            plunge_depth_mm: 2.5,
            yarn_feed_mm: 0.7,
        },
    ] {
        catalog.insert(definition.kind.keyword(), definition);
    }
    catalog
});

/// Looks up the definition for a stitch keyword, case-insensitively.
///
/// Returns `None` for keywords outside the catalog; the caller decides
/// whether that is an unknown command or a dispatch to MOVE/PAUSE/TURN.
pub fn stitch_definition(keyword: &str) -> Option<&'static StitchDefinition> {
    CATALOG.get(keyword.to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_stitches() {
        assert_eq!(CATALOG.len(), 4);
    }

    #[test]
    fn test_chain_parameters() {
        let chain = stitch_definition("CHAIN").unwrap();
        assert_eq!(chain.spacing_mm, 5.0);
        assert_eq!(chain.plunge_depth_mm, 1.5);
        assert_eq!(chain.yarn_feed_mm, 0.5);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(stitch_definition("slip").is_some());
        assert!(stitch_definition("Double").is_some());
        assert!(stitch_definition("treble").is_none());
    }

    #[test]
    fn test_keyword_round_trip() {
        for keyword in ["SLIP", "CHAIN", "SINGLE", "DOUBLE"] {
            let kind: StitchKind = keyword.parse().unwrap();
            assert_eq!(kind.keyword(), keyword);
        }
        assert!("PURL".parse::<StitchKind>().is_err());
    }

    #[test]
    fn test_labels_are_lowercase() {
        assert_eq!(StitchKind::Single.label(), "single");
        assert_eq!(StitchKind::Chain.label(), "chain");
    }
}
