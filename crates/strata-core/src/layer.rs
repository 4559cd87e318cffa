//! Architectural layers that can own a result.
//!
//! The canonical promotion chain, lowest to highest:
//!
//! ```text
//! entity → mapper → infrastructure → repository → service → use_case → web
//! ```
//!
//! `unknown` sits outside the chain; promoting out of it is always upward.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which stage currently owns a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    #[default]
    Unknown,
    Entity,
    Mapper,
    Infrastructure,
    Repository,
    Service,
    UseCase,
    /// Process boundary (HTTP handlers, CLI entry points).
    Web,
}

impl Layer {
    pub const ALL: [Self; 8] = [
        Self::Unknown,
        Self::Entity,
        Self::Mapper,
        Self::Infrastructure,
        Self::Repository,
        Self::Service,
        Self::UseCase,
        Self::Web,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Entity => "entity",
            Self::Mapper => "mapper",
            Self::Infrastructure => "infrastructure",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::UseCase => "use_case",
            Self::Web => "web",
        }
    }

    /// Human label used in summaries ("... on the service layer").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown layer",
            Self::Entity => "entity layer",
            Self::Mapper => "mapper layer",
            Self::Infrastructure => "infrastructure layer",
            Self::Repository => "repository layer",
            Self::Service => "service layer",
            Self::UseCase => "use-case layer",
            Self::Web => "web layer",
        }
    }

    /// Position in the promotion chain. `None` for [`Layer::Unknown`].
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::Entity => Some(0),
            Self::Mapper => Some(1),
            Self::Infrastructure => Some(2),
            Self::Repository => Some(3),
            Self::Service => Some(4),
            Self::UseCase => Some(5),
            Self::Web => Some(6),
        }
    }

    /// Whether moving a result from `self` to `target` is an upward promotion.
    ///
    /// Sideways moves (same layer) and moves into `Unknown` are never
    /// promotions.
    #[must_use]
    pub const fn is_promotion_to(self, target: Self) -> bool {
        match (self.rank(), target.rank()) {
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown layer tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layer '{0}'")]
pub struct UnknownLayer(pub String);

impl FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Layer::Repository, Layer::Service, true)]
    #[case(Layer::Mapper, Layer::Web, true)]
    #[case(Layer::Unknown, Layer::Entity, true)]
    #[case(Layer::Service, Layer::Service, false)]
    #[case(Layer::UseCase, Layer::Repository, false)]
    #[case(Layer::Service, Layer::Unknown, false)]
    #[case(Layer::Unknown, Layer::Unknown, false)]
    fn promotion_direction(#[case] from: Layer, #[case] to: Layer, #[case] upward: bool) {
        assert_eq!(from.is_promotion_to(to), upward);
    }

    #[test]
    fn ranks_follow_declaration_order() {
        let ranks: Vec<u8> = Layer::ALL.iter().filter_map(|l| l.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks.len(), Layer::ALL.len() - 1);
    }

    #[test]
    fn layer_parses_its_own_tag() {
        for layer in Layer::ALL {
            assert_eq!(layer.as_str().parse::<Layer>(), Ok(layer));
        }
        assert!("presentation".parse::<Layer>().is_err());
    }

    #[test]
    fn layer_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Layer::UseCase).unwrap(),
            "\"use_case\""
        );
        let recovered: Layer = serde_json::from_str("\"infrastructure\"").unwrap();
        assert_eq!(recovered, Layer::Infrastructure);
    }
}
