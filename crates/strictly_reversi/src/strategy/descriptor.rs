//! Serializable strategy descriptions.

use super::{
    AvoidCornerStrategy, CombinedStrategy, CornerStrategy, MaxCaptureStrategy, MinimaxStrategy,
    Strategy,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A strategy as written in a config file.
///
/// ```toml
/// [white]
/// kind = "combined"
///
/// [[white.strategies]]
/// kind = "corner"
///
/// [[white.strategies]]
/// kind = "minimax"
/// depth = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategySpec {
    /// [`MaxCaptureStrategy`].
    #[default]
    MaxCapture,
    /// [`CornerStrategy`].
    Corner,
    /// [`AvoidCornerStrategy`].
    AvoidCorner,
    /// [`MinimaxStrategy`] searching `depth` plies.
    Minimax {
        /// Plies to search.
        depth: u32,
    },
    /// [`CombinedStrategy`] over the listed strategies, in order.
    Combined {
        /// Sub-strategies, tried first to last.
        strategies: Vec<StrategySpec>,
    },
}

impl StrategySpec {
    /// Checks that the description can be built into a useful strategy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a minimax depth of zero or an empty
    /// combination, including nested ones.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Minimax { depth: 0 } => {
                Err(ConfigError::new("Minimax depth must be at least 1"))
            }
            Self::Combined { strategies } if strategies.is_empty() => {
                Err(ConfigError::new("Combined strategy needs at least one entry"))
            }
            Self::Combined { strategies } => strategies.iter().try_for_each(Self::validate),
            _ => Ok(()),
        }
    }

    /// Builds the described strategy.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            Self::MaxCapture => Box::new(MaxCaptureStrategy),
            Self::Corner => Box::new(CornerStrategy),
            Self::AvoidCorner => Box::new(AvoidCornerStrategy),
            Self::Minimax { depth } => Box::new(MinimaxStrategy::new(*depth)),
            Self::Combined { strategies } => Box::new(
                strategies
                    .iter()
                    .map(Self::build)
                    .collect::<CombinedStrategy>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        player: StrategySpec,
    }

    #[test]
    fn test_parse_nested_combination() {
        let text = r#"
            [player]
            kind = "combined"

            [[player.strategies]]
            kind = "corner"

            [[player.strategies]]
            kind = "minimax"
            depth = 2
        "#;
        let wrapper: Wrapper = toml::from_str(text).unwrap();
        assert_eq!(
            wrapper.player,
            StrategySpec::Combined {
                strategies: vec![StrategySpec::Corner, StrategySpec::Minimax { depth: 2 }],
            }
        );
        assert!(wrapper.player.validate().is_ok());
        assert_eq!(wrapper.player.build().name(), "combined");
    }

    #[test]
    fn test_rejects_zero_depth_anywhere() {
        assert!(StrategySpec::Minimax { depth: 0 }.validate().is_err());
        let nested = StrategySpec::Combined {
            strategies: vec![StrategySpec::AvoidCorner, StrategySpec::Minimax { depth: 0 }],
        };
        assert!(nested.validate().is_err());
        assert!(StrategySpec::Combined { strategies: vec![] }.validate().is_err());
    }

    #[test]
    fn test_build_names() {
        assert_eq!(StrategySpec::MaxCapture.build().name(), "max_capture");
        assert_eq!(StrategySpec::Corner.build().name(), "corner");
        assert_eq!(StrategySpec::AvoidCorner.build().name(), "avoid_corner");
        assert_eq!(StrategySpec::Minimax { depth: 1 }.build().name(), "minimax");
    }
}
