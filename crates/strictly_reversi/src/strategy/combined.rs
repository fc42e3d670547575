//! First-success composition of strategies.

use super::Strategy;
use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::ReversiResult;
use crate::types::Color;
use tracing::{debug, instrument};

/// Asks each sub-strategy in order and returns the first proposal.
///
/// A sub-strategy answering `None` or `NoCandidate` is skipped. When
/// every sub-strategy comes up empty the result is `Ok(None)`, not an
/// error. Any other error is returned immediately.
#[derive(Default)]
pub struct CombinedStrategy {
    strategies: Vec<Box<dyn Strategy>>,
}

impl CombinedStrategy {
    /// Creates an empty combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strategy, builder style.
    pub fn with(mut self, strategy: impl Strategy + 'static) -> Self {
        self.add_strategy(strategy);
        self
    }

    /// Appends a strategy.
    pub fn add_strategy(&mut self, strategy: impl Strategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Number of sub-strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Checks if there are no sub-strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl FromIterator<Box<dyn Strategy>> for CombinedStrategy {
    fn from_iter<I: IntoIterator<Item = Box<dyn Strategy>>>(iter: I) -> Self {
        Self {
            strategies: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for CombinedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("CombinedStrategy")
            .field("strategies", &names)
            .finish()
    }
}

impl Strategy for CombinedStrategy {
    #[instrument(skip(self, engine), fields(strategies = self.strategies.len()))]
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        for strategy in &self.strategies {
            match strategy.determine_move(engine, player) {
                Ok(Some(at)) => {
                    debug!(strategy = strategy.name(), %at, "Sub-strategy answered");
                    return Ok(Some(at));
                }
                Ok(None) => debug!(strategy = strategy.name(), "Sub-strategy had no move"),
                Err(e) if e.is_no_candidate() => {
                    debug!(strategy = strategy.name(), "Sub-strategy found no candidate")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "combined"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReversiError;
    use crate::strategy::{CornerStrategy, MaxCaptureStrategy};

    /// Answers with a fixed result.
    struct Fixed(Option<Coord>);

    impl Strategy for Fixed {
        fn determine_move(&self, _: &ReversiEngine, _: Color) -> ReversiResult<Option<Coord>> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    /// Always reports nothing to play.
    struct Exhausted;

    impl Strategy for Exhausted {
        fn determine_move(&self, _: &ReversiEngine, _: Color) -> ReversiResult<Option<Coord>> {
            Err(ReversiError::no_candidate("exhausted"))
        }

        fn name(&self) -> &'static str {
            "exhausted"
        }
    }

    fn opening() -> ReversiEngine {
        let mut engine = ReversiEngine::hex(3).unwrap();
        engine.game_started().unwrap();
        engine
    }

    #[test]
    fn test_skips_empty_answers() {
        let target = Coord::new(-2, 1);
        let combined = CombinedStrategy::new()
            .with(Fixed(None))
            .with(Exhausted)
            .with(Fixed(Some(target)))
            .with(MaxCaptureStrategy);
        let choice = combined.determine_move(&opening(), Color::Black).unwrap();
        assert_eq!(choice, Some(target));
    }

    #[test]
    fn test_all_empty_is_none() {
        let combined = CombinedStrategy::new().with(Fixed(None)).with(Exhausted);
        assert_eq!(combined.determine_move(&opening(), Color::Black).unwrap(), None);
        assert_eq!(CombinedStrategy::new().determine_move(&opening(), Color::Black).unwrap(), None);
    }

    #[test]
    fn test_other_errors_propagate() {
        let unstarted = ReversiEngine::hex(3).unwrap();
        let combined = CombinedStrategy::new().with(CornerStrategy);
        assert!(combined.determine_move(&unstarted, Color::Black).is_err());
    }
}
