//! Match configuration supplied by the shell.
//!
//! Every value is validated when it is parsed, so a running match never sees
//! an unknown strategy or delay.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::strategy::{GreedyMaxCapture, RandomStrategy, Strategy};
use crate::{ConfigError, Piece};

/// Which automated player the human faces.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum StrategyKind {
    #[default]
    Random,
    Greedy,
}

impl StrategyKind {
    /// All variants, in selection-index order.
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Random, StrategyKind::Greedy];

    /// Instantiate the strategy. `seed` only affects [`StrategyKind::Random`].
    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(match seed {
                Some(seed) => RandomStrategy::seeded(seed),
                None => RandomStrategy::new(),
            }),
            StrategyKind::Greedy => Box::new(GreedyMaxCapture),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
        }
    }
}

impl TryFrom<usize> for StrategyKind {
    type Error = ConfigError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        StrategyKind::ALL
            .get(index)
            .copied()
            .ok_or(ConfigError::StrategyIndex(index))
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "muddler" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            other => match other.parse::<usize>() {
                Ok(index) => StrategyKind::try_from(index),
                Err(_) => Err(ConfigError::UnknownStrategy(s.trim().to_string())),
            },
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pause before an automated move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum AiDelay {
    None,
    #[default]
    Default,
}

impl AiDelay {
    const DEFAULT_MS: u64 = 500;

    pub fn duration(self) -> Duration {
        match self {
            AiDelay::None => Duration::ZERO,
            AiDelay::Default => Duration::from_millis(Self::DEFAULT_MS),
        }
    }
}

impl FromStr for AiDelay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "0" => Ok(AiDelay::None),
            "default" | "on" => Ok(AiDelay::Default),
            _ => Err(ConfigError::UnknownDelay(s.trim().to_string())),
        }
    }
}

impl FromStr for Piece {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" | "first" | "x" => Ok(Piece::One),
            "2" | "two" | "second" | "o" => Ok(Piece::Two),
            _ => Err(ConfigError::UnknownPiece(s.trim().to_string())),
        }
    }
}

/// Settings for one match. Plain values, no persistence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MatchConfig {
    /// Piece the human plays. `Piece::One` moves first.
    pub human: Piece,
    pub delay: AiDelay,
    pub strategy: StrategyKind,
    /// Seed for the random strategy; OS entropy when None.
    pub seed: Option<u64>,
}

impl MatchConfig {
    /// Piece played by the automated side.
    #[inline]
    pub fn ai(&self) -> Piece {
        self.human.opponent()
    }

    #[inline]
    pub fn human_moves_first(&self) -> bool {
        self.human == Piece::One
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            human: Piece::One,
            delay: AiDelay::Default,
            strategy: StrategyKind::Random,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_index() {
        assert_eq!(StrategyKind::try_from(0), Ok(StrategyKind::Random));
        assert_eq!(StrategyKind::try_from(1), Ok(StrategyKind::Greedy));
        assert_eq!(StrategyKind::try_from(2), Err(ConfigError::StrategyIndex(2)));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("random".parse(), Ok(StrategyKind::Random));
        assert_eq!("Greedy".parse(), Ok(StrategyKind::Greedy));
        assert_eq!("1".parse(), Ok(StrategyKind::Greedy));
        assert_eq!("7".parse::<StrategyKind>(), Err(ConfigError::StrategyIndex(7)));
        assert_eq!(
            "minimax".parse::<StrategyKind>(),
            Err(ConfigError::UnknownStrategy("minimax".to_string()))
        );
    }

    #[test]
    fn test_strategy_build_names() {
        assert_eq!(StrategyKind::Random.build(Some(3)).name(), "Muddler");
        assert_eq!(StrategyKind::Greedy.build(None).name(), "Greedy");
    }

    #[test]
    fn test_delay_presets() {
        assert_eq!(AiDelay::None.duration(), Duration::ZERO);
        assert_eq!(AiDelay::Default.duration(), Duration::from_millis(500));
        assert_eq!("none".parse(), Ok(AiDelay::None));
        assert_eq!("default".parse(), Ok(AiDelay::Default));
        assert!(matches!("slow".parse::<AiDelay>(), Err(ConfigError::UnknownDelay(_))));
    }

    #[test]
    fn test_piece_from_str() {
        assert_eq!("one".parse(), Ok(Piece::One));
        assert_eq!("2".parse(), Ok(Piece::Two));
        assert!(matches!("three".parse::<Piece>(), Err(ConfigError::UnknownPiece(_))));
    }

    #[test]
    fn test_config_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.human, Piece::One);
        assert_eq!(config.ai(), Piece::Two);
        assert!(config.human_moves_first());
        assert_eq!(config.delay, AiDelay::Default);
        assert_eq!(config.strategy, StrategyKind::Random);
    }
}
