//! Name-addressable strategy selector for configs and the command line.

use std::fmt;
use std::str::FromStr;

use crate::{
    BestRatio, DispatchError, DispatchStrategy, MostPassengers, NearestFirst, WeightedRandom,
};

/// The built-in dispatch strategies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    /// Minimum road distance.
    #[default]
    Nearest,
    /// Maximum waiting passengers.
    MostPassengers,
    /// Maximum passengers per distance.
    BestRatio,
    /// Randomized, weighted towards many passengers and short distance.
    WeightedRandom,
}

impl StrategyKind {
    /// Every variant, in display order.
    pub fn all() -> [StrategyKind; 4] {
        [
            StrategyKind::Nearest,
            StrategyKind::MostPassengers,
            StrategyKind::BestRatio,
            StrategyKind::WeightedRandom,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Nearest        => "nearest",
            StrategyKind::MostPassengers => "most-passengers",
            StrategyKind::BestRatio      => "best-ratio",
            StrategyKind::WeightedRandom => "weighted-random",
        }
    }

    /// `false` only for the randomized strategy.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, StrategyKind::WeightedRandom)
    }

    pub fn into_strategy(self) -> Box<dyn DispatchStrategy> {
        match self {
            StrategyKind::Nearest        => Box::new(NearestFirst),
            StrategyKind::MostPassengers => Box::new(MostPassengers),
            StrategyKind::BestRatio      => Box::new(BestRatio),
            StrategyKind::WeightedRandom => Box::new(WeightedRandom),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = DispatchError;

    /// Accepts the kebab-case names plus a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest-first"                 => Ok(StrategyKind::Nearest),
            "most-passengers" | "most" | "passengers"   => Ok(StrategyKind::MostPassengers),
            "best-ratio" | "ratio" | "efficient"        => Ok(StrategyKind::BestRatio),
            "weighted-random" | "random" | "weighted"   => Ok(StrategyKind::WeightedRandom),
            _ => Err(DispatchError::UnknownStrategy(s.to_string())),
        }
    }
}
