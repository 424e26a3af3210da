//! CFR variant hooks.
//!
//! Vanilla CFR and CFR+ share the entire traversal; they differ only in how
//! regret deltas are folded into the table and how the average strategy is
//! weighted. Two variants form a closed set, so a tagged enum replaces the
//! virtual-hook hierarchy a class-based design would use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which accumulation rules the solver applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CfrVariant {
    /// Plain regret accumulation, reach-weighted strategy averaging.
    #[default]
    Vanilla,
    /// CFR+: cumulative regrets floored at zero after every update, and
    /// linear (iteration-weighted) strategy averaging.
    Plus,
}

impl CfrVariant {
    /// Fold one counterfactual-regret delta into a table slot.
    pub fn accumulate_regret(self, slot: &mut f64, delta: f64) {
        match self {
            CfrVariant::Vanilla => *slot += delta,
            CfrVariant::Plus => *slot = (*slot + delta).max(0.0),
        }
    }

    /// Weight applied to the current strategy when accumulating the average.
    ///
    /// `iteration` is the 1-based iteration counter; CFR+ uses it for linear
    /// averaging.
    pub fn strategy_weight(self, own_reach: f64, iteration: u64) -> f64 {
        match self {
            CfrVariant::Vanilla => own_reach,
            CfrVariant::Plus => iteration as f64 * own_reach,
        }
    }
}

impl fmt::Display for CfrVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfrVariant::Vanilla => write!(f, "vanilla"),
            CfrVariant::Plus => write!(f, "plus"),
        }
    }
}

impl FromStr for CfrVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vanilla" => Ok(CfrVariant::Vanilla),
            "plus" | "cfr+" => Ok(CfrVariant::Plus),
            other => Err(format!("unknown CFR variant: {other}")),
        }
    }
}
