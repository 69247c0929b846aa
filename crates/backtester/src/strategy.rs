use core_types::PhaseName;
use serde::{Deserialize, Serialize};

/// The strategies every report compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LunarStrategy {
    /// Buy at the new moon, sell at the full moon.
    MoonSwing,
    /// Buy at the full moon, sell at the new moon.
    InverseMoon,
    /// Buy the first close, sell the last.
    BuyHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

impl LunarStrategy {
    pub const ALL: [LunarStrategy; 3] = [
        LunarStrategy::MoonSwing,
        LunarStrategy::InverseMoon,
        LunarStrategy::BuyHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LunarStrategy::MoonSwing => "moonSwing",
            LunarStrategy::InverseMoon => "inverseMoon",
            LunarStrategy::BuyHold => "buyHold",
        }
    }

    /// Decides what to do at the close of bar `index` out of `len`.
    pub fn action(
        &self,
        index: usize,
        len: usize,
        phase: PhaseName,
        holding: bool,
    ) -> Option<Action> {
        let (entry, exit) = match self {
            LunarStrategy::MoonSwing => (PhaseName::New, PhaseName::Full),
            LunarStrategy::InverseMoon => (PhaseName::Full, PhaseName::New),
            LunarStrategy::BuyHold => {
                return match (index, holding) {
                    (0, false) => Some(Action::Buy),
                    (i, true) if i + 1 == len => Some(Action::Sell),
                    _ => None,
                };
            }
        };

        match holding {
            false if phase == entry => Some(Action::Buy),
            true if phase == exit => Some(Action::Sell),
            _ => None,
        }
    }
}
