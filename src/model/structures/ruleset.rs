use crate::model::score::HitCounts;
use rosu_pp::model::mode::GameMode;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::EnumIter;

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum Ruleset {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3
}

impl TryFrom<i32> for Ruleset {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Ruleset::Osu),
            1 => Ok(Ruleset::Taiko),
            2 => Ok(Ruleset::Catch),
            3 => Ok(Ruleset::Mania),
            _ => Err(())
        }
    }
}

impl Ruleset {
    /// Path segment the osu! API uses for this ruleset
    pub fn api_name(&self) -> &'static str {
        match self {
            Ruleset::Osu => "osu",
            Ruleset::Taiko => "taiko",
            Ruleset::Catch => "fruits",
            Ruleset::Mania => "mania"
        }
    }

    /// The scoring model's mode for this ruleset
    pub fn game_mode(&self) -> GameMode {
        match self {
            Ruleset::Osu => GameMode::Osu,
            Ruleset::Taiko => GameMode::Taiko,
            Ruleset::Catch => GameMode::Catch,
            Ruleset::Mania => GameMode::Mania
        }
    }

    /// Accuracy of a play from its hit counts.
    ///
    /// Each ruleset weighs the six judgement categories differently; the
    /// formulas mirror the stable-client definitions. A play with no
    /// judgements counts as perfect.
    pub fn accuracy(&self, hits: &HitCounts) -> f64 {
        let (earned, available) = match self {
            Ruleset::Osu => {
                let total = hits.great + hits.ok + hits.meh + hits.miss;
                (
                    300.0 * hits.great as f64 + 100.0 * hits.ok as f64 + 50.0 * hits.meh as f64,
                    300.0 * total as f64
                )
            }
            Ruleset::Taiko => {
                let total = hits.great + hits.ok + hits.miss;
                (hits.great as f64 + 0.5 * hits.ok as f64, total as f64)
            }
            Ruleset::Catch => {
                // Fruits, drops and tiny drops all weigh the same; `good`
                // carries the tiny-drop miss count and only widens the denominator
                let caught = hits.great + hits.ok + hits.meh;
                ((caught) as f64, (caught + hits.miss + hits.good) as f64)
            }
            Ruleset::Mania => {
                let total = hits.perfect + hits.great + hits.good + hits.ok + hits.meh + hits.miss;
                (
                    300.0 * (hits.perfect + hits.great) as f64
                        + 200.0 * hits.good as f64
                        + 100.0 * hits.ok as f64
                        + 50.0 * hits.meh as f64,
                    300.0 * total as f64
                )
            }
        };

        if available == 0.0 {
            return 1.0;
        }

        earned / available
    }
}
