use crate::{error::ProcessorError, model::score::NormalizedScore};
use rosu_pp::{any::PerformanceAttributes, Beatmap, Difficulty, Performance};
use std::collections::BTreeMap;

/// Outcome of reconciling one play against the local scoring model.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Recomputed total pp
    pub local_pp: f64,
    /// The map's maximum achievable combo under the play's mods
    pub map_max_combo: u32,
    /// Achieved combo as a fraction of the map's maximum
    pub combo_credit: f64,
    /// Named auxiliary values exposed by the performance model
    pub categories: BTreeMap<String, f64>
}

/// Recomputes a play's pp from its normalized score and raw map content.
///
/// Pure function of its inputs, safe to run concurrently across plays.
/// Difficulty attributes are computed from only the difficulty-affecting
/// subset of the play's mods; the performance calculation then runs with the
/// full mod set so score-only mods still contribute their multipliers.
pub fn reconcile(score: &NormalizedScore, raw_map: &[u8]) -> Result<Reconciled, ProcessorError> {
    let map = Beatmap::from_bytes(raw_map).map_err(|e| ProcessorError::Calculation(format!("decoding map: {e}")))?;

    let mode = score.ruleset.game_mode();
    let map = if map.mode == mode {
        map
    } else {
        map.convert(mode, &score.mods.bits().into())
            .map_err(|e| ProcessorError::Calculation(format!("converting map to {:?}: {e}", score.ruleset)))?
    };

    let difficulty = Difficulty::new().mods(score.mods.difficulty_bits()).calculate(&map);
    let map_max_combo = difficulty.max_combo();

    let performance = Performance::new(difficulty)
        .mods(score.mods.bits())
        .lazer(false)
        .combo(score.max_combo)
        .n_geki(score.hits.perfect)
        .n300(score.hits.great)
        .n_katu(score.hits.good)
        .n100(score.hits.ok)
        .n50(score.hits.meh)
        .misses(score.hits.miss)
        .calculate();

    let local_pp = performance.pp();
    if !local_pp.is_finite() {
        return Err(ProcessorError::Calculation(
            "performance model produced a non-finite pp value".to_string()
        ));
    }

    let combo_credit = if map_max_combo == 0 {
        0.0
    } else {
        score.max_combo as f64 / map_max_combo as f64
    };

    Ok(Reconciled {
        local_pp,
        map_max_combo,
        combo_credit,
        categories: categories(&performance)
    })
}

/// Pulls the per-mode named sub-values out of the performance attributes.
fn categories(performance: &PerformanceAttributes) -> BTreeMap<String, f64> {
    let mut categories = BTreeMap::new();

    match performance {
        PerformanceAttributes::Osu(attrs) => {
            categories.insert("aim pp".to_string(), attrs.pp_aim);
            categories.insert("speed pp".to_string(), attrs.pp_speed);
            categories.insert("accuracy pp".to_string(), attrs.pp_acc);
            categories.insert("flashlight pp".to_string(), attrs.pp_flashlight);
            categories.insert("effective misses".to_string(), attrs.effective_miss_count);
        }
        PerformanceAttributes::Taiko(attrs) => {
            categories.insert("difficulty pp".to_string(), attrs.pp_difficulty);
            categories.insert("accuracy pp".to_string(), attrs.pp_acc);
            categories.insert("effective misses".to_string(), attrs.effective_miss_count);
        }
        PerformanceAttributes::Catch(_) => {}
        PerformanceAttributes::Mania(attrs) => {
            categories.insert("difficulty pp".to_string(), attrs.pp_difficulty);
        }
    }

    categories
}
