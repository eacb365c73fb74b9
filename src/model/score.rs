use crate::{
    api::api_structs::PlayRecord,
    model::structures::{mods::ResolvedMods, ruleset::Ruleset}
};

/// The six fixed judgement categories, from best to worst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub ok: u32,
    pub meh: u32,
    pub miss: u32
}

impl HitCounts {
    pub fn total(&self) -> u32 {
        self.perfect + self.great + self.good + self.ok + self.meh + self.miss
    }
}

/// A play translated into the scoring model's vocabulary: resolved mod
/// objects instead of acronym strings, the six fixed hit categories and an
/// accuracy derived by the ruleset. Exactly one per [`PlayRecord`].
#[derive(Debug, Clone)]
pub struct NormalizedScore {
    pub ruleset: Ruleset,
    pub total_score: u64,
    pub max_combo: u32,
    pub mods: ResolvedMods,
    pub hits: HitCounts,
    pub accuracy: f64
}

/// Converts one raw play record into a normalized, ruleset-consistent score.
///
/// Mod acronyms are resolved against the catalog (unmatched ones are
/// dropped), the hit categories are populated directly from the record, and
/// accuracy is delegated to the ruleset since category weighting differs per
/// mode. Parse failures surface earlier, at the schema boundary.
pub fn reconstruct(record: &PlayRecord, ruleset: Ruleset) -> NormalizedScore {
    let mods = ResolvedMods::resolve(&record.mods);

    let hits = HitCounts {
        perfect: record.statistics.count_geki.unwrap_or(0),
        great: record.statistics.count_300,
        good: record.statistics.count_katu.unwrap_or(0),
        ok: record.statistics.count_100,
        meh: record.statistics.count_50.unwrap_or(0),
        miss: record.statistics.count_miss
    };

    let accuracy = ruleset.accuracy(&hits);

    NormalizedScore {
        ruleset,
        total_score: record.score,
        max_combo: record.max_combo,
        mods,
        hits,
        accuracy
    }
}
