use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc
};

use futures::{stream, StreamExt, TryStreamExt};
use itertools::Itertools;
use tracing::info;

use crate::{
    api::{api_structs::PlayRecord, OsuApiClient},
    beatmap::{self, MapDescriptor},
    cache::BeatmapCache,
    config::ProcessorConfig,
    error::ProcessorError,
    report::{DisplayPlay, ProfileReport},
    utils::progress_utils::progress_bar
};

use self::{
    ranking::PlaySummary,
    structures::ruleset::Ruleset
};

pub mod aggregate;
pub mod constants;
pub mod performance;
pub mod ranking;
pub mod score;
pub mod structures;

/// What to recalculate.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    /// Numeric user id or username
    pub profile: String,
    pub ruleset: Ruleset
}

/// Everything known about one play after the compute stage, before the
/// orderings are reconciled.
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub play_id: u64,
    pub descriptor: MapDescriptor,
    pub server_pp: f64,
    pub local_pp: f64,
    pub accuracy: f64,
    pub miss_count: u32,
    pub combo: u32,
    pub map_max_combo: u32,
    pub combo_credit: f64,
    pub mods: Vec<String>,
    pub categories: BTreeMap<String, f64>
}

/// Runs the full reconciliation pipeline for one profile.
///
/// Two fork-join stages feed the aggregation: the fetch stage caches every
/// distinct map concurrently (duplicate ids are single-flighted inside the
/// cache), the compute stage recalculates every play on blocking workers in
/// fetch order. Both stages complete for all plays before the aggregator,
/// bonus corrector and ranking diff run, since those need the full set.
pub async fn process_profile(
    api: &OsuApiClient,
    cache: &BeatmapCache,
    config: &ProcessorConfig,
    request: &ProfileRequest
) -> Result<ProfileReport, ProcessorError> {
    info!("Fetching profile {} ({:?})...", request.profile, request.ruleset);
    let user = api.get_user(&request.profile, request.ruleset).await?;

    info!("Fetching top plays for {} (id {})...", user.username, user.id);
    let records = api.get_top_plays(user.id, request.ruleset).await?;
    info!("Fetched {} top plays", records.len());

    // Fetch stage: fan out over distinct map ids, keep the raw content
    // around since several plays may share a map
    let map_ids = records.iter().map(|record| record.beatmap.id).unique().collect_vec();
    let bar = progress_bar(map_ids.len() as u64, "Caching beatmaps".to_string());
    let map_contents: HashMap<u32, Arc<Vec<u8>>> = stream::iter(map_ids.into_iter().map(|map_id| {
        let bar = bar.clone();
        async move {
            let path = cache.ensure(map_id).await?;
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| ProcessorError::Fetch(format!("reading cached map {map_id}: {e}")))?;

            bar.inc(1);
            Ok::<_, ProcessorError>((map_id, Arc::new(bytes)))
        }
    }))
    .buffer_unordered(config.fetch_concurrency)
    .try_collect()
    .await?;
    bar.finish();

    // Compute stage: pure per-play work on blocking workers. `buffered`
    // keeps completion in fetch order so tie-breaks stay deterministic.
    let ruleset = request.ruleset;
    let bar = progress_bar(records.len() as u64, "Recalculating plays".to_string());
    let outcomes: Vec<PlayOutcome> = stream::iter(records.iter().map(|record| {
        let record = record.clone();
        let raw_map = map_contents.get(&record.beatmap.id).cloned();
        let bar = bar.clone();
        async move {
            let raw_map = raw_map.ok_or_else(|| {
                ProcessorError::Fetch(format!("map {} missing after fetch stage", record.beatmap.id))
            })?;

            let outcome = tokio::task::spawn_blocking(move || evaluate_play(&record, &raw_map, ruleset))
                .await
                .map_err(|e| ProcessorError::Calculation(format!("play evaluation task failed: {e}")))??;

            bar.inc(1);
            Ok::<_, ProcessorError>(outcome)
        }
    }))
    .buffered(config.compute_concurrency)
    .try_collect()
    .await?;
    bar.finish();

    assemble_report(&user.username, user.statistics.pp, outcomes, config.decay_base)
}

/// Evaluates a single play: identity descriptor, normalized score, then the
/// local performance reconciliation.
fn evaluate_play(record: &PlayRecord, raw_map: &[u8], ruleset: Ruleset) -> Result<PlayOutcome, ProcessorError> {
    let descriptor = beatmap::descriptor(record.beatmap.id, raw_map)?;
    let normalized = score::reconstruct(record, ruleset);
    let reconciled = performance::reconcile(&normalized, raw_map)?;

    Ok(PlayOutcome {
        play_id: record.id,
        descriptor,
        server_pp: record.pp,
        local_pp: reconciled.local_pp,
        accuracy: normalized.accuracy,
        miss_count: normalized.hits.miss,
        combo: normalized.max_combo,
        map_max_combo: reconciled.map_max_combo,
        combo_credit: reconciled.combo_credit,
        mods: normalized.mods.acronyms(),
        categories: reconciled.categories
    })
}

/// Joins the computed plays into the final report: rank deltas, weighted
/// totals for both orderings and the bonus correction.
pub fn assemble_report(
    username: &str,
    total_server_pp: f64,
    outcomes: Vec<PlayOutcome>,
    decay_base: f64
) -> Result<ProfileReport, ProcessorError> {
    let summaries = outcomes
        .iter()
        .map(|outcome| PlaySummary {
            id: outcome.play_id,
            server_pp: outcome.server_pp,
            local_pp: outcome.local_pp
        })
        .collect_vec();

    let diffs = ranking::diff(&summaries)?;

    let server_ordered = ordered_desc(&outcomes, |outcome| outcome.server_pp);
    let local_ordered = ordered_desc(&outcomes, |outcome| outcome.local_pp);
    let correction = aggregate::correct_for_bonus(total_server_pp, &server_ordered, &local_ordered, decay_base);

    // Report rows follow the recomputed ordering
    let mut scores = outcomes;
    scores.sort_by(|a, b| b.local_pp.partial_cmp(&a.local_pp).unwrap_or(Ordering::Equal));

    let scores = scores
        .into_iter()
        .map(|outcome| {
            let diff = diffs[&outcome.play_id];

            DisplayPlay {
                map_id: outcome.descriptor.map_id,
                map_name: outcome.descriptor.name,
                combo: outcome.combo,
                max_combo: outcome.map_max_combo,
                combo_credit: outcome.combo_credit,
                accuracy: outcome.accuracy,
                miss_count: outcome.miss_count,
                mods: outcome.mods,
                server_pp: outcome.server_pp,
                local_pp: outcome.local_pp,
                pp_delta: diff.pp_delta,
                position_delta: diff.position_delta,
                categories: outcome.categories
            }
        })
        .collect_vec();

    Ok(ProfileReport {
        username: username.to_string(),
        total_server_pp,
        total_local_pp: correction.corrected_local_total,
        bonus_pp: correction.bonus_pp,
        scores
    })
}

/// The pp values of one ordering, descending, ties in fetch order.
fn ordered_desc(outcomes: &[PlayOutcome], key: impl Fn(&PlayOutcome) -> f64) -> Vec<f64> {
    let mut pps = outcomes.iter().map(key).collect_vec();
    pps.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    pps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::generate_outcome;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_assemble_report_worked_example() {
        // Arrange: server pp [300, 200], local recompute reorders to [260, 250]
        let outcomes = vec![
            generate_outcome(1, 100, 300.0, 250.0),
            generate_outcome(2, 101, 200.0, 260.0),
        ];

        // Act
        let report = assemble_report("peppy", 700.0, outcomes, 0.95).unwrap();

        // Assert: weighted totals 490 (server) and 497.5 (local), bonus 210
        assert_abs_diff_eq!(report.bonus_pp, 210.0);
        assert_abs_diff_eq!(report.total_local_pp, 497.5 + 210.0);
        assert_eq!(report.scores.len(), 2);

        // Rows follow the recomputed ordering
        assert_eq!(report.scores[0].map_id, 101);
        assert_eq!(report.scores[0].position_delta, 1);
        assert_eq!(report.scores[1].map_id, 100);
        assert_eq!(report.scores[1].position_delta, -1);
    }

    #[test]
    fn test_assemble_report_empty_profile() {
        let report = assemble_report("newcomer", 0.0, vec![], 0.95).unwrap();

        assert_eq!(report.scores.len(), 0);
        assert_abs_diff_eq!(report.bonus_pp, 0.0);
        assert_abs_diff_eq!(report.total_local_pp, 0.0);
    }

    #[test]
    fn test_assemble_report_position_deltas_sum_to_zero() {
        let outcomes = vec![
            generate_outcome(1, 100, 500.0, 350.0),
            generate_outcome(2, 101, 450.0, 470.0),
            generate_outcome(3, 102, 400.0, 410.0),
            generate_outcome(4, 103, 350.0, 500.0),
        ];

        let report = assemble_report("peppy", 2000.0, outcomes, 0.95).unwrap();
        let sum: i64 = report.scores.iter().map(|row| row.position_delta).sum();

        assert_eq!(sum, 0);
    }
}
