use crate::error::ProcessorError;
use std::{cmp::Ordering, collections::HashMap};

/// The two pp values of one play that the orderings are built from.
#[derive(Debug, Clone, Copy)]
pub struct PlaySummary {
    /// Play identity (the service's score id)
    pub id: u64,
    pub server_pp: f64,
    pub local_pp: f64
}

/// A play's position in both orderings and its deltas between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankDiff {
    /// 0-indexed rank in the server-pp ordering
    pub server_rank: usize,
    /// 0-indexed rank in the local-pp ordering
    pub local_rank: usize,
    /// `server_rank - local_rank`; positive means the play ranks higher once
    /// recomputed locally than it does on the server, negative means it drops
    pub position_delta: i64,
    /// `local_pp - server_pp`
    pub pp_delta: f64
}

/// Computes each play's rank and pp delta between the server-reported and
/// the recomputed ordering.
///
/// Both orderings are descending stable sorts over the same underlying set,
/// so ties keep their original fetch order and the position deltas over all
/// plays always sum to zero. Duplicate identities would make the rank maps
/// ambiguous and are rejected.
pub fn diff(plays: &[PlaySummary]) -> Result<HashMap<u64, RankDiff>, ProcessorError> {
    let server_ranks = rank_map(plays, |play| play.server_pp);
    let local_ranks = rank_map(plays, |play| play.local_pp);

    // Set equality between the orderings: same cardinality, same identities
    if server_ranks.len() != plays.len() || local_ranks.len() != plays.len() {
        return Err(ProcessorError::Calculation(
            "duplicate play identity, orderings are not permutations of the same set".to_string()
        ));
    }

    let mut diffs = HashMap::with_capacity(plays.len());
    for play in plays {
        let server_rank = server_ranks[&play.id];
        let local_rank = local_ranks[&play.id];

        diffs.insert(
            play.id,
            RankDiff {
                server_rank,
                local_rank,
                position_delta: server_rank as i64 - local_rank as i64,
                pp_delta: play.local_pp - play.server_pp
            }
        );
    }

    Ok(diffs)
}

/// Builds the identity -> rank map for one descending ordering. Built once
/// per ordering so delta lookups are O(1) instead of a scan per play.
fn rank_map(plays: &[PlaySummary], key: impl Fn(&PlaySummary) -> f64) -> HashMap<u64, usize> {
    let mut indices: Vec<usize> = (0..plays.len()).collect();
    indices.sort_by(|&a, &b| {
        key(&plays[b])
            .partial_cmp(&key(&plays[a]))
            .unwrap_or(Ordering::Equal)
    });

    indices
        .into_iter()
        .enumerate()
        .map(|(rank, index)| (plays[index].id, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::generate_play_summary;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_worked_example_deltas() {
        // Arrange: local recompute reorders the two plays
        let plays = vec![
            generate_play_summary(1, 300.0, 250.0),
            generate_play_summary(2, 200.0, 260.0),
        ];

        // Act
        let diffs = diff(&plays).unwrap();

        // Assert: play 1 drops locally (negative), play 2 climbs (positive)
        assert_eq!(diffs[&1].position_delta, -1);
        assert_eq!(diffs[&2].position_delta, 1);
        assert!(diffs[&2].local_rank < diffs[&2].server_rank);
        assert_abs_diff_eq!(diffs[&1].pp_delta, -50.0);
        assert_abs_diff_eq!(diffs[&2].pp_delta, 60.0);
    }

    #[test]
    fn test_position_deltas_sum_to_zero() {
        let plays = vec![
            generate_play_summary(1, 500.0, 350.0),
            generate_play_summary(2, 450.0, 470.0),
            generate_play_summary(3, 400.0, 410.0),
            generate_play_summary(4, 350.0, 500.0),
            generate_play_summary(5, 300.0, 290.0),
        ];

        let diffs = diff(&plays).unwrap();
        let sum: i64 = diffs.values().map(|d| d.position_delta).sum();

        assert_eq!(sum, 0);
    }

    #[test]
    fn test_identical_orderings_have_zero_deltas() {
        let plays = vec![
            generate_play_summary(1, 300.0, 300.0),
            generate_play_summary(2, 200.0, 200.0),
        ];

        let diffs = diff(&plays).unwrap();

        assert_eq!(diffs[&1].position_delta, 0);
        assert_eq!(diffs[&2].position_delta, 0);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let plays = vec![
            generate_play_summary(10, 200.0, 100.0),
            generate_play_summary(11, 200.0, 100.0),
        ];

        let diffs = diff(&plays).unwrap();

        // Stable sort: the play fetched first stays ranked first in both orderings
        assert_eq!(diffs[&10].server_rank, 0);
        assert_eq!(diffs[&10].local_rank, 0);
        assert_eq!(diffs[&11].server_rank, 1);
        assert_eq!(diffs[&11].local_rank, 1);
    }

    #[test]
    fn test_duplicate_identity_is_rejected() {
        let plays = vec![
            generate_play_summary(1, 300.0, 250.0),
            generate_play_summary(1, 200.0, 260.0),
        ];

        let result = diff(&plays);

        assert!(matches!(result, Err(ProcessorError::Calculation(_))));
    }
}
