/// Combines an ordered list of pp values into a single rank-decayed total.
///
/// The play at position `i` (0 = highest) contributes `base^i * pp_i`, so
/// the sequence must already be sorted descending by the relevant pp field.
/// The result is order-sensitive: the server-pp ordering and the local-pp
/// ordering generally differ and must each be aggregated independently.
pub fn weighted_total(ordered_pps: &[f64], decay_base: f64) -> f64 {
    ordered_pps
        .iter()
        .enumerate()
        .map(|(i, pp)| decay_base.powi(i as i32) * pp)
        .sum()
}

/// Result of folding the unmodeled bonus contribution into the local total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusCorrection {
    /// The portion of the server total not explained by the top-N weighted
    /// plays; models volume-based pp from plays beyond the top-N window
    pub bonus_pp: f64,
    /// Local weighted total with the bonus folded in
    pub corrected_local_total: f64
}

/// Estimates the bonus pp against the server ordering and applies it to the
/// recomputed ordering's total.
///
/// The bonus is estimated from one ordering and folded into the other's
/// aggregate. That mix is a known rough approximation carried over on
/// purpose; both orderings use the same decay base.
pub fn correct_for_bonus(
    total_server_pp: f64,
    server_ordered_pps: &[f64],
    local_ordered_pps: &[f64],
    decay_base: f64
) -> BonusCorrection {
    let bonus_pp = total_server_pp - weighted_total(server_ordered_pps, decay_base);

    BonusCorrection {
        bonus_pp,
        corrected_local_total: weighted_total(local_ordered_pps, decay_base) + bonus_pp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constants::DECAY_BASE;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weighted_total_two_plays() {
        // Worked example: 300 + 0.95 * 200
        let total = weighted_total(&[300.0, 200.0], DECAY_BASE);

        assert_abs_diff_eq!(total, 490.0);
    }

    #[test]
    fn test_weighted_total_reordered_plays() {
        // Same multiset, local recompute reorders them: 260 + 0.95 * 250
        let total = weighted_total(&[260.0, 250.0], DECAY_BASE);

        assert_abs_diff_eq!(total, 497.5);
    }

    #[test]
    fn test_weighted_total_is_order_sensitive() {
        let ascending = weighted_total(&[100.0, 200.0, 300.0], DECAY_BASE);
        let descending = weighted_total(&[300.0, 200.0, 100.0], DECAY_BASE);

        assert_ne!(ascending, descending);
    }

    #[test]
    fn test_weighted_total_empty_sequence() {
        assert_eq!(weighted_total(&[], DECAY_BASE), 0.0);
    }

    #[test]
    fn test_weight_decays_per_position() {
        let total = weighted_total(&[100.0, 100.0, 100.0], 0.5);

        assert_abs_diff_eq!(total, 100.0 + 50.0 + 25.0);
    }

    #[test]
    fn test_bonus_is_exact_gap_to_server_total() {
        // Arrange
        let server_ordered = [300.0, 200.0];
        let local_ordered = [260.0, 250.0];

        // Act
        let correction = correct_for_bonus(700.0, &server_ordered, &local_ordered, DECAY_BASE);

        // Assert
        assert_abs_diff_eq!(correction.bonus_pp, 700.0 - 490.0);
        assert_abs_diff_eq!(correction.corrected_local_total, 497.5 + 210.0);
    }

    #[test]
    fn test_bonus_can_be_negative() {
        let correction = correct_for_bonus(400.0, &[300.0, 200.0], &[300.0, 200.0], DECAY_BASE);

        assert_abs_diff_eq!(correction.bonus_pp, -90.0);
        assert_abs_diff_eq!(correction.corrected_local_total, 400.0);
    }
}
