//! Jittered scores for synthetic seed data.
//!
//! Nothing in the ranking path calls into this module; production scores are
//! always the deterministic output of [`CompatibilityEngine`](crate::core::CompatibilityEngine).

use rand::Rng;

use crate::models::{GearCaseMatch, MatchResult};

/// Maximum absolute jitter applied to a simulated score
pub const MAX_JITTER: i16 = 5;

/// Overall score with uniform jitter in `[-MAX_JITTER, MAX_JITTER]`, clamped to 0-100
///
/// Infeasible results stay at 0.
pub fn simulate_score<R: Rng>(result: &MatchResult, rng: &mut R) -> u8 {
    if !result.is_feasible() {
        return 0;
    }
    let jitter = rng.gen_range(-MAX_JITTER..=MAX_JITTER);
    (result.compatibility_score as i16 + jitter).clamp(0, 100) as u8
}

/// Seed record for a result, carrying a jittered overall score
pub fn simulate_match<R: Rng>(result: &MatchResult, rng: &mut R) -> GearCaseMatch {
    let mut record = GearCaseMatch::from(result);
    record.compatibility_score = simulate_score(result, rng);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Axis, Infeasibility};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result(score: u8) -> MatchResult {
        MatchResult {
            gear_id: "gear-1".to_string(),
            case_id: "case-1".to_string(),
            compatibility_score: score,
            dimension_score: score,
            protection_score: 50,
            brand_score: 50,
            infeasibility: None,
        }
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = result(72);
        for _ in 0..500 {
            let score = simulate_score(&base, &mut rng);
            assert!((67..=77).contains(&score));
        }
    }

    #[test]
    fn test_jitter_clamped_at_edges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(simulate_score(&result(98), &mut rng) <= 100);
            assert!(simulate_score(&result(2), &mut rng) <= 7);
        }
    }

    #[test]
    fn test_infeasible_stays_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut base = result(0);
        base.infeasibility = Some(Infeasibility::Oversize { axes: vec![Axis::Length] });
        for _ in 0..50 {
            assert_eq!(simulate_score(&base, &mut rng), 0);
        }
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let base = result(60);
        let first: Vec<u8> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| simulate_score(&base, &mut rng)).collect()
        };
        let second: Vec<u8> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| simulate_score(&base, &mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_simulate_match_keeps_sub_scores() {
        let mut rng = StdRng::seed_from_u64(5);
        let record = simulate_match(&result(80), &mut rng);
        assert_eq!(record.dimension_score, 80);
        assert_eq!(record.feature_score, 50);
        assert!((75..=85).contains(&record.compatibility_score));
    }
}
