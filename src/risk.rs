//! Cascading risk kernels
//!
//! P(Success_n) = (1 - min(1, P_local * mu)) * Product(P(Success_parent))

/// Probability that a node succeeds, given its own failure probability
/// scaled by a multiplier and the success probabilities of its parents.
///
/// The local term saturates: P_local * mu is capped at 1.0 so the local
/// success term never goes negative. An empty parent slice contributes
/// the multiplicative identity, so a root succeeds on its local term
/// alone. Parent probabilities are not range-checked.
pub fn propagate_risk(local_failure_prob: f32, multiplier: f32, parent_probs: &[f32]) -> f32 {
    let local_p_success = 1.0 - 1.0f32.min(local_failure_prob * multiplier);
    let parent_p_success: f32 = parent_probs.iter().product();
    local_p_success * parent_p_success
}

/// Failure-probability view of [`propagate_risk`] used by graph
/// propagation, where parents carry risk scores instead of success
/// probabilities:
///
/// R_n = 1 - [(1 - min(1, P_local * mu)) * Product(1 - R_parent)]
///
/// The result is kept in [0, 1].
pub fn calculate_topological_risk(
    local_failure_prob: f32,
    multiplier: f32,
    parent_risks: &[f32],
) -> f32 {
    let parent_success: f32 = parent_risks.iter().map(|r| 1.0 - r).product();
    let local_success = 1.0 - 1.0f32.min(local_failure_prob * multiplier);
    (1.0 - local_success * parent_success).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_no_parents_is_local_term_only() {
        assert!((propagate_risk(0.3, 1.0, &[]) - 0.7).abs() < EPS);
        assert!((propagate_risk(0.25, 2.0, &[]) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_zero_local_failure_is_pure_parent_product() {
        let parents = [0.9, 0.5, 0.8];
        let expected: f32 = parents.iter().product();
        assert!((propagate_risk(0.0, 7.0, &parents) - expected).abs() < EPS);
    }

    #[test]
    fn test_two_parent_chain() {
        // (1 - 0.2) * 0.9 * 0.8 = 0.576
        let p = propagate_risk(0.2, 1.0, &[0.9, 0.8]);
        assert!((p - 0.576).abs() < EPS);
    }

    #[test]
    fn test_local_failure_saturates_at_one() {
        assert_eq!(propagate_risk(2.0, 1.0, &[]), 0.0);
        assert_eq!(propagate_risk(0.5, 4.0, &[0.9]), 0.0);
    }

    #[test]
    fn test_monotone_in_parent_probability() {
        let base = propagate_risk(0.1, 1.0, &[0.9, 0.8]);
        let worse = propagate_risk(0.1, 1.0, &[0.9, 0.4]);
        let worst = propagate_risk(0.1, 1.0, &[0.9, 0.0]);
        assert!(base > worse);
        assert!(worse > worst);
        assert_eq!(worst, 0.0);
    }

    #[test]
    fn test_topological_risk_no_parents() {
        // 1 - (1 - 0.3 * 1.2) = 0.36
        let r = calculate_topological_risk(0.3, 1.2, &[]);
        assert!((r - 0.36).abs() < EPS);
    }

    #[test]
    fn test_topological_risk_one_parent() {
        // 1 - (0.64 * 0.5) = 0.68
        let r = calculate_topological_risk(0.3, 1.2, &[0.5]);
        assert!((r - 0.68).abs() < EPS);
    }

    #[test]
    fn test_topological_risk_stays_in_unit_interval() {
        assert_eq!(calculate_topological_risk(5.0, 1.0, &[]), 1.0);
        assert_eq!(calculate_topological_risk(0.0, 1.0, &[]), 0.0);
        let r = calculate_topological_risk(1.0, 1.0, &[1.0, 1.0]);
        assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn test_views_agree() {
        // Success view and risk view describe the same event.
        let parent_risks = [0.44, 0.28];
        let parent_probs: Vec<f32> = parent_risks.iter().map(|r| 1.0 - r).collect();
        let success = propagate_risk(0.3, 1.2, &parent_probs);
        let risk = calculate_topological_risk(0.3, 1.2, &parent_risks);
        assert!((success - (1.0 - risk)).abs() < EPS);
    }
}
