//! Roster snapshot diffing.

use std::collections::BTreeSet;

/// The set of players known to be online at one point in time.
///
/// Names are compared by exact string match; no case or whitespace
/// normalization is applied. Ordered so messages built from a batch render
/// in a stable order.
pub type PlayerSet = BTreeSet<String>;

/// The join/leave transitions computed from one observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionBatch {
    /// Players present in the observation but not in the previous set.
    pub joined: PlayerSet,
    /// Players in the previous set but absent from the observation.
    pub left: PlayerSet,
}

impl TransitionBatch {
    /// True when the observation matched the previous state exactly.
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// Compute the transitions between the previously known set and a freshly
/// observed roster.
///
/// After a successful observation the caller must replace its known set with
/// `observed` wholesale; full replacement keeps the tracked state
/// self-healing when a cycle was skipped on a transient error. A name never
/// appears in both `joined` and `left` of the same batch.
pub fn diff(previous: &PlayerSet, observed: &PlayerSet) -> TransitionBatch {
    TransitionBatch {
        joined: observed.difference(previous).cloned().collect(),
        left: previous.difference(observed).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> PlayerSet {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_initial_snapshot_reports_everyone_joined() {
        let batch = diff(&PlayerSet::new(), &set(&["alice", "bob"]));
        assert_eq!(batch.joined, set(&["alice", "bob"]));
        assert!(batch.left.is_empty());
    }

    #[test]
    fn test_departure_detected() {
        let batch = diff(&set(&["alice", "bob"]), &set(&["bob"]));
        assert!(batch.joined.is_empty());
        assert_eq!(batch.left, set(&["alice"]));
    }

    #[test]
    fn test_identical_roster_yields_empty_batch() {
        let roster = set(&["alice"]);
        let batch = diff(&roster, &roster);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_rediff_with_same_roster_is_idempotent() {
        let observed = set(&["alice", "carol"]);
        let first = diff(&set(&["alice"]), &observed);
        assert_eq!(first.joined, set(&["carol"]));

        // The driver replaces its state with the observed set, so a second
        // diff against the same roster must be a no-op.
        let second = diff(&observed, &observed);
        assert!(second.is_empty());
    }

    #[test]
    fn test_empty_roster_reports_everyone_left() {
        let batch = diff(&set(&["alice", "bob"]), &PlayerSet::new());
        assert!(batch.joined.is_empty());
        assert_eq!(batch.left, set(&["alice", "bob"]));
    }

    #[test]
    fn test_joined_and_left_are_disjoint() {
        let batch = diff(&set(&["alice", "bob"]), &set(&["bob", "carol"]));
        assert_eq!(batch.joined, set(&["carol"]));
        assert_eq!(batch.left, set(&["alice"]));
        assert!(batch.joined.intersection(&batch.left).next().is_none());
    }

    #[test]
    fn test_full_replacement_heals_skewed_state() {
        // Whatever the previous set claims, one successful observation
        // brings the reported transitions and the next state in line.
        let batch = diff(&set(&["ghost"]), &set(&["alice"]));
        assert_eq!(batch.joined, set(&["alice"]));
        assert_eq!(batch.left, set(&["ghost"]));
    }

    #[test]
    fn test_names_are_compared_exactly() {
        let batch = diff(&set(&["Alice"]), &set(&["alice"]));
        assert_eq!(batch.joined, set(&["alice"]));
        assert_eq!(batch.left, set(&["Alice"]));
    }
}
