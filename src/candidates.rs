//! Candidate generation: frontier of size-k itemsets to size-(k+1) candidates

use crate::itemset::ItemSet;
use rustc_hash::FxHashSet;

/// How the frontier is joined with itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Join itemsets sharing their first k-1 items, then drop candidates
    /// with an infrequent k-subset
    #[default]
    Prefix,
    /// Extend every frontier itemset by every item seen in the frontier
    SelfJoin,
}

/// Generate the distinct size-(k+1) candidates for a frontier of size-k itemsets
pub fn generate_candidates(frontier: &[ItemSet], strategy: JoinStrategy) -> Vec<ItemSet> {
    match strategy {
        JoinStrategy::Prefix => prefix_join(frontier),
        JoinStrategy::SelfJoin => self_join(frontier),
    }
}

fn self_join(frontier: &[ItemSet]) -> Vec<ItemSet> {
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();

    for a in frontier {
        for b in frontier {
            for item in b {
                if a.contains(item) {
                    continue;
                }
                let candidate = a.with(item);
                debug_assert_eq!(candidate.len(), a.len() + 1);
                if seen.insert(candidate.clone()) {
                    candidates.push(candidate);
                }
            }
        }
    }

    candidates
}

fn prefix_join(frontier: &[ItemSet]) -> Vec<ItemSet> {
    let mut sorted: Vec<(Vec<usize>, &ItemSet)> =
        frontier.iter().map(|set| (set.to_vec(), set)).collect();
    sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    sorted.dedup_by(|a, b| a.0 == b.0);

    let known: FxHashSet<&ItemSet> = frontier.iter().collect();
    let mut candidates = Vec::new();

    for (i, (items_a, set_a)) in sorted.iter().enumerate() {
        let Some((&last_a, prefix_a)) = items_a.split_last() else {
            continue;
        };
        for (items_b, _) in &sorted[i + 1..] {
            let Some((&last_b, prefix_b)) = items_b.split_last() else {
                continue;
            };
            // Sorted order keeps equal prefixes contiguous
            if prefix_a != prefix_b {
                break;
            }
            debug_assert!(last_a < last_b);
            let candidate = set_a.with(last_b);
            if all_subsets_known(&candidate, &known) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn all_subsets_known(candidate: &ItemSet, known: &FxHashSet<&ItemSet>) -> bool {
    candidate
        .iter()
        .all(|item| known.contains(&candidate.without(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(universe: usize, items: &[&[usize]]) -> Vec<ItemSet> {
        items
            .iter()
            .map(|items| ItemSet::from_items(universe, items.iter().copied()))
            .collect()
    }

    fn sorted_vecs(candidates: &[ItemSet]) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = candidates.iter().map(ItemSet::to_vec).collect();
        out.sort();
        out
    }

    #[test]
    fn test_singletons_join_to_all_pairs() {
        let frontier = sets(5, &[&[0], &[2], &[4]]);
        let expected = vec![vec![0, 2], vec![0, 4], vec![2, 4]];

        assert_eq!(
            sorted_vecs(&generate_candidates(&frontier, JoinStrategy::Prefix)),
            expected
        );
        assert_eq!(
            sorted_vecs(&generate_candidates(&frontier, JoinStrategy::SelfJoin)),
            expected
        );
    }

    #[test]
    fn test_self_join_order_and_dedup() {
        let frontier = sets(3, &[&[0], &[1], &[2]]);
        let candidates = generate_candidates(&frontier, JoinStrategy::SelfJoin);
        let got: Vec<Vec<usize>> = candidates.iter().map(ItemSet::to_vec).collect();
        // First-generation order, duplicates dropped
        assert_eq!(got, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_self_join_extends_with_any_frontier_item() {
        let frontier = sets(4, &[&[0, 1], &[2, 3]]);
        let got = sorted_vecs(&generate_candidates(&frontier, JoinStrategy::SelfJoin));
        assert_eq!(
            got,
            vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]]
        );
    }

    #[test]
    fn test_prefix_join_prunes_unsupported_subsets() {
        // {1,2} missing, so {0,1,2} cannot be frequent
        let frontier = sets(4, &[&[0, 1], &[0, 2], &[0, 3], &[1, 3], &[2, 3]]);
        let got = sorted_vecs(&generate_candidates(&frontier, JoinStrategy::Prefix));
        assert_eq!(got, vec![vec![0, 1, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn test_prefix_join_without_shared_prefix() {
        let frontier = sets(4, &[&[0, 1], &[2, 3]]);
        assert!(generate_candidates(&frontier, JoinStrategy::Prefix).is_empty());
    }

    #[test]
    fn test_empty_frontier() {
        assert!(generate_candidates(&[], JoinStrategy::Prefix).is_empty());
        assert!(generate_candidates(&[], JoinStrategy::SelfJoin).is_empty());
    }
}
