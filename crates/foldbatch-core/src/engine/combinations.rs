use super::config::GenerationMode;
use super::context::RunContext;
use itertools::{Either, Itertools};
use tracing::warn;

/// A candidate job: entity names in participant order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    members: Vec<String>,
}

impl Combination {
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    /// Participants in the order used for naming and role assignment.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sorted member names; equal canonical forms denote the same job.
    pub fn canonical(&self) -> Vec<String> {
        let mut canonical = self.members.clone();
        canonical.sort();
        canonical
    }
}

/// Lazily enumerates raw candidates for `mode`, without deduplication.
///
/// An empty list of key lists yields nothing in either mode. In collapsed mode an empty
/// dimension yields nothing either.
pub fn raw_candidates(
    key_lists: &[Vec<String>],
    mode: GenerationMode,
) -> impl Iterator<Item = Combination> + '_ {
    match mode {
        GenerationMode::Cartesian if key_lists.is_empty() => {
            Either::Left(Either::Left(std::iter::empty::<Combination>()))
        }
        GenerationMode::Cartesian => Either::Left(Either::Right(
            key_lists
                .iter()
                .map(|keys| keys.iter().cloned())
                .multi_cartesian_product()
                .map(Combination::new),
        )),
        GenerationMode::Collapsed => Either::Right(key_lists.iter().enumerate().filter_map(
            |(index, keys)| {
                if keys.is_empty() {
                    warn!("Dimension {} is empty and yields no collapsed job.", index);
                    None
                } else {
                    Some(Combination::new(keys.clone()))
                }
            },
        )),
    }
}

/// Enumerates candidates and keeps the first of every canonical form.
///
/// Canonical forms are recorded in `ctx`, so a candidate already produced earlier in the
/// same run (by any mode or call) is skipped as well.
pub fn generate<'a>(
    key_lists: &'a [Vec<String>],
    mode: GenerationMode,
    ctx: &'a mut RunContext,
) -> impl Iterator<Item = Combination> + 'a {
    raw_candidates(key_lists, mode).filter(move |combination| ctx.admit(combination.canonical()))
}

/// Number of raw candidates before deduplication, saturating at `u128::MAX`.
pub fn raw_candidate_count(key_lists: &[Vec<String>], mode: GenerationMode) -> u128 {
    match mode {
        GenerationMode::Cartesian if key_lists.is_empty() => 0,
        GenerationMode::Cartesian => key_lists
            .iter()
            .try_fold(1u128, |acc, keys| acc.checked_mul(keys.len() as u128))
            .unwrap_or(u128::MAX),
        GenerationMode::Collapsed => key_lists.iter().filter(|keys| !keys.is_empty()).count() as u128,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn lists(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|keys| keys.iter().map(|k| k.to_string()).collect())
            .collect()
    }

    fn names(combos: &[Combination]) -> Vec<Vec<&str>> {
        combos
            .iter()
            .map(|c| c.members().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn cartesian_mode_deduplicates_by_canonical_form() {
        let keys = lists(&[&["A", "B"], &["A", "C"]]);
        let mut ctx = RunContext::default();
        let combos: Vec<_> = generate(&keys, GenerationMode::Cartesian, &mut ctx).collect();
        assert_eq!(
            names(&combos),
            vec![vec!["A", "A"], vec!["A", "C"], vec!["B", "A"], vec!["B", "C"]]
        );
        assert_eq!(ctx.unique_combinations(), 4);
    }

    #[test]
    fn cartesian_mode_skips_permutations_of_seen_jobs() {
        let keys = lists(&[&["A", "B"], &["A", "B"]]);
        let mut ctx = RunContext::default();
        let combos: Vec<_> = generate(&keys, GenerationMode::Cartesian, &mut ctx).collect();
        assert_eq!(names(&combos), vec![vec!["A", "A"], vec!["A", "B"], vec!["B", "B"]]);
        assert_eq!(raw_candidate_count(&keys, GenerationMode::Cartesian), 4);
    }

    #[test]
    fn collapsed_mode_yields_one_job_per_distinct_dimension() {
        let keys = lists(&[&["A", "B"], &["A", "C"], &["B", "A"], &[]]);
        let mut ctx = RunContext::default();
        let combos: Vec<_> = generate(&keys, GenerationMode::Collapsed, &mut ctx).collect();
        assert_eq!(names(&combos), vec![vec!["A", "B"], vec!["A", "C"]]);
        assert_eq!(raw_candidate_count(&keys, GenerationMode::Collapsed), 3);
    }

    #[test]
    fn empty_dimension_list_yields_nothing_in_both_modes() {
        let keys: Vec<Vec<String>> = vec![];
        for mode in [GenerationMode::Cartesian, GenerationMode::Collapsed] {
            let mut ctx = RunContext::default();
            assert_eq!(generate(&keys, mode, &mut ctx).count(), 0);
            assert_eq!(raw_candidate_count(&keys, mode), 0);
        }
    }

    #[test]
    fn an_empty_dimension_empties_the_cartesian_product() {
        let keys = lists(&[&["A"], &[]]);
        let mut ctx = RunContext::default();
        assert_eq!(generate(&keys, GenerationMode::Cartesian, &mut ctx).count(), 0);
        assert_eq!(raw_candidate_count(&keys, GenerationMode::Cartesian), 0);
    }

    fn canonical_set(keys: &[Vec<String>], mode: GenerationMode) -> HashSet<Vec<String>> {
        let mut ctx = RunContext::default();
        generate(keys, mode, &mut ctx)
            .map(|c| c.canonical())
            .collect()
    }

    proptest! {
        #[test]
        fn canonical_forms_are_invariant_under_key_permutation(
            raw in prop::collection::vec(
                prop::collection::btree_set("[A-E]", 1..4),
                0..4,
            ),
            rotation in 0usize..4,
        ) {
            let keys: Vec<Vec<String>> = raw.iter().map(|s| s.iter().cloned().collect()).collect();
            let permuted: Vec<Vec<String>> = keys
                .iter()
                .map(|k| {
                    let mut k = k.clone();
                    let len = k.len();
                    k.rotate_left(rotation % len);
                    k.reverse();
                    k
                })
                .collect();
            for mode in [GenerationMode::Cartesian, GenerationMode::Collapsed] {
                prop_assert_eq!(canonical_set(&keys, mode), canonical_set(&permuted, mode));
            }
        }

        #[test]
        fn unique_count_never_exceeds_raw_product(
            raw in prop::collection::vec(
                prop::collection::btree_set("[A-D]", 1..4),
                1..4,
            ),
        ) {
            let keys: Vec<Vec<String>> = raw.iter().map(|s| s.iter().cloned().collect()).collect();
            let unique = canonical_set(&keys, GenerationMode::Cartesian).len() as u128;
            prop_assert!(unique <= raw_candidate_count(&keys, GenerationMode::Cartesian));
        }

        #[test]
        fn unique_count_equals_raw_product_iff_no_tuples_collide(
            raw in prop::collection::vec(
                prop::collection::btree_set("[A-D]", 1..4),
                1..4,
            ),
        ) {
            let keys: Vec<Vec<String>> = raw.iter().map(|s| s.iter().cloned().collect()).collect();
            let tuples: Vec<Combination> =
                raw_candidates(&keys, GenerationMode::Cartesian).collect();
            let distinct: HashSet<Vec<String>> = tuples.iter().map(|c| c.canonical()).collect();
            let unique = canonical_set(&keys, GenerationMode::Cartesian).len() as u128;
            let raw_count = raw_candidate_count(&keys, GenerationMode::Cartesian);
            prop_assert_eq!(raw_count, tuples.len() as u128);
            prop_assert_eq!(unique == raw_count, distinct.len() == tuples.len());
        }

        #[test]
        fn disjoint_dimensions_keep_every_raw_tuple(
            sizes in prop::collection::vec(1usize..4, 1..4),
        ) {
            let keys: Vec<Vec<String>> = sizes
                .iter()
                .enumerate()
                .map(|(dim, &size)| (0..size).map(|k| format!("D{dim}E{k}")).collect())
                .collect();
            let unique = canonical_set(&keys, GenerationMode::Cartesian).len() as u128;
            prop_assert_eq!(unique, raw_candidate_count(&keys, GenerationMode::Cartesian));
        }
    }

    #[test]
    fn equality_depends_on_colliding_tuples_not_on_shared_names() {
        let keys = lists(&[&["A", "B"], &["B", "C"]]);
        let mut ctx = RunContext::default();
        assert_eq!(generate(&keys, GenerationMode::Cartesian, &mut ctx).count(), 4);

        let keys = lists(&[&["A", "B"], &["A", "B"]]);
        let mut ctx = RunContext::default();
        assert_eq!(generate(&keys, GenerationMode::Cartesian, &mut ctx).count(), 3);
        assert_eq!(raw_candidate_count(&keys, GenerationMode::Cartesian), 4);
    }
}
