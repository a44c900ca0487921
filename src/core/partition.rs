//! Randomized partitioning of participants into groups.
//!
//! The random source is always passed in by the caller. Nothing here holds
//! a generator between calls, so concurrent requests cannot observe each
//! other's randomness and tests can inject a fixed seed.

use crate::domain::model::GroupingMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where each request's generator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomSource {
    /// Fresh OS-seeded generator per request.
    #[default]
    Entropy,
    /// Generator seeded with the same value for every request.
    Seeded(u64),
}

impl RandomSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RandomSource::Seeded(seed),
            None => RandomSource::Entropy,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self {
            RandomSource::Entropy => StdRng::from_entropy(),
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

/// Fisher-Yates, from the last index down to the first.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffles `participants` and splits them according to `mode`.
///
/// In size mode groups are filled to `g` in order and only the last group
/// may be short. In count mode the first `n % k` groups receive one extra
/// member. The mode must already have been validated against `n`.
pub fn partition<R: Rng + ?Sized>(
    participants: &[String],
    mode: GroupingMode,
    rng: &mut R,
) -> Vec<Vec<String>> {
    let mut shuffled = participants.to_vec();
    shuffle_in_place(&mut shuffled, rng);

    match mode {
        GroupingMode::BySize(size) => split_by_size(shuffled, size),
        GroupingMode::ByCount(count) => split_by_count(shuffled, count),
    }
}

fn split_by_size(members: Vec<String>, size: usize) -> Vec<Vec<String>> {
    members.chunks(size.max(1)).map(<[String]>::to_vec).collect()
}

fn split_by_count(members: Vec<String>, count: usize) -> Vec<Vec<String>> {
    let count = count.max(1);
    let base = members.len() / count;
    let extra = members.len() % count;

    let mut remaining = members.into_iter();
    (0..count)
        .map(|index| {
            let take = if index < extra { base + 1 } else { base };
            remaining.by_ref().take(take).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn people(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i:02}")).collect()
    }

    fn multiset(items: impl IntoIterator<Item = String>) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_size_mode_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 4..=30 {
            for g in 1..=n {
                let groups = partition(&people(n), GroupingMode::BySize(g), &mut rng);
                assert_eq!(groups.len(), n.div_ceil(g), "n={n} g={g}");
                assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), n);
                let (last, full) = groups.split_last().unwrap();
                assert!(full.iter().all(|group| group.len() == g));
                assert!(!last.is_empty() && last.len() <= g);
            }
        }
    }

    #[test]
    fn test_count_mode_shapes() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 4..=30 {
            for k in 1..=n {
                let groups = partition(&people(n), GroupingMode::ByCount(k), &mut rng);
                assert_eq!(groups.len(), k, "n={n} k={k}");
                assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), n);
                for (index, group) in groups.iter().enumerate() {
                    let expected = if index < n % k { n / k + 1 } else { n / k };
                    assert_eq!(group.len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_ten_into_three_groups() {
        let mut rng = StdRng::seed_from_u64(3);
        let groups = partition(&people(10), GroupingMode::ByCount(3), &mut rng);
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_members_preserved_with_duplicates() {
        let mut input = people(9);
        input.push("P00".to_string());
        input.push("P03".to_string());

        let mut rng = StdRng::seed_from_u64(99);
        for mode in [GroupingMode::BySize(3), GroupingMode::ByCount(4)] {
            let groups = partition(&input, mode, &mut rng);
            assert_eq!(
                multiset(groups.into_iter().flatten()),
                multiset(input.clone())
            );
        }
    }

    #[test]
    fn test_same_seed_same_groups() {
        let input = people(12);
        let first = partition(
            &input,
            GroupingMode::BySize(5),
            &mut RandomSource::Seeded(42).rng(),
        );
        let second = partition(
            &input,
            GroupingMode::BySize(5),
            &mut RandomSource::Seeded(42).rng(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        // 4 elements have 24 orderings; all of them should show up, each
        // roughly 1/24 of the time.
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        let trials = 24_000;
        for _ in 0..trials {
            let mut items = vec![0u8, 1, 2, 3];
            shuffle_in_place(&mut items, &mut rng);
            *seen.entry(items).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 24);
        for count in seen.values() {
            assert!((700..=1300).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn test_random_source_from_seed() {
        assert_eq!(RandomSource::from_seed(Some(5)), RandomSource::Seeded(5));
        assert_eq!(RandomSource::from_seed(None), RandomSource::Entropy);
    }
}
