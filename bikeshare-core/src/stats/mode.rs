//! Frequency counting with a deterministic tie-break.

use std::{collections::HashMap, hash::Hash};

/// Counts each distinct value, most frequent first.
///
/// Equal counts keep the order in which the values first appeared.
///
/// # Examples
/// ```
/// use bikeshare_core::stats::value_counts;
///
/// let counts = value_counts(["b", "a", "a", "b", "c"]);
/// assert_eq!(counts, vec![("b", 2), ("a", 2), ("c", 1)]);
/// ```
#[must_use]
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first_seen))| (value, count, first_seen))
        .collect();
    ranked.sort_unstable_by(|left, right| right.1.cmp(&left.1).then(left.2.cmp(&right.2)));
    ranked
        .into_iter()
        .map(|(value, count, _)| (value, count))
        .collect()
}

/// Returns the most frequent value, or `None` when `values` is empty.
///
/// # Examples
/// ```
/// use bikeshare_core::stats::mode;
///
/// assert_eq!(mode([1990, 1985, 1990]), Some(1990));
/// assert_eq!(mode([3, 7]), Some(3));
/// assert_eq!(mode(Vec::<u32>::new()), None);
/// ```
#[must_use]
pub fn mode<T, I>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    value_counts(values)
        .into_iter()
        .next()
        .map(|(value, _)| value)
}
