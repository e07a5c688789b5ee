//! Fixed-size batches for bulk delete requests

use std::collections::HashSet;

use super::newtypes::BatchSize;

/// Split `items` into consecutive batches of `size`, preserving order
///
/// Every batch except possibly the last holds exactly `size` items.
#[must_use]
pub fn partition_batches<T: Clone>(items: &[T], size: BatchSize) -> Vec<Vec<T>> {
    items.chunks(size.get()).map(<[T]>::to_vec).collect()
}

/// Remove repeated names, keeping the first occurrence of each
///
/// Matching is exact and case-sensitive.
#[must_use]
pub fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
