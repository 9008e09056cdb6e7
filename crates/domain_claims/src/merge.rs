//! Set semantics for claim values

use std::collections::HashSet;

/// Removes duplicates, keeping the first occurrence of each value in place
pub fn distinct_in_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Union of the stored values and the incoming ones
///
/// Existing values come first in their stored order, followed by incoming
/// values not seen before, in input order.
pub fn merge_values(existing: Vec<String>, incoming: &[String]) -> Vec<String> {
    distinct_in_order(existing.into_iter().chain(incoming.iter().cloned()))
}
