use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::BTreeMap;

use crate::error::Result;

/// Weight given to candidates the frequency map has never seen.
pub const DEFAULT_WEIGHT: usize = 1;

/// Draws up to `k` distinct items uniformly, in random order.
pub fn uniform_sample<R, T>(rng: &mut R, items: &[T], k: usize) -> Vec<T>
where
    R: Rng + ?Sized,
    T: Clone,
{
    let amount = k.min(items.len());
    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// Draws up to `k` distinct items without replacement, each step picking with
/// probability proportional to the item's frequency.
///
/// Items missing from `weights` get [`DEFAULT_WEIGHT`]. An empty frequency map
/// falls back to [`uniform_sample`].
pub fn weighted_sample<R>(
    rng: &mut R,
    items: &[String],
    weights: &BTreeMap<String, usize>,
    k: usize,
) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return Ok(uniform_sample(rng, items, k));
    }

    let amount = k.min(items.len());
    let chosen = items.choose_multiple_weighted(rng, amount, |item| {
        weights.get(item).copied().unwrap_or(DEFAULT_WEIGHT) as f64
    })?;
    Ok(chosen.cloned().collect())
}
