use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Pick one outcome from `(outcome, weight)` pairs, proportionally to weight.
///
/// Zero-weight outcomes are never picked. Returns `None` when nothing can
/// be picked: empty input, all weights zero, or a negative / non-finite
/// weight.
pub fn weighted_choice<'a, T, R>(rng: &mut R, choices: &'a [(T, f64)]) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    // `WeightedIndex` accepts infinities and panics on them later.
    if !choices.iter().all(|(_, weight)| weight.is_finite()) {
        return None;
    }
    let total: f64 = choices.iter().map(|(_, weight)| *weight).sum();
    if !total.is_finite() {
        return None;
    }
    let dist = WeightedIndex::new(choices.iter().map(|(_, weight)| *weight)).ok()?;
    choices.get(dist.sample(rng)).map(|(outcome, _)| outcome)
}
