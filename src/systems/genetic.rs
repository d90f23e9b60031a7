//! Variation operators over build orders.
//! All of them return fresh orders; parents are never edited in place, so an
//! elite carried into the next generation stays exactly as it was ranked.

use rand_core::RngCore;

use crate::BuildOrder;
use crate::mechanics::stoch;

/// `len` actions drawn uniformly from `vocabulary` (empty if it is empty).
pub fn random_order<R: RngCore + ?Sized>(
    rng: &mut R,
    vocabulary: &[String],
    len: usize,
) -> BuildOrder {
    if vocabulary.is_empty() {
        return Vec::new();
    }
    (0..len)
        .filter_map(|_| stoch::choose(rng, vocabulary).cloned())
        .collect()
}

/// Copy of `order` with one uniformly chosen position redrawn from
/// `vocabulary`. The draw may repeat the old action.
pub fn mutate<R: RngCore + ?Sized>(
    rng: &mut R,
    order: &[String],
    vocabulary: &[String],
) -> BuildOrder {
    let mut child = order.to_vec();
    if child.is_empty() {
        return child;
    }
    let at = stoch::pick_index(rng, child.len());
    if let (Some(slot), Some(action)) = (child.get_mut(at), stoch::choose(rng, vocabulary)) {
        slot.clone_from(action);
    }
    child
}

/// One-point crossover: `a[..cut]` followed by `b[cut..]`, with the cut drawn
/// from `0..a.len()`.
pub fn crossover<R: RngCore + ?Sized>(rng: &mut R, a: &[String], b: &[String]) -> BuildOrder {
    if a.is_empty() {
        return b.to_vec();
    }
    let cut = stoch::pick_index(rng, a.len());
    let head = &a[..cut];
    let tail = b.get(cut..).unwrap_or(&[]);
    head.iter().chain(tail).cloned().collect()
}
