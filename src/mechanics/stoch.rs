/// Stochastic mechanics: uniform draws over any `RngCore`.
/// Callers inject the generator (usually a seeded `bevy_prng::WyRand`), so a
/// fixed seed replays the same search.
use rand_core::RngCore;

/// Uniform in [0, 1) from the top 53 bits of one `u64`.
#[inline]
pub fn uniform01<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Bernoulli(p).
#[inline]
pub fn bernoulli<R: RngCore + ?Sized>(rng: &mut R, p: f64) -> bool {
    uniform01(rng) < p.clamp(0.0, 1.0)
}

/// Uniform index in `0..len`. `len` must be positive.
#[inline]
pub fn pick_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    ((uniform01(rng) * len as f64) as usize).min(len.saturating_sub(1))
}

/// Uniform element of a slice, `None` when it is empty.
#[inline]
pub fn choose<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(pick_index(rng, items.len()))
    }
}
