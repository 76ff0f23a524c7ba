//! Uniform random permutation of a sequence.

use rand::Rng;

/// Returns a fresh, uniformly random permutation of `input`.
///
/// Copy-based Fisher–Yates: for each index `i` from `n-1` down to `1`, a
/// uniformly random index `j` in `[0, i]` is swapped into place. The input is
/// never mutated, so renders of the previous order stay valid while a new
/// order is being produced. Pure function of the input and the random source.
#[must_use]
pub fn shuffled<T: Clone, R: Rng>(input: &[T], rng: &mut R) -> Vec<T> {
    let mut result = input.to_vec();
    for i in (1..result.len()).rev() {
        let j = rng.gen_range(0..=i);
        result.swap(i, j);
    }
    result
}
