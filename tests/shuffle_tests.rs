//! Integration tests for the shuffle engine.
//!
//! Covers the permutation contract (same multiset, same length, input left
//! untouched) and a statistical check that positions are filled uniformly
//! over many trials.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use seance::models::KeySet;
use seance::services::shuffle::shuffled;

#[test]
fn shuffle_returns_a_permutation() {
    let mut rng = SmallRng::seed_from_u64(42);
    let input: Vec<char> = ('A'..='Z').collect();

    let output = shuffled(&input, &mut rng);

    assert_eq!(output.len(), input.len());
    let mut sorted = output.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, input);
}

#[test]
fn shuffle_leaves_input_unchanged() {
    let mut rng = SmallRng::seed_from_u64(42);
    let input: Vec<char> = ('A'..='Z').collect();
    let snapshot = input.clone();

    let _ = shuffled(&input, &mut rng);

    assert_eq!(input, snapshot);
}

#[test]
fn shuffle_position_distribution_is_roughly_uniform() {
    // With a fixed seed this is fully deterministic; the tolerance band is
    // wide enough (five standard deviations) that any honest Fisher-Yates
    // pass lands inside it.
    const TRIALS: usize = 10_000;
    const N: usize = 10;

    let mut rng = SmallRng::seed_from_u64(1234);
    let input: Vec<usize> = (0..N).collect();
    let mut first_element_position_counts = [0usize; N];

    for _ in 0..TRIALS {
        let output = shuffled(&input, &mut rng);
        let position = output.iter().position(|&v| v == 0).unwrap();
        first_element_position_counts[position] += 1;
    }

    let expected = TRIALS / N;
    let tolerance = 150; // ~5 sigma for p = 1/10 over 10k trials
    for (position, &count) in first_element_position_counts.iter().enumerate() {
        assert!(
            count.abs_diff(expected) <= tolerance,
            "position {position} was filled {count} times, expected about {expected}"
        );
    }
}

#[test]
fn key_set_identities_are_invariant_under_shuffle() {
    let mut rng = SmallRng::seed_from_u64(7);
    let keys = KeySet::build(5);

    let reordered = KeySet::from_slots(shuffled(keys.slots(), &mut rng));

    let mut before: Vec<_> = keys.slots().iter().map(|s| s.identity).collect();
    let mut after: Vec<_> = reordered.slots().iter().map(|s| s.identity).collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);

    // The symbol multiset is also unchanged.
    let mut symbols_before: Vec<_> = keys.slots().iter().map(|s| s.symbol.to_string()).collect();
    let mut symbols_after: Vec<_> = reordered
        .slots()
        .iter()
        .map(|s| s.symbol.to_string())
        .collect();
    symbols_before.sort();
    symbols_after.sort();
    assert_eq!(symbols_before, symbols_after);
}
