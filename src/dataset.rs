//! Deterministic benchmark input generation
//!
//! The sweeps in `benches/` and the CLI runner share these generators so a
//! parameter point always maps to the same data. Seeding from the size
//! parameter keeps runs reproducible without threading an RNG through the
//! harness.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Key-duplication profile of a generated flat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    /// Every element identical; one survivor after dedup.
    Same,
    /// Every element distinct, shuffled; nothing filtered.
    Distinct,
    /// Random draws from half the value range; roughly half filtered.
    Mixed,
}

impl fmt::Display for Uniqueness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Uniqueness::Same => "same",
            Uniqueness::Distinct => "distinct",
            Uniqueness::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

impl FromStr for Uniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "same" => Ok(Uniqueness::Same),
            "distinct" => Ok(Uniqueness::Distinct),
            "mixed" => Ok(Uniqueness::Mixed),
            other => Err(format!(
                "unknown uniqueness {other:?} (expected same, distinct or mixed)"
            )),
        }
    }
}

/// Generate a flat input of `size` values with the given duplication
/// profile, seeded from `size`.
pub fn distinct_input(size: usize, uniqueness: Uniqueness) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(size as u64);
    match uniqueness {
        Uniqueness::Same => vec![42; size],
        Uniqueness::Distinct => {
            let mut values: Vec<u64> = (0..size as u64).collect();
            values.shuffle(&mut rng);
            values
        }
        Uniqueness::Mixed => {
            let half = (size as u64 / 2).max(1);
            (0..size).map(|_| rng.gen_range(0..half)).collect()
        }
    }
}

/// Generate `outer` sublists of `inner` shuffled values each, where every
/// sublist is independently empty with probability `empty_probability`.
///
/// Panics if `empty_probability` is outside `[0, 1]`.
pub fn nested_input(outer: usize, inner: usize, empty_probability: f64) -> Vec<Vec<u64>> {
    assert!(
        (0.0..=1.0).contains(&empty_probability),
        "empty_probability {empty_probability} outside [0, 1]"
    );
    let mut rng = StdRng::seed_from_u64(outer as u64);
    (0..outer)
        .map(|_| {
            if empty_probability >= 1.0 {
                Vec::new()
            } else if empty_probability > 0.0 && rng.gen_bool(empty_probability) {
                Vec::new()
            } else {
                let mut values: Vec<u64> = (0..inner as u64).collect();
                values.shuffle(&mut rng);
                values
            }
        })
        .collect()
}
