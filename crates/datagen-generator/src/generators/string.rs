//! Random lowercase strings.

use rand::Rng;

/// Inclusive string length range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    /// Evaluated at compile time when used in a `const`.
    pub const fn between(min: usize, max: usize) -> Self {
        assert!(min <= max, "min length greater than max length");
        Self { min, max }
    }
}

/// Generate a string of lowercase ASCII letters with a length drawn
/// uniformly from `range`.
pub fn random_string<R: Rng>(rng: &mut R, range: &LengthRange) -> String {
    let len = rng.random_range(range.min..=range.max);
    (0..len)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}

/// Random string with the first letter upper-cased.
pub fn capitalized_string<R: Rng>(rng: &mut R, range: &LengthRange) -> String {
    capitalize(&random_string(rng, range))
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
