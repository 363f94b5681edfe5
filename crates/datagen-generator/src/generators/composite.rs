//! Generators composed from random strings.

use super::string::{capitalized_string, random_string, LengthRange};
use rand::Rng;

const EMAIL_LOCAL_PART: LengthRange = LengthRange::between(6, 15);
const FIRST_NAME: LengthRange = LengthRange::between(3, 10);
const LAST_NAME: LengthRange = LengthRange::between(3, 12);
const COMPANY_NAME: LengthRange = LengthRange::between(6, 14);
const DOMAIN_LABEL: LengthRange = LengthRange::between(6, 20);
const SENTENCE: LengthRange = LengthRange::between(30, 150);

/// `"{local}@example.com"`
pub fn generate_email<R: Rng>(rng: &mut R) -> String {
    format!("{}@example.com", random_string(rng, &EMAIL_LOCAL_PART))
}

/// `"{First} {Last}"`
pub fn generate_full_name<R: Rng>(rng: &mut R) -> String {
    let first = capitalized_string(rng, &FIRST_NAME);
    let last = capitalized_string(rng, &LAST_NAME);
    format!("{first} {last}")
}

/// `"{Name} and co."`
pub fn generate_company<R: Rng>(rng: &mut R) -> String {
    format!("{} and co.", capitalized_string(rng, &COMPANY_NAME))
}

/// `"{label}.ua"`
pub fn generate_domain<R: Rng>(rng: &mut R) -> String {
    format!("{}.ua", random_string(rng, &DOMAIN_LABEL))
}

/// `sentence_count` capitalized sentences joined by `". "`, ending with a
/// period. Zero sentences give an empty string.
pub fn generate_text<R: Rng>(rng: &mut R, sentence_count: u32) -> String {
    if sentence_count == 0 {
        return String::new();
    }
    let sentences: Vec<String> = (0..sentence_count)
        .map(|_| capitalized_string(rng, &SENTENCE))
        .collect();
    format!("{}.", sentences.join(". "))
}
