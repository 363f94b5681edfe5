//! IT job title generator.

use rand::Rng;

/// Seniority levels.
pub const LEVEL_CHOICES: [&str; 5] = ["Trainee", "Junior", "Middle", "Senior", "Lead"];

/// Programming languages.
pub const LANGUAGE_CHOICES: [&str; 7] = ["Python", "Java", "Go", "Ruby", "C#", "C++", "C"];

/// Generate `"{level} {language} developer"`.
pub fn generate_job_title<R: Rng>(rng: &mut R) -> String {
    let level = LEVEL_CHOICES[rng.random_range(0..LEVEL_CHOICES.len())];
    let language = LANGUAGE_CHOICES[rng.random_range(0..LANGUAGE_CHOICES.len())];
    format!("{level} {language} developer")
}
