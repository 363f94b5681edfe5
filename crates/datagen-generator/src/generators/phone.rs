//! Ukrainian phone number generator.

use rand::Rng;

/// Country code every generated number starts with.
pub const PHONE_PREFIX: &str = "+380";

/// Number of random digits after the prefix.
pub const PHONE_DIGITS: usize = 9;

/// Generate `+380` followed by nine random digits.
pub fn generate_phone<R: Rng>(rng: &mut R) -> String {
    let mut phone = String::with_capacity(PHONE_PREFIX.len() + PHONE_DIGITS);
    phone.push_str(PHONE_PREFIX);
    for _ in 0..PHONE_DIGITS {
        phone.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    phone
}
