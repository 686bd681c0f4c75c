//! Human-facing listing codes such as `HB-7K2M9Q`.

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const PREFIX: &str = "HB-";
const CODE_LEN: usize = 6;

pub fn generate_property_code() -> String {
    let mut rng = OsRng.unwrap_err();
    let mut s = String::with_capacity(PREFIX.len() + CODE_LEN);
    s.push_str(PREFIX);
    for _ in 0..CODE_LEN {
        s.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
    }
    s
}

pub fn is_property_code(s: &str) -> bool {
    s.strip_prefix(PREFIX).is_some_and(|rest| {
        rest.len() == CODE_LEN && rest.bytes().all(|b| CROCKFORD.contains(&b))
    })
}
