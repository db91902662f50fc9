//! Deterministic request fingerprints used as cache keys.

use quarry_traits::Params;
use sha2::{Digest, Sha256};

/// Hash a URL and its parameters into a hex cache key.
///
/// Parameters are hashed in sorted key order, so insertion order never
/// changes the result, while any change to a key or value does. Every
/// component is length-prefixed so no two distinct requests share a
/// byte stream.
#[must_use]
pub fn fingerprint(url: &str, params: &Params) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, url);
    for (key, value) in params {
        update_field(&mut hasher, key);
        update_field(&mut hasher, value);
    }
    hex::encode(hasher.finalize())
}

fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}
