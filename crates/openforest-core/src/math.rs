//! Pure math and hashing utilities shared by world generation, the tick
//! pipeline, and the commit-reveal protocol.
//!
//! Everything here is deterministic and side-effect free: same inputs,
//! same outputs, on any platform. The commit-reveal scheme depends on
//! `canonical_json` producing byte-identical output to the agent SDK, so
//! nothing in this module should be "close enough".

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Euclidean distance between two points.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Clamps `v` into `[lo, hi]`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Serializes `value` to canonical JSON: sorted object keys, no
/// insignificant whitespace, shortest round-trip numbers.
///
/// `serde_json::Value`'s map type is a `BTreeMap` (keys sorted by
/// construction) as long as the `preserve_order` feature is never enabled
/// anywhere in the dependency graph, and `serde_json::to_string` already
/// emits compact, minimally-escaped, shortest-round-trip output. So this
/// is the whole implementation; there is no hand-rolled sorting step to
/// get subtly wrong.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    let v = serde_json::to_value(value).expect("canonical_json: value must serialize");
    serde_json::to_string(&v).expect("canonical_json: value must print")
}

/// Lowercase hex of the SHA-256 digest of `s`'s UTF-8 bytes.
pub fn sha256_hex(s: &str) -> String {
    let digest = Sha256::digest(s.as_bytes());
    hex::encode(digest)
}

/// Derives a reproducible PRNG stream from `seed` and an ordered list of
/// `parts`, independent of any other random draws in the system.
///
/// Folds `seed` and each part (joined by `:`) through SHA-256, then takes
/// the first 16 hex characters as a 64-bit seed for the PRNG. Used
/// anywhere a stream must be replayable without sharing state with the
/// engine's main world-generation RNG (e.g. fleet-launch ping jitter).
pub fn deterministic_rng(seed: u64, parts: &[String]) -> ChaCha8Rng {
    let mut joined = seed.to_string();
    for part in parts {
        joined.push(':');
        joined.push_str(part);
    }
    let digest_hex = sha256_hex(&joined);
    let seed64 = u64::from_str_radix(&digest_hex[..16], 16)
        .expect("sha256 hex prefix is always valid base-16");
    ChaCha8Rng::seed_from_u64(seed64)
}
