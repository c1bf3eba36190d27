//! Stock password generators.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::registry::Registry;

/// Builds a generator producing `len` random ASCII alphanumeric characters.
pub fn alphanumeric(len: usize) -> impl Fn() -> String + Send + Sync {
    move || {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Registers `random10` (ten alphanumeric characters), replacing any
/// generator of that name.
pub fn register_stock_generators(registry: &Registry) {
    registry.register_generator("random10", alphanumeric(10));
}
