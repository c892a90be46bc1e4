//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seeding (wall clock)
//! - Logging backend
//! - JavaScript bindings (`web`, wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a new session taken from the wall clock (ms since epoch)
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new session taken from the wall clock (ms since epoch)
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_seed_is_nonzero() {
        assert!(clock_seed() > 0);
    }
}
