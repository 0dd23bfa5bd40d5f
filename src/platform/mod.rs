//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds
//! - Storage (LocalStorage on web, memory on native)
//! - The wasm-facing game handle

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a new run, from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn run_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (js_sys::Date::now() as u64) ^ (noise << 32)
}

/// Seed for a new run, from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn run_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}
