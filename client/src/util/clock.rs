//! Wall-clock access for cache bookkeeping.

/// Milliseconds since the Unix epoch. Zero outside the browser.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now().max(0.0) as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}
