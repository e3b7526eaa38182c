pub type Degrees = f64;
pub type Minutes = u32;

pub const MINUTES_PER_DEGREE: Minutes = 60;

// Absorbs representation error so e.g. 10.35 doesn't truncate to 10°20'
const MINUTE_EPSILON: f64 = 1E-9;

/// Convert whole degrees and arc-minutes to decimal degrees
pub fn dm_to_dec(d: u32, minutes: Minutes) -> Degrees {
    (d as f64) + (minutes as f64) / MINUTES_PER_DEGREE as f64
}

/// Split a non-negative decimal degree value into whole degrees and arc-minutes.
/// Fractional minutes are truncated, never rounded.
pub fn dec_to_dm(dec: Degrees) -> (u32, Minutes) {
    debug_assert!(dec >= 0., "dec must not be negative");

    let total = total_minutes(dec);
    (total / MINUTES_PER_DEGREE, total % MINUTES_PER_DEGREE)
}

/// Whole arc-minutes in a non-negative decimal degree value
pub fn total_minutes(dec: Degrees) -> Minutes {
    (dec * MINUTES_PER_DEGREE as f64 + MINUTE_EPSILON).floor() as Minutes
}
