use crate::SpError;

/// Floating point type used for load factors and percentages.
pub type Real = f64;

/// Percentage that means "no change" for multipliers and "no limit" for caps.
pub const FULL_PERCENT: Real = 100.0;

/// Round to the nearest integer, halves towards positive infinity.
///
/// Load-factor tables are entered as whole percents and the planning grids
/// display whole numbers, so every derived percentage goes through here.
pub fn round_half_up(v: Real) -> Real {
    (v + 0.5).floor()
}

/// Apply a percentage multiplier (`pct` = 100 leaves `value` unchanged).
pub fn apply_percent(value: Real, pct: Real) -> Real {
    value * pct / FULL_PERCENT
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SpError::NonFinite { what, value: v })
    }
}
