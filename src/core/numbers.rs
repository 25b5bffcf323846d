// src/core/numbers.rs
//
// Exported stats come through pandas, so a count can be "3" or "3.0".

/// Non-negative integral count. "3", "3.0", " 3 " → 3. Fractions, negatives,
/// NaN and junk → None.
pub fn parse_count(cell: &str) -> Option<u32> {
    let t = cell.trim();
    if t.is_empty() { return None; }
    if let Ok(v) = t.parse::<u32>() { return Some(v); }
    let f = t.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

pub fn parse_year(cell: &str) -> Option<i32> {
    parse_count(cell).and_then(|v| i32::try_from(v).ok())
}
