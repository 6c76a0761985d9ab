//! Per-transaction purchase caps.
//!
//! Small pools allow 10% of what is left per purchase and larger pools 5%,
//! with a floor of one ticket. The cap never drops to zero, so a sold-out
//! type still reports a cap of 1; sold-out types are kept out of selection
//! instead (see [`crate::models::ticket::selectable`]).

/// Pools at or below this size use the 10% tier.
pub const SMALL_POOL_LIMIT: u32 = 20;

/// Maximum number of tickets one buyer may take in a single purchase.
pub fn max_quantity(available: u32) -> u32 {
    // floor(n * 0.10) and floor(n * 0.05) are exact as integer division
    let cap = if available <= SMALL_POOL_LIMIT {
        available / 10
    } else {
        available / 20
    };
    cap.max(1)
}

/// Clamp a requested quantity into `[1, cap]`.
pub fn clamp_quantity(requested: i64, cap: u32) -> u32 {
    let cap = cap.max(1);
    requested.clamp(1, i64::from(cap)) as u32
}

/// Parse the leading integer of a quantity field.
///
/// Accepts surrounding whitespace and an optional sign, then reads digits up
/// to the first non-digit, so `"3 tickets"` and `"2.5"` give 3 and 2. Returns
/// `None` when no digit follows. Magnitudes beyond `i64` saturate.
pub fn parse_quantity_input(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// What happened to a keystroke in the quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityEntry {
    /// Not a number; the previous quantity stays.
    Ignored { retained: u32 },
    Accepted(u32),
    /// A number outside `[1, cap]`, pulled to the nearest bound.
    Clamped { requested: i64, applied: u32 },
}

impl QuantityEntry {
    /// The quantity in effect after this entry.
    pub fn quantity(&self) -> u32 {
        match *self {
            QuantityEntry::Ignored { retained } => retained,
            QuantityEntry::Accepted(quantity) => quantity,
            QuantityEntry::Clamped { applied, .. } => applied,
        }
    }
}

/// Apply raw user input to the current quantity under `cap`.
pub fn apply_quantity_input(current: u32, raw: &str, cap: u32) -> QuantityEntry {
    let Some(requested) = parse_quantity_input(raw) else {
        return QuantityEntry::Ignored { retained: current };
    };

    let applied = clamp_quantity(requested, cap);
    if i64::from(applied) == requested {
        QuantityEntry::Accepted(applied)
    } else {
        QuantityEntry::Clamped { requested, applied }
    }
}
