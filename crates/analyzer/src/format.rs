use rust_decimal::prelude::*;

/// Rounds to `decimals` places, midpoints away from zero.
///
/// The value goes through its shortest decimal representation first, so
/// `2.675` rounds to `2.68` even though the nearest binary float is slightly
/// below it. Rounding the exact binary value instead would give `2.67`.
/// `None` for non-finite values and magnitudes beyond `Decimal`'s range.
pub fn round_to(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}

/// Signed percentage text: `+` when the rounded value is above zero, the
/// natural minus below it, no sign for an exact zero.
pub fn fmt_signed(value: Option<f64>, decimals: u32, missing: &str) -> String {
    let Some(value) = value else {
        return missing.to_string();
    };
    let Some(rounded) = round_to(value, decimals) else {
        return out_of_range(value, decimals, true, missing);
    };
    let sign = if rounded > Decimal::ZERO {
        "+"
    } else if value < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{:.prec$}", rounded.abs(), prec = decimals as usize)
}

/// Unsigned fixed-precision text.
pub fn fmt_fixed(value: Option<f64>, decimals: u32, missing: &str) -> String {
    let Some(value) = value else {
        return missing.to_string();
    };
    match round_to(value, decimals) {
        Some(rounded) => format!("{:.prec$}", rounded, prec = decimals as usize),
        None => out_of_range(value, decimals, false, missing),
    }
}

/// Finite values too large for `Decimal` fall back to float formatting.
fn out_of_range(value: f64, decimals: u32, signed: bool, missing: &str) -> String {
    let prec = decimals as usize;
    match (value.is_finite(), signed) {
        (false, _) => missing.to_string(),
        (true, true) => format!("{value:+.prec$}"),
        (true, false) => format!("{value:.prec$}"),
    }
}

/// Whole-number change with an explicit sign; zero is `+0`.
pub fn fmt_count_change(change: i64) -> String {
    format!("{change:+}")
}
