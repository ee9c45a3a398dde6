//! Metric-prefix formatting for compute-power magnitudes
//! (`1.2e12` FLOPs → `"1.20 TFLOPs"`).

/// Metric prefixes by powers of 1000, bare unit first.
const PREFIXES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Default number of decimal places in formatted values.
pub const DEFAULT_DECIMALS: usize = 2;

/// Format a raw magnitude with the given base unit, scaling by powers of
/// 1000: `format_unit(1e9, "FLOPs")` → `"1.00 GFLOPs"`.
///
/// Zero and non-finite values render as the literal `"0 flops"` (the
/// placeholder the benchmark site has always shown for those cells).  The
/// prefix index is clamped into the table, so values beyond yotta keep the
/// `Y` prefix and sub-unit values keep the bare unit instead of indexing
/// out of range.
pub fn format_unit(value: f64, unit: &str) -> String {
    format_unit_with(value, unit, DEFAULT_DECIMALS)
}

/// Same as [`format_unit`] with explicit decimal precision.
pub fn format_unit_with(value: f64, unit: &str, decimals: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0 flops".to_string();
    }

    // Repeated division rather than floor(log1000): exact at the prefix
    // boundaries and bounded by construction.
    let mut magnitude = value.abs();
    let mut i = 0;
    while magnitude >= 1000.0 && i < PREFIXES.len() - 1 {
        magnitude /= 1000.0;
        i += 1;
    }

    let scaled = value / 1000f64.powi(i as i32);
    format!("{scaled:.decimals$} {}{unit}", PREFIXES[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_flops_placeholder() {
        assert_eq!(format_unit(0.0, "FLOPs"), "0 flops");
        // Unit argument does not change the zero placeholder.
        assert_eq!(format_unit(0.0, "X"), "0 flops");
        assert_eq!(format_unit(f64::NAN, "FLOPs"), "0 flops");
    }

    #[test]
    fn kilo_and_giga() {
        assert_eq!(format_unit(1000.0, "FLOPs"), "1.00 KFLOPs");
        assert_eq!(format_unit(1e9, "FLOPs"), "1.00 GFLOPs");
        assert_eq!(format_unit(770.0, "FLOPs"), "770.00 FLOPs");
        assert_eq!(format_unit(1.5e12, "FLOPs"), "1.50 TFLOPs");
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(format_unit_with(1234.0, "FLOPs", 0), "1 KFLOPs");
        assert_eq!(format_unit_with(1234.0, "FLOPs", 3), "1.234 KFLOPs");
    }

    #[test]
    fn prefix_index_is_clamped() {
        // 1e27 would need a prefix past yotta; it stays on Y.
        assert_eq!(format_unit(1e27, "FLOPs"), "1000.00 YFLOPs");
        // Sub-unit values clamp to the bare unit instead of going negative.
        assert_eq!(format_unit(0.5, "FLOPs"), "0.50 FLOPs");
    }
}
