//! Number formatting for the display, traces and the memory indicator.

/// Results above this magnitude switch to scientific notation.
pub const SCIENTIFIC_UPPER: f64 = 1e9;

/// Non-zero results below this magnitude switch to scientific notation.
pub const SCIENTIFIC_LOWER: f64 = 1e-7;

/// Significant digits kept in plain decimal output.
pub const SIGNIFICANT_DIGITS: usize = 12;

/// Format a calculation result for display.
///
/// Large and tiny magnitudes use scientific notation with four fractional
/// digits and a signed exponent. Everything else is rounded to twelve
/// significant digits and printed in its shortest decimal form.
///
/// # Example
///
/// ```rust
/// use abacus::core::format_result;
///
/// assert_eq!(format_result(156.0), "156");
/// assert_eq!(format_result(1.0 / 3.0), "0.333333333333");
/// assert_eq!(format_result(12345678901.0), "1.2346e+10");
/// assert_eq!(format_result(0.00000001), "1.0000e-8");
/// ```
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let magnitude = value.abs();
    if magnitude > SCIENTIFIC_UPPER || (magnitude < SCIENTIFIC_LOWER && value != 0.0) {
        return scientific(value);
    }

    let rounded: f64 = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse()
        .unwrap_or(value);
    plain(rounded)
}

/// Format an operand echoed in an expression trace.
///
/// Operands are shown in their shortest round-trip form without rounding.
pub fn format_operand(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    plain(value)
}

fn plain(value: f64) -> String {
    // -0 displays as 0
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn scientific(value: f64) -> String {
    let formatted = format!("{value:.4e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_positive() {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(9.0), "9");
        assert_eq!(format_result(-4.0), "-4");
        assert_eq!(format_result(1_000_000_000.0), "1000000000");
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_operand(-0.0), "0");
    }

    #[test]
    fn floating_noise_is_rounded_away() {
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(2.0 / 3.0), "0.666666666667");
        assert_eq!(format_result(1.1 * 1.1), "1.21");
    }

    #[test]
    fn large_values_use_signed_exponent() {
        assert_eq!(format_result(1_000_000_001.0), "1.0000e+9");
        assert_eq!(format_result(-123_456_789_012.0), "-1.2346e+11");
    }

    #[test]
    fn tiny_values_use_negative_exponent() {
        assert_eq!(format_result(0.00000001), "1.0000e-8");
        assert_eq!(format_result(-0.000000012345), "-1.2345e-8");
        assert_eq!(format_result(0.0000001), "0.0000001");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_result(f64::INFINITY), "Infinity");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn operands_are_not_rounded() {
        assert_eq!(format_operand(52.0), "52");
        assert_eq!(format_operand(0.1 + 0.2), "0.30000000000000004");
    }
}
