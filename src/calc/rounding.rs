//! Two-decimal rounding applied to every solver output

/// Scale for rounding to cents / hundredths of a percent
pub const CENTS: f64 = 100.0;

/// Magnitude from which every `f64` is a whole number
const WHOLE_FROM: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to 2 decimals, half away from zero
///
/// Non-finite values come back as 0 so rounded output can always be fed
/// back in as the next input. Values too large to carry a fraction are
/// returned unchanged, so scaling by [`CENTS`] never overflows.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if value.abs() >= WHOLE_FROM {
        return value;
    }
    // -0.0 prints as "-0.00"
    (value * CENTS).round() / CENTS + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(960.004), 960.0);
        assert_eq!(round_cents(19.999), 20.0);
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-0.125), -0.13);
        assert_eq!(round_cents(33.333333), 33.33);
    }

    #[test]
    fn test_round_cents_non_finite() {
        assert_eq!(round_cents(f64::NAN), 0.0);
        assert_eq!(round_cents(f64::INFINITY), 0.0);
        assert_eq!(round_cents(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_round_cents_large_values_kept() {
        assert_eq!(round_cents(1e307), 1e307);
        assert_eq!(round_cents(-f64::MAX), -f64::MAX);
        assert_eq!(round_cents(1e20), 1e20);
    }

    #[test]
    fn test_round_cents_negative_zero() {
        let r = round_cents(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }
}
