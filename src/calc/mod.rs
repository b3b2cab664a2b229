//! Pure deal arithmetic: effective values, margin and rounding
//!
//! Every function here is total. Non-finite input is read as 0 and
//! zero divisors produce 0 instead of NaN or Infinity.

mod rounding;

pub use rounding::{round_cents, CENTS};

/// Replace NaN and infinities with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Effective value of one side: CPA × CRG%
pub fn effective_value(cpa: f64, crg: f64) -> f64 {
    finite_or_zero(cpa) * (finite_or_zero(crg) / 100.0)
}

/// Margin percentage retained between broker and affiliate effective values
///
/// Returns 0 when the broker effective value is 0.
pub fn margin(broker_effective: f64, affiliate_effective: f64) -> f64 {
    let broker_effective = finite_or_zero(broker_effective);
    if broker_effective == 0.0 {
        return 0.0;
    }
    let affiliate_effective = finite_or_zero(affiliate_effective);
    (broker_effective - affiliate_effective) / broker_effective * 100.0
}

/// Affiliate effective value a broker effective value leaves at `margin` percent
pub fn affiliate_target(broker_effective: f64, margin: f64) -> f64 {
    finite_or_zero(broker_effective * (1.0 - margin / 100.0))
}

/// Broker effective value needed to keep `margin` percent over an affiliate effective value
///
/// A 100% margin has no finite answer and yields 0.
pub fn broker_target(affiliate_effective: f64, margin: f64) -> f64 {
    let retained = 1.0 - margin / 100.0;
    if retained == 0.0 {
        return 0.0;
    }
    finite_or_zero(affiliate_effective / retained)
}

/// CRG that turns `cpa` into `target_effective`; 0 when CPA is not positive
pub fn crg_for_target(target_effective: f64, cpa: f64) -> f64 {
    if cpa > 0.0 {
        finite_or_zero(target_effective / cpa * 100.0)
    } else {
        0.0
    }
}

/// CPA that turns `crg` into `target_effective`; 0 when CRG is not positive
pub fn cpa_for_target(target_effective: f64, crg: f64) -> f64 {
    if crg > 0.0 {
        finite_or_zero(target_effective / (crg / 100.0))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_effective_value() {
        assert_abs_diff_eq!(effective_value(1200.0, 10.0), 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(effective_value(960.0, 10.0), 96.0, epsilon = 1e-9);
        assert_eq!(effective_value(1200.0, 0.0), 0.0);
        assert_eq!(effective_value(f64::NAN, 10.0), 0.0);
        assert_eq!(effective_value(1200.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_margin() {
        assert_abs_diff_eq!(margin(120.0, 96.0), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(margin(120.0, 120.0), 0.0, epsilon = 1e-9);
        // Affiliate paid more than broker pays: negative margin
        assert_abs_diff_eq!(margin(100.0, 150.0), -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_margin_zero_broker() {
        assert_eq!(margin(0.0, 0.0), 0.0);
        assert_eq!(margin(0.0, 96.0), 0.0);
        assert_eq!(margin(f64::NAN, 96.0), 0.0);
    }

    #[test]
    fn test_targets() {
        assert_abs_diff_eq!(affiliate_target(120.0, 20.0), 96.0, epsilon = 1e-9);
        assert_abs_diff_eq!(broker_target(96.0, 20.0), 120.0, epsilon = 1e-9);
        assert_eq!(broker_target(96.0, 100.0), 0.0);
    }

    #[test]
    fn test_member_solves_guard_divisor() {
        assert_abs_diff_eq!(cpa_for_target(96.0, 10.0), 960.0, epsilon = 1e-9);
        assert_abs_diff_eq!(crg_for_target(96.0, 960.0), 10.0, epsilon = 1e-9);
        assert_eq!(cpa_for_target(96.0, 0.0), 0.0);
        assert_eq!(crg_for_target(96.0, 0.0), 0.0);
        assert_eq!(crg_for_target(96.0, -5.0), 0.0);
    }
}
