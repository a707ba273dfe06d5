pub const CENTER_PERCENT: f64 = 50.0;

pub fn half_width_fraction(thumb_width_px: f64, track_width_px: f64) -> f64 {
    ((100.0 / track_width_px) * (thumb_width_px / 2.0)) / 100.0
}

/// Shift a track percentage toward the ends by the thumb's half width.
/// Zero at the center; the result may fall slightly outside `0..=100`.
pub fn compensate(percent: f64, half_width_fraction: f64) -> f64 {
    if percent < CENTER_PERCENT {
        percent - (100.0 - percent * 2.0) * half_width_fraction
    } else if percent > CENTER_PERCENT {
        percent + (percent - CENTER_PERCENT) * 2.0 * half_width_fraction
    } else {
        percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_fixed_point() {
        for f in [0.0, 0.01, 0.05, 0.5, 3.0] {
            assert_eq!(compensate(50.0, f), 50.0);
        }
    }

    #[test]
    fn test_zero_thumb_is_identity() {
        for p in [0.0, 0.5, 12.0, 49.99, 50.01, 75.0, 100.0] {
            assert_eq!(compensate(p, 0.0), p);
        }
    }

    #[test]
    fn test_edges_are_pushed_outward() {
        assert_eq!(compensate(0.0, 0.05), -5.0);
        assert_eq!(compensate(100.0, 0.05), 105.0);
        assert_eq!(compensate(25.0, 0.1), 20.0);
        assert_eq!(compensate(75.0, 0.1), 80.0);
    }

    #[test]
    fn test_compensation_is_symmetric() {
        for p in [0.0, 10.0, 33.0, 49.0] {
            let low = compensate(p, 0.04);
            let high = compensate(100.0 - p, 0.04);
            assert!((low + high - 100.0).abs() < 1e-9, "{p}: {low} + {high}");
        }
    }

    #[test]
    fn test_half_width_fraction() {
        assert_eq!(half_width_fraction(20.0, 200.0), 0.05);
        assert_eq!(half_width_fraction(0.0, 200.0), 0.0);
        assert!(half_width_fraction(15.0, 0.0).is_infinite());
    }
}
