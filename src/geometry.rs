use crate::bounds::RangeBounds;
use crate::step::round_to_step;
use crate::thumb;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub width: f64,
}

impl Rect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn track_percent(&self, x: f64) -> f64 {
        ((100.0 / self.width) * (x - self.left)).clamp(0.0, 100.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// The raw position is clamped to the track before thumb compensation,
/// the compensated value is not clamped again.
pub fn map_touch_to_value(
    touch_x: f64,
    rect: &Rect,
    bounds: &RangeBounds,
    thumb_width_px: f64,
    direction: TextDirection,
) -> f64 {
    let mut percent = rect.track_percent(touch_x);
    if direction == TextDirection::Rtl {
        percent = 100.0 - percent;
    }

    let fraction = thumb::half_width_fraction(thumb_width_px, rect.width);
    let percent = thumb::compensate(percent, fraction);

    bounds.min + round_to_step(bounds.delta() * (percent / 100.0), bounds.step)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: Rect = Rect {
        left: 0.0,
        width: 200.0,
    };

    fn map(x: f64, bounds: RangeBounds, thumb: f64) -> f64 {
        map_touch_to_value(x, &TRACK, &bounds, thumb, TextDirection::Ltr)
    }

    #[test]
    fn test_center_touch_hits_midpoint() {
        assert_eq!(map(100.0, RangeBounds::default(), 20.0), 50.0);
    }

    #[test]
    fn test_left_edge_overshoots_min() {
        assert_eq!(map(0.0, RangeBounds::default(), 20.0), -5.0);
    }

    #[test]
    fn test_right_edge_overshoots_max() {
        assert_eq!(map(200.0, RangeBounds::default(), 20.0), 105.0);
    }

    #[test]
    fn test_touch_outside_track_is_clamped_before_compensation() {
        let bounds = RangeBounds::default();
        assert_eq!(map(-80.0, bounds, 20.0), map(0.0, bounds, 20.0));
        assert_eq!(map(1000.0, bounds, 20.0), map(200.0, bounds, 20.0));
    }

    #[test]
    fn test_zero_thumb_is_linear() {
        let bounds = RangeBounds::default();
        assert_eq!(map(0.0, bounds, 0.0), 0.0);
        assert_eq!(map(50.0, bounds, 0.0), 25.0);
        assert_eq!(map(200.0, bounds, 0.0), 100.0);
    }

    #[test]
    fn test_offset_track() {
        let rect = Rect::new(40.0, 100.0);
        let bounds = RangeBounds::default();
        let value = map_touch_to_value(90.0, &rect, &bounds, 15.0, TextDirection::Ltr);
        assert_eq!(value, 50.0);
    }

    #[test]
    fn test_min_offsets_value_and_step_quantizes() {
        let bounds = RangeBounds::new(10.0, 20.0, 5.0);
        assert_eq!(map(100.0, bounds, 0.0), 15.0);
        assert_eq!(map(60.0, bounds, 0.0), 15.0);
        assert_eq!(map(40.0, bounds, 0.0), 10.0);
    }

    #[test]
    fn test_fractional_step() {
        let bounds = RangeBounds::new(0.0, 1.0, 0.01);
        assert_eq!(map(123.4, bounds, 0.0), 0.62);
    }

    #[test]
    fn test_inverted_range_flips_direction() {
        let bounds = RangeBounds::new(100.0, 0.0, 1.0);
        assert_eq!(map(0.0, bounds, 0.0), 100.0);
        assert_eq!(map(150.0, bounds, 0.0), 25.0);
        assert_eq!(map(200.0, bounds, 0.0), 0.0);
    }

    #[test]
    fn test_rtl_mirrors_track() {
        let bounds = RangeBounds::default();
        let rtl = |x| map_touch_to_value(x, &TRACK, &bounds, 20.0, TextDirection::Rtl);
        assert_eq!(rtl(0.0), map(200.0, bounds, 20.0));
        assert_eq!(rtl(200.0), map(0.0, bounds, 20.0));
        assert_eq!(rtl(100.0), 50.0);
    }

    #[test]
    fn test_zero_width_track_is_not_finite() {
        let rect = Rect::new(10.0, 0.0);
        let bounds = RangeBounds::default();
        let value = map_touch_to_value(10.0, &rect, &bounds, 15.0, TextDirection::Ltr);
        assert!(!value.is_finite());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("rtl".parse::<TextDirection>().unwrap(), TextDirection::Rtl);
        assert_eq!("LTR".parse::<TextDirection>().unwrap(), TextDirection::Ltr);
        assert!("auto".parse::<TextDirection>().is_err());
        assert_eq!(TextDirection::Rtl.to_string(), "rtl");
    }
}
