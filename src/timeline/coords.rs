//! Conversions between calendar-day offsets, pixels and lane indices.

use super::{DAY_WIDTH, DateWindow, LANE_HEIGHT};
use chrono::NaiveDate;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 5.0;
pub const ZOOM_STEP: f32 = 1.5;

/// Days between `date` and the start of the window. Negative for dates
/// before the window; whole-valued, but kept real so pointer positions and
/// bar positions share one axis.
pub fn date_to_offset_days(date: NaiveDate, window: &DateWindow) -> f64 {
    (date - window.start).num_days() as f64
}

pub fn offset_to_x(offset_days: f64, scale: f32) -> f32 {
    (offset_days * scale as f64 * DAY_WIDTH as f64) as f32
}

pub fn days_to_width(days: f64, scale: f32) -> f32 {
    (days * scale as f64 * DAY_WIDTH as f64) as f32
}

/// Map a pointer x position to a day offset. `None` when the pointer is
/// outside `[0, viewport_width]` or the window is degenerate — callers treat
/// that as "no update this tick".
pub fn x_to_day_offset(x: f32, viewport_width: f32, total_days: i64, scale: f32) -> Option<f64> {
    if viewport_width <= 0.0 || total_days <= 0 || scale <= 0.0 {
        return None;
    }
    if x < 0.0 || x > viewport_width {
        return None;
    }
    let day_width = viewport_width as f64 / (total_days as f64 * scale as f64);
    Some(x as f64 / day_width)
}

/// Map a pointer y position to a lane index. `None` above the timeline.
pub fn y_to_lane(y: f32) -> Option<usize> {
    if y < 0.0 {
        return None;
    }
    Some((y / LANE_HEIGHT).floor().max(0.0) as usize)
}

pub fn lane_to_y(lane: usize) -> f32 {
    lane as f32 * LANE_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(total_days: i64) -> DateWindow {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        DateWindow {
            start,
            end: start + chrono::Duration::days(total_days),
            total_days,
        }
    }

    #[test]
    fn date_offsets_count_days_from_the_window_start() {
        let window = window(30);
        let date = NaiveDate::from_ymd_opt(2021, 1, 11).unwrap();
        assert_eq!(date_to_offset_days(date, &window), 10.0);
        assert_eq!(date_to_offset_days(window.start, &window), 0.0);
    }

    #[test]
    fn offset_to_pixels_round_trips_at_scale_one() {
        // At scale 1 the laid-out width is total_days * DAY_WIDTH, which is
        // exactly where the two mapping formulas agree.
        let total_days = 40i64;
        let viewport = total_days as f32 * DAY_WIDTH;
        for offset in [0.0, 1.0, 2.5, 17.25, 39.9] {
            let x = offset_to_x(offset, 1.0);
            let back = x_to_day_offset(x, viewport, total_days, 1.0).unwrap();
            assert!((back - offset).abs() < 1e-4, "offset {offset} came back as {back}");
        }
    }

    #[test]
    fn pointer_outside_the_viewport_maps_to_none() {
        assert_eq!(x_to_day_offset(-1.0, 1000.0, 40, 1.0), None);
        assert_eq!(x_to_day_offset(1000.5, 1000.0, 40, 1.0), None);
        assert!(x_to_day_offset(0.0, 1000.0, 40, 1.0).is_some());
        assert!(x_to_day_offset(1000.0, 1000.0, 40, 1.0).is_some());
    }

    #[test]
    fn degenerate_windows_map_to_none() {
        assert_eq!(x_to_day_offset(10.0, 0.0, 40, 1.0), None);
        assert_eq!(x_to_day_offset(10.0, 1000.0, 0, 1.0), None);
    }

    #[test]
    fn lane_mapping_round_trips() {
        for lane in 0..6 {
            assert_eq!(y_to_lane(lane_to_y(lane)), Some(lane));
            assert_eq!(y_to_lane(lane_to_y(lane) + LANE_HEIGHT - 0.01), Some(lane));
        }
    }

    #[test]
    fn negative_y_is_outside() {
        assert_eq!(y_to_lane(-0.1), None);
        assert_eq!(y_to_lane(0.0), Some(0));
    }
}
