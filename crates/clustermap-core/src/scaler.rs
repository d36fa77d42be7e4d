//! Reference-space to render-space conversion.

use serde::{Deserialize, Serialize};

use crate::types::{MapSettings, Position};

/// Pixel size of the map as currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSize {
    pub width: i32,
    pub height: i32,
}

impl RenderSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Render at the reference extents (scale 1:1).
    pub fn reference(settings: &MapSettings) -> Self {
        Self {
            width: settings.reference_width,
            height: settings.reference_height,
        }
    }
}

/// Scale one axis: `round(value / reference_extent * render_extent)`.
///
/// No clamping is applied, so values beyond the reference extent land outside
/// the rendered map. A zero reference extent yields 0.
pub fn to_render_pixel(reference_value: i32, reference_extent: i32, render_extent: i32) -> i32 {
    scale(reference_value, reference_extent, render_extent).round() as i32
}

fn scale(reference_value: i32, reference_extent: i32, render_extent: i32) -> f64 {
    if reference_extent == 0 {
        return 0.0;
    }
    f64::from(reference_value) / f64::from(reference_extent) * f64::from(render_extent)
}

/// Scale a reference-space position to render space.
pub fn to_render_position(position: Position, settings: &MapSettings, size: RenderSize) -> Position {
    Position {
        left: to_render_pixel(position.left, settings.reference_width, size.width),
        top: to_render_pixel(position.top, settings.reference_height, size.height),
    }
}

/// Top-left corner of an icon of diameter `icon_size` centered on `position`.
///
/// Computed from the unrounded center and rounded once, so odd sizes are not
/// shifted by half a pixel.
pub fn icon_origin(
    position: Position,
    settings: &MapSettings,
    size: RenderSize,
    icon_size: i32,
) -> Position {
    let half = f64::from(icon_size) / 2.0;
    let left = scale(position.left, settings.reference_width, size.width) - half;
    let top = scale(position.top, settings.reference_height, size.height) - half;
    Position {
        left: left.round() as i32,
        top: top.round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_map_to_endpoints() {
        for (extent, render) in [(1026, 513), (1325, 2650), (7, 3), (100, 100)] {
            assert_eq!(to_render_pixel(0, extent, render), 0);
            assert_eq!(to_render_pixel(extent, extent, render), render);
        }
    }

    #[test]
    fn test_monotonic_in_value() {
        let mut last = i32::MIN;
        for value in -50..1100 {
            let px = to_render_pixel(value, 1026, 700);
            assert!(px >= last, "not monotonic at {}", value);
            last = px;
        }
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 1/3 * 100 = 33.33
        assert_eq!(to_render_pixel(1, 3, 100), 33);
        // 2/3 * 100 = 66.67
        assert_eq!(to_render_pixel(2, 3, 100), 67);
    }

    #[test]
    fn test_no_clamping_outside_reference() {
        assert_eq!(to_render_pixel(200, 100, 50), 100);
        assert_eq!(to_render_pixel(-10, 100, 50), -5);
    }

    #[test]
    fn test_zero_extent_is_total() {
        assert_eq!(to_render_pixel(10, 0, 500), 0);
    }

    #[test]
    fn test_axes_use_their_own_extents() {
        let settings = MapSettings::new(200, 100, 60, 25).unwrap();
        let pos = to_render_position(Position::new(50, 50), &settings, RenderSize::new(1000, 1000));
        assert_eq!(pos, Position::new(500, 250));
    }

    #[test]
    fn test_icon_centered_on_point() {
        let settings = MapSettings::default();
        let size = RenderSize::reference(&settings);
        let origin = icon_origin(Position::new(100, 200), &settings, size, 60);
        assert_eq!(origin, Position::new(70, 170));

        let origin = icon_origin(Position::new(100, 200), &settings, size, 25);
        assert_eq!(origin, Position::new(88, 188));
    }

    #[test]
    fn test_icon_origin_rounds_once() {
        // center (66.67, 33.33) minus 12.5
        let settings = MapSettings::new(3, 3, 60, 25).unwrap();
        let origin = icon_origin(Position::new(2, 1), &settings, RenderSize::new(100, 100), 25);
        assert_eq!(origin, Position::new(54, 21));
    }
}
