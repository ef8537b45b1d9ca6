//! Spherical Web Mercator, as used by slippy-map tile servers.
//!
//! Pixel coordinates grow east (`x`) and south (`y`); the world is
//! `256 * 2^zoom` pixels square.

use std::f64::consts::PI;

use geo::{Coord, Rect};
use wayfare_core::Coordinate;

use crate::config::MapConfig;
use crate::flight::Camera;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude at which the projection becomes a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Pixel position of `coordinate` at `zoom`.
#[expect(clippy::float_arithmetic, reason = "Web Mercator projection")]
#[must_use]
pub fn project(coordinate: Coordinate, zoom: f64) -> Coord<f64> {
    let scale = TILE_SIZE * zoom.exp2();
    let lat = coordinate
        .lat
        .clamp(-MAX_LATITUDE, MAX_LATITUDE)
        .to_radians();
    Coord {
        x: scale * (coordinate.lon + 180.0) / 360.0,
        y: scale * (1.0 - lat.tan().asinh() / PI) / 2.0,
    }
}

/// Inverse of [`project`].
#[expect(clippy::float_arithmetic, reason = "Web Mercator projection")]
#[must_use]
pub fn unproject(point: Coord<f64>, zoom: f64) -> Coordinate {
    let scale = TILE_SIZE * zoom.exp2();
    let lon = point.x / scale * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * point.y / scale)).sinh().atan().to_degrees();
    Coordinate {
        lat: lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        lon: lon.clamp(-180.0, 180.0),
    }
}

/// Pixel extent of `bounds` (`x` = longitude, `y` = latitude) at `zoom`.
#[expect(clippy::float_arithmetic, reason = "pixel spans")]
fn span(bounds: Rect<f64>, zoom: f64) -> Coord<f64> {
    let (north_west, south_east) = corners(bounds, zoom);
    Coord {
        x: south_east.x - north_west.x,
        y: south_east.y - north_west.y,
    }
}

fn corners(bounds: Rect<f64>, zoom: f64) -> (Coord<f64>, Coord<f64>) {
    let (min, max) = (bounds.min(), bounds.max());
    (
        project(Coordinate { lat: max.y, lon: min.x }, zoom),
        project(Coordinate { lat: min.y, lon: max.x }, zoom),
    )
}

/// Largest whole zoom, at most `config.max_fit_zoom`, at which `bounds`
/// fits inside the padded viewport.
///
/// Returns zero when even the whole world does not fit.
#[must_use]
pub fn fit_zoom(bounds: Rect<f64>, config: &MapConfig) -> u8 {
    let inset = config.padding.saturating_mul(2);
    let available = Coord {
        x: f64::from(config.viewport.width.saturating_sub(inset)),
        y: f64::from(config.viewport.height.saturating_sub(inset)),
    };
    (0..=config.max_fit_zoom)
        .rev()
        .find(|&zoom| {
            let extent = span(bounds, f64::from(zoom));
            extent.x <= available.x && extent.y <= available.y
        })
        .unwrap_or_default()
}

/// Camera showing all of `bounds` with the configured padding.
#[expect(clippy::float_arithmetic, reason = "pixel midpoint")]
#[must_use]
pub fn fit(bounds: Rect<f64>, config: &MapConfig) -> Camera {
    let zoom = f64::from(fit_zoom(bounds, config));
    let (north_west, south_east) = corners(bounds, zoom);
    let middle = Coord {
        x: (north_west.x + south_east.x) / 2.0,
        y: (north_west.y + south_east.y) / 2.0,
    };
    Camera {
        centre: unproject(middle, zoom),
        zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rect(south: f64, west: f64, north: f64, east: f64) -> Rect<f64> {
        Rect::new(Coord { x: west, y: south }, Coord { x: east, y: north })
    }

    #[rstest]
    fn origin_sits_in_the_middle_of_the_world() {
        let point = project(Coordinate { lat: 0.0, lon: 0.0 }, 0.0);
        assert!((point.x - 128.0).abs() < 1e-9);
        assert!((point.y - 128.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(48.8566, 2.3522, 5.0)]
    #[case(-33.8688, 151.2093, 12.0)]
    #[case(64.1466, -21.9426, 0.0)]
    fn unproject_inverts_project(#[case] lat: f64, #[case] lon: f64, #[case] zoom: f64) {
        let back = unproject(project(Coordinate { lat, lon }, zoom), zoom);
        assert!((back.lat - lat).abs() < 1e-9);
        assert!((back.lon - lon).abs() < 1e-9);
    }

    #[rstest]
    fn a_single_point_fits_at_the_maximum_zoom() {
        let config = MapConfig::default();
        let camera = fit(rect(35.0, 135.75, 35.0, 135.75), &config);
        assert!((camera.zoom - 12.0).abs() < f64::EPSILON);
        assert!((camera.centre.lat - 35.0).abs() < 1e-9);
        assert!((camera.centre.lon - 135.75).abs() < 1e-9);
    }

    #[rstest]
    fn a_city_wide_spread_fits_below_the_maximum() {
        // Roughly Paris, Versailles to Vincennes.
        let bounds = rect(48.80, 2.12, 48.88, 2.44);
        let zoom = fit_zoom(bounds, &MapConfig::default());
        assert_eq!(zoom, 11);
    }

    #[rstest]
    fn the_world_fits_a_large_viewport_at_zoom_one() {
        let world = rect(-80.0, -179.0, 80.0, 179.0);
        assert_eq!(fit_zoom(world, &MapConfig::default()), 1);
    }

    #[rstest]
    fn oversized_bounds_fall_back_to_zoom_zero() {
        let config = MapConfig::default().with_viewport(300, 300);
        assert_eq!(fit_zoom(rect(-80.0, -179.0, 80.0, 179.0), &config), 0);
    }

    #[rstest]
    fn padding_larger_than_the_viewport_gives_zoom_zero() {
        let config = MapConfig::default().with_viewport(80, 80);
        assert_eq!(fit_zoom(rect(1.0, 1.0, 1.1, 1.1), &config), 0);
    }
}
