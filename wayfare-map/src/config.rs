use std::time::Duration;

use wayfare_core::Coordinate;

/// Pixel size of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Map layout constants.
///
/// # Examples
///
/// ```
/// use wayfare_map::MapConfig;
///
/// let config = MapConfig::default().with_viewport(1280, 720);
/// assert_eq!(config.max_fit_zoom, 12);
/// assert_eq!(config.viewport.width, 1280);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Surface the camera is fitted to.
    pub viewport: Viewport,
    /// Padding kept clear on every side when fitting markers.
    pub padding: u32,
    /// Upper bound for fitted zoom, so a single marker is not shown at
    /// street level.
    pub max_fit_zoom: u8,
    /// Zoom used when centring on a focus point or the neutral view.
    pub default_zoom: u8,
    /// Zoom a fly-to transition ends at.
    pub focus_zoom: u8,
    /// Length of a fly-to transition.
    pub fly_duration: Duration,
    /// Ease-out linearity of transitions, `0.0..=1.0`; lower is curvier.
    pub ease_linearity: f64,
    /// Centre of the neutral view.
    pub neutral_centre: Coordinate,
    /// Edge length of marker thumbnails in pixels.
    pub marker_size: u32,
    /// Raster tile URL template.
    pub tile_url: String,
    /// Attribution shown with the tiles.
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                width: 960,
                height: 540,
            },
            padding: 50,
            max_fit_zoom: 12,
            default_zoom: 13,
            focus_zoom: 16,
            fly_duration: Duration::from_millis(1500),
            ease_linearity: 0.25,
            neutral_centre: Coordinate {
                lat: 51.505,
                lon: -0.09,
            },
            marker_size: 48,
            tile_url: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
                .to_owned(),
            attribution: "\u{a9} OpenStreetMap contributors \u{a9} CARTO".to_owned(),
        }
    }
}

impl MapConfig {
    /// Set the viewport size.
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Set the fit padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the maximum fitted zoom.
    #[must_use]
    pub const fn with_max_fit_zoom(mut self, zoom: u8) -> Self {
        self.max_fit_zoom = zoom;
        self
    }

    /// Set the fly-to duration.
    #[must_use]
    pub const fn with_fly_duration(mut self, duration: Duration) -> Self {
        self.fly_duration = duration;
        self
    }

    /// Pixel offset that centres a thumbnail on its coordinate.
    #[must_use]
    pub const fn marker_anchor(&self) -> u32 {
        self.marker_size.div_euclid(2)
    }
}
