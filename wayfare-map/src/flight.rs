use std::time::Duration;

use serde::Serialize;
use wayfare_core::Coordinate;

/// What the map is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// Centre of the viewport.
    pub centre: Coordinate,
    /// Fractional zoom level; whole numbers outside transitions.
    pub zoom: f64,
}

/// Lowest accepted linearity; anything below makes the curve a step.
const MIN_EASE_LINEARITY: f64 = 0.2;

/// An animated camera move towards a selected marker.
///
/// Progress follows an ease-out curve `1 - (1 - t)^(1 / linearity)`, so the
/// camera starts fast and settles gently.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wayfare_core::Coordinate;
/// use wayfare_map::{Camera, FlyTo};
///
/// let from = Camera { centre: Coordinate { lat: 0.0, lon: 0.0 }, zoom: 10.0 };
/// let to = Camera { centre: Coordinate { lat: 1.0, lon: 1.0 }, zoom: 16.0 };
/// let flight = FlyTo::new(from, to, Duration::from_millis(1500), 0.25);
/// assert_eq!(flight.sample(Duration::ZERO), from);
/// assert_eq!(flight.sample(Duration::from_secs(9)), to);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    from: Camera,
    to: Camera,
    #[serde(serialize_with = "serialize_secs")]
    duration: Duration,
    ease_power: f64,
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl FlyTo {
    /// Plan a transition from `from` to `to`.
    #[expect(clippy::float_arithmetic, reason = "ease exponent")]
    #[must_use]
    pub fn new(from: Camera, to: Camera, duration: Duration, ease_linearity: f64) -> Self {
        Self {
            from,
            to,
            duration,
            ease_power: 1.0 / ease_linearity.max(MIN_EASE_LINEARITY),
        }
    }

    /// Where the transition ends.
    #[must_use]
    pub const fn target(&self) -> Camera {
        self.to
    }

    /// Total length of the transition.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the transition is over after `elapsed`.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Camera position `elapsed` into the transition, clamped at the end.
    #[expect(clippy::float_arithmetic, reason = "camera interpolation")]
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Camera {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - progress).powf(self.ease_power);
        let lerp = |start: f64, end: f64| start + (end - start) * eased;
        Camera {
            centre: Coordinate {
                lat: lerp(self.from.centre.lat, self.to.centre.lat),
                lon: lerp(self.from.centre.lon, self.to.centre.lon),
            },
            zoom: lerp(self.from.zoom, self.to.zoom),
        }
    }
}
