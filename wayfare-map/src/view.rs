use std::time::Duration;

use geo::{BoundingRect, MultiPoint, Point, Rect};
use serde::Serialize;
use wayfare_core::{Coordinate, Place, ResolvedViewModel};

use crate::config::MapConfig;
use crate::flight::{Camera, FlyTo};
use crate::marker::{InfoPanel, Marker};
use crate::projection;

/// How a marker was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The pointer moved over the marker; opens the panel in place.
    PointerEnter,
    /// The marker was clicked; opens the panel and flies to it.
    Click,
}

/// Where the map is in its lifecycle.
///
/// ```text
/// Unbound --update--> Fitted | Centered | Neutral
/// Fitted --select--> Selected --select--> Selected
/// any --update with new inputs--> Fitted | Centered | Neutral
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState {
    /// No inputs yet.
    Unbound,
    /// Nothing to show; the neutral default view.
    Neutral,
    /// No mappable points, centred on the focus coordinate.
    Centered(Coordinate),
    /// Camera fitted to the markers' bounds (`x` = longitude).
    Fitted(Rect<f64>),
    /// A marker is selected within fitted bounds.
    Selected {
        /// Bounds of all markers.
        bounds: Rect<f64>,
        /// Index into [`MapView::markers`].
        marker: usize,
    },
}

impl ViewState {
    /// Short lower-case name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unbound => "unbound",
            Self::Neutral => "neutral",
            Self::Centered(_) => "centered",
            Self::Fitted(_) => "fitted",
            Self::Selected { .. } => "selected",
        }
    }

    const fn bounds(&self) -> Option<Rect<f64>> {
        match self {
            Self::Fitted(bounds) | Self::Selected { bounds, .. } => Some(*bounds),
            Self::Unbound | Self::Neutral | Self::Centered(_) => None,
        }
    }
}

/// Marker bounds as compass edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}

/// Base layer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    /// URL template.
    pub url: String,
    /// Attribution text.
    pub attribution: String,
}

/// Everything a renderer needs to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// [`ViewState::label`] of the current state.
    pub state: &'static str,
    /// Current camera.
    pub camera: Camera,
    /// Fitted bounds, when markers exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Markers to draw.
    pub markers: Vec<Marker>,
    /// Open info panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<InfoPanel>,
    /// Transition in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlyTo>,
    /// Base layer.
    pub tiles: TileLayer,
}

/// Interactive map state for one page.
///
/// # Examples
///
/// ```
/// use wayfare_core::PlaceCandidate;
/// use wayfare_map::{MapConfig, MapView};
///
/// let places = vec![
///     PlaceCandidate::new("A", "Spot").with_position(10.0, 20.0).resolve("https://img/a".into()),
///     PlaceCandidate::new("B", "Spot").resolve("https://img/b".into()),
/// ];
/// let mut map = MapView::new(MapConfig::default());
/// assert!(map.update(None, &places));
/// assert_eq!(map.markers().len(), 1);
/// assert_eq!(map.frame().state, "fitted");
/// ```
#[derive(Debug, Clone)]
pub struct MapView {
    config: MapConfig,
    inputs: Option<(Option<Coordinate>, Vec<Place>)>,
    state: ViewState,
    camera: Camera,
    markers: Vec<Marker>,
    panel: Option<InfoPanel>,
    flight: Option<FlyTo>,
    recomputations: usize,
}

impl MapView {
    /// An unbound map showing the neutral view.
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        let camera = neutral_camera(&config);
        Self {
            config,
            inputs: None,
            state: ViewState::Unbound,
            camera,
            markers: Vec::new(),
            panel: None,
            flight: None,
            recomputations: 0,
        }
    }

    /// Layout constants.
    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Current camera.
    #[must_use]
    pub const fn camera(&self) -> Camera {
        self.camera
    }

    /// Markers for the mappable inputs, in input order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The open info panel.
    #[must_use]
    pub const fn panel(&self) -> Option<&InfoPanel> {
        self.panel.as_ref()
    }

    /// Transition in progress.
    #[must_use]
    pub const fn flight(&self) -> Option<&FlyTo> {
        self.flight.as_ref()
    }

    /// How many times the view has been recomputed.
    #[must_use]
    pub const fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Show the map of a resolved page.
    pub fn show(&mut self, model: &ResolvedViewModel) -> bool {
        self.update(model.focus, model.map_points())
    }

    /// Feed new inputs.
    ///
    /// Recomputes markers and camera when `focus` or `points` differ from the
    /// previous call; identical inputs leave the view, including any
    /// selection, untouched. Returns whether a recomputation happened.
    pub fn update(&mut self, focus: Option<Coordinate>, points: &[Place]) -> bool {
        if let Some((previous_focus, previous_points)) = &self.inputs {
            if *previous_focus == focus && previous_points.as_slice() == points {
                return false;
            }
        }
        self.inputs = Some((focus, points.to_vec()));
        self.recompute(focus, points);
        true
    }

    fn recompute(&mut self, focus: Option<Coordinate>, points: &[Place]) {
        let anchor = self.config.marker_anchor();
        self.markers = points
            .iter()
            .enumerate()
            .filter_map(|(index, place)| {
                Marker::for_place(index, place, self.config.marker_size, anchor)
            })
            .collect();
        self.panel = None;
        self.flight = None;
        self.recomputations = self.recomputations.saturating_add(1);

        let bounds = self
            .markers
            .iter()
            .map(|marker| Point::from(marker.position.as_coord()))
            .collect::<MultiPoint<f64>>()
            .bounding_rect();
        (self.state, self.camera) = match (bounds, focus) {
            (Some(rect), _) => (ViewState::Fitted(rect), projection::fit(rect, &self.config)),
            (None, Some(centre)) => (
                ViewState::Centered(centre),
                Camera {
                    centre,
                    zoom: f64::from(self.config.default_zoom),
                },
            ),
            (None, None) => (ViewState::Neutral, neutral_camera(&self.config)),
        };
        log::debug!(
            "map {} with {} of {} points",
            self.state.label(),
            self.markers.len(),
            points.len()
        );
    }

    /// Select the marker at `marker` (an index into [`MapView::markers`]).
    ///
    /// Both interactions open the info panel; a click also starts a fly-to
    /// towards the marker. Returns `None` when there is no such marker.
    pub fn select(&mut self, marker: usize, interaction: Interaction) -> Option<&InfoPanel> {
        let bounds = self.state.bounds()?;
        let selected = self.markers.get(marker)?;
        let panel = selected.panel();
        if interaction == Interaction::Click {
            let target = Camera {
                centre: selected.position,
                zoom: f64::from(self.config.focus_zoom),
            };
            self.flight = Some(FlyTo::new(
                self.camera,
                target,
                self.config.fly_duration,
                self.config.ease_linearity,
            ));
        }
        self.state = ViewState::Selected { bounds, marker };
        self.panel = Some(panel);
        self.panel.as_ref()
    }

    /// Advance the running transition to `elapsed` since it started.
    pub fn advance(&mut self, elapsed: Duration) -> Camera {
        if let Some(flight) = self.flight {
            self.camera = flight.sample(elapsed);
            if flight.is_finished(elapsed) {
                self.flight = None;
            }
        }
        self.camera
    }

    /// A snapshot for rendering.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            state: self.state.label(),
            camera: self.camera,
            bounds: self.state.bounds().map(Bounds::from),
            markers: self.markers.clone(),
            panel: self.panel.clone(),
            flight: self.flight,
            tiles: TileLayer {
                url: self.config.tile_url.clone(),
                attribution: self.config.attribution.clone(),
            },
        }
    }
}

fn neutral_camera(config: &MapConfig) -> Camera {
    Camera {
        centre: config.neutral_centre,
        zoom: f64::from(config.default_zoom),
    }
}
