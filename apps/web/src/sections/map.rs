//! Locations map state: one marker per location, view fitting, selection.
//!
//! Markers are owned handles kept in load order. Any change to the location
//! set goes through `reconcile`, which detaches every tracked marker and then
//! recreates the full set; there is no incremental diffing.

use serde::Serialize;

use crate::models::{LatLng, Location};

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.4173,
    lng: -82.9071,
};
pub const DEFAULT_ZOOM: u8 = 4;
/// Zoom once locations are loaded; fixed rather than fitted to the bounds.
pub const LOADED_ZOOM: u8 = 6;
pub const SELECTED_ZOOM: u8 = 15;

/// The map provider as seen by the locations section.
pub trait MapWidget {
    type Marker;

    fn attach(&mut self, index: usize, title: &str, position: LatLng) -> Self::Marker;
    fn detach(&mut self, marker: Self::Marker);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn around(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    south: p.lat,
                    west: p.lng,
                    north: p.lat,
                    east: p.lng,
                },
                Some(b) => Bounds {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lng),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lng),
                },
            })
        })
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }
}

pub struct LocationsMap<W: MapWidget> {
    widget: W,
    markers: Vec<W::Marker>,
    locations: Vec<Location>,
    center: LatLng,
    zoom: u8,
    selected: Option<usize>,
}

impl<W: MapWidget> LocationsMap<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            markers: Vec::new(),
            locations: Vec::new(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            selected: None,
        }
    }

    /// Replaces the location set, fits the view and rebuilds every marker.
    pub fn load(&mut self, locations: Vec<Location>) {
        self.locations = locations;
        self.selected = None;

        match Bounds::around(self.locations.iter().filter_map(Location::coordinates)) {
            Some(bounds) => {
                self.center = bounds.center();
                self.zoom = LOADED_ZOOM;
            }
            None => {
                self.center = DEFAULT_CENTER;
                self.zoom = DEFAULT_ZOOM;
            }
        }

        self.reconcile();
    }

    /// Selects a location from the list or a marker. Out-of-range indexes and
    /// locations without coordinates are ignored.
    pub fn select(&mut self, index: usize) -> Option<&Location> {
        let location = self.locations.get(index)?;
        let position = location.coordinates()?;
        self.center = position;
        self.zoom = SELECTED_ZOOM;
        self.selected = Some(index);
        self.locations.get(index)
    }

    pub fn selected(&self) -> Option<(usize, &Location)> {
        self.selected
            .and_then(|i| self.locations.get(i).map(|loc| (i, loc)))
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[cfg(test)]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    fn reconcile(&mut self) {
        self.clear_markers();
        for (index, location) in self.locations.iter().enumerate() {
            if let Some(position) = location.coordinates() {
                let marker = self.widget.attach(index, &location.name, position);
                self.markers.push(marker);
            }
        }
    }

    fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.widget.detach(marker);
        }
    }
}

impl<W: MapWidget> Drop for LocationsMap<W> {
    fn drop(&mut self) {
        self.clear_markers();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerId(u64);

/// Marker as handed to the browser-side maps script.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkerSpec {
    pub id: u64,
    pub index: usize,
    pub title: String,
    pub position: LatLng,
}

/// Server-side stand-in for the maps widget: tracks live markers so they can
/// be serialised into the page.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    next_id: u64,
    active: Vec<MarkerSpec>,
}

impl MarkerLayer {
    pub fn active(&self) -> &[MarkerSpec] {
        &self.active
    }
}

impl MapWidget for MarkerLayer {
    type Marker = MarkerId;

    fn attach(&mut self, index: usize, title: &str, position: LatLng) -> MarkerId {
        self.next_id += 1;
        self.active.push(MarkerSpec {
            id: self.next_id,
            index,
            title: title.to_string(),
            position,
        });
        MarkerId(self.next_id)
    }

    fn detach(&mut self, marker: MarkerId) {
        self.active.retain(|m| m.id != marker.0);
    }
}
