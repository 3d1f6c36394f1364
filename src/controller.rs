//! Carousel view-state controller.
//!
//! Holds the catalog, the active index, the load status of the active asset
//! and a generation token. Every accepted selection bumps the generation; the
//! renderer keys its per-asset resources on it and callbacks carrying an old
//! generation are discarded.

use std::fmt;

use log::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::Result;

/// Monotonic token identifying one selection of the carousel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen {}", self.0)
    }
}

/// Load status of the active asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    pub active_index: usize,
    pub load: LoadState,
    pub generation: Generation,
}

impl ViewerState {
    pub fn is_asset_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            active_index: 0,
            load: LoadState::Loading,
            generation: Generation::default(),
        }
    }
}

/// What the renderer must start decoding after an accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub index: usize,
    pub generation: Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(LoadRequest),
    Unchanged,
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed(_))
    }

    pub fn request(self) -> Option<LoadRequest> {
        match self {
            Transition::Changed(request) => Some(request),
            Transition::Unchanged => None,
        }
    }
}

/// Result of a renderer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Accepted,
    /// Callback for a generation that is no longer current
    Stale,
    /// Current generation, but its outcome was already reported
    Duplicate,
}

pub struct ViewerController {
    catalog: Catalog,
    state: ViewerState,
    failure: Option<String>,
}

impl ViewerController {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: ViewerState::default(),
            failure: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn active_entry(&self) -> &CatalogEntry {
        &self.catalog.entries()[self.state.active_index]
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Navigation is allowed whenever no load is in flight, including after
    /// a failed load.
    pub fn can_navigate(&self) -> bool {
        !self.state.is_loading()
    }

    /// Request for the asset shown at start-up
    pub fn initial_request(&self) -> LoadRequest {
        LoadRequest {
            index: self.state.active_index,
            generation: self.state.generation,
        }
    }

    pub fn select_next(&mut self) -> Transition {
        if !self.can_navigate() {
            return Transition::Unchanged;
        }
        self.activate(self.catalog.wrap_next(self.state.active_index))
    }

    pub fn select_previous(&mut self) -> Transition {
        if !self.can_navigate() {
            return Transition::Unchanged;
        }
        self.activate(self.catalog.wrap_previous(self.state.active_index))
    }

    /// Out-of-range indices are rejected even while a load is in flight.
    pub fn select_index(&mut self, index: usize) -> Result<Transition> {
        self.catalog.check_index(index)?;
        if !self.can_navigate() || index == self.state.active_index {
            return Ok(Transition::Unchanged);
        }
        Ok(self.activate(index))
    }

    /// Reload the active entry after a failure
    pub fn retry(&mut self) -> Transition {
        if self.state.load != LoadState::Failed {
            return Transition::Unchanged;
        }
        self.activate(self.state.active_index)
    }

    pub fn notify_asset_loaded(&mut self, generation: Generation) -> Notification {
        let verdict = self.gate(generation);
        if verdict == Notification::Accepted {
            self.state.load = LoadState::Ready;
        }
        verdict
    }

    pub fn notify_asset_failed(&mut self, generation: Generation, reason: impl Into<String>) -> Notification {
        let verdict = self.gate(generation);
        if verdict == Notification::Accepted {
            self.state.load = LoadState::Failed;
            self.failure = Some(reason.into());
        }
        verdict
    }

    fn gate(&self, generation: Generation) -> Notification {
        if generation != self.state.generation {
            debug!("ignoring callback for {generation}, current is {}", self.state.generation);
            Notification::Stale
        } else if !self.state.is_loading() {
            Notification::Duplicate
        } else {
            Notification::Accepted
        }
    }

    fn activate(&mut self, index: usize) -> Transition {
        self.state = ViewerState {
            active_index: index,
            load: LoadState::Loading,
            generation: self.state.generation.next(),
        };
        self.failure = None;

        Transition::Changed(LoadRequest {
            index,
            generation: self.state.generation,
        })
    }
}
