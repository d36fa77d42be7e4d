//! Type definitions shared by the live map and the layout editor.
//!
//! Positions are always expressed in reference space: pixels of the map image
//! the layout was authored against, as recorded in [`MapSettings`].

use serde::Serialize;

/// Fallback reference height when a host source carries no map settings.
pub const DEFAULT_REFERENCE_HEIGHT: i32 = 1325;
/// Fallback reference width when a host source carries no map settings.
pub const DEFAULT_REFERENCE_WIDTH: i32 = 1026;
/// Fallback diameter of an icon with an active session.
pub const DEFAULT_ACTIVE_SIZE: i32 = 60;
/// Fallback diameter of an icon without a session.
pub const DEFAULT_EMPTY_SIZE: i32 = 25;
/// Position given to hosts whose entry has no left/top.
pub const FALLBACK_POSITION: Position = Position { left: 50, top: 50 };

/// Reference map dimensions and icon diameters.
///
/// All four values are positive; [`MapSettings::new`] is the only checked
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub reference_height: i32,
    pub reference_width: i32,
    pub active_icon_size: i32,
    pub empty_icon_size: i32,
}

impl MapSettings {
    /// Build settings, returning `None` if any value is not positive.
    pub fn new(
        reference_height: i32,
        reference_width: i32,
        active_icon_size: i32,
        empty_icon_size: i32,
    ) -> Option<Self> {
        let all_positive = [
            reference_height,
            reference_width,
            active_icon_size,
            empty_icon_size,
        ]
        .iter()
        .all(|v| *v > 0);

        all_positive.then_some(Self {
            reference_height,
            reference_width,
            active_icon_size,
            empty_icon_size,
        })
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            reference_width: DEFAULT_REFERENCE_WIDTH,
            active_icon_size: DEFAULT_ACTIVE_SIZE,
            empty_icon_size: DEFAULT_EMPTY_SIZE,
        }
    }
}

/// A (left, top) point in reference-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// Pointer interaction state of a host icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    Dragging,
}

/// A workstation placed on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// Dot-delimited hostname, unique within a registry
    pub id: String,
    pub position: Position,
    pub interaction_state: InteractionState,
}

impl Host {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            interaction_state: InteractionState::Idle,
        }
    }
}

/// An active login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    /// Host token as reported by the session source, possibly a short name
    pub host_id: String,
}

impl Session {
    pub fn new(username: impl Into<String>, host_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            host_id: host_id.into(),
        }
    }
}

/// The host being dragged, with the slot it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingHost {
    pub host: Host,
    pub(crate) index: usize,
}

/// Map settings plus the registry of hosts.
///
/// `moving`, when present, is not part of `hosts`. The union of the two is
/// conserved across a drag cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostModel {
    pub map_settings: MapSettings,
    pub(crate) hosts: Vec<Host>,
    pub(crate) moving: Option<MovingHost>,
}

impl HostModel {
    pub fn new(map_settings: MapSettings, hosts: Vec<Host>) -> Self {
        Self {
            map_settings,
            hosts,
            moving: None,
        }
    }

    /// Hosts at rest, in registry order. Excludes the moving host.
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// The host currently being dragged, if any.
    pub fn moving_host(&self) -> Option<&Host> {
        self.moving.as_ref().map(|m| &m.host)
    }

    /// All hosts in registry order, with the moving host in its original slot.
    pub fn all_hosts(&self) -> Vec<&Host> {
        let mut all: Vec<&Host> = self.hosts.iter().collect();
        if let Some(moving) = &self.moving {
            let index = moving.index.min(all.len());
            all.insert(index, &moving.host);
        }
        all
    }

    /// Number of hosts including the moving one.
    pub fn len(&self) -> usize {
        self.hosts.len() + usize::from(self.moving.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a host by exact id, including the moving host.
    pub fn get(&self, id: &str) -> Option<&Host> {
        self.hosts
            .iter()
            .find(|h| h.id == id)
            .or_else(|| self.moving_host().filter(|h| h.id == id))
    }
}
