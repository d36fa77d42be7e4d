//! Render model: positioned icons over one background map.
//!
//! [`LiveMap`] owns the two remote resources and decides what to show for
//! every combination of their states.

use serde::Serialize;

use crate::error::FetchError;
use crate::fetch::{RequestTicket, Resource};
use crate::overlay::{IconVariant, SessionOverlay};
use crate::registry::short_id;
use crate::scaler::{icon_origin, RenderSize};
use crate::types::{HostModel, InteractionState};

/// One host icon, keyed by host id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub key: String,
    pub label: String,
    pub left: i32,
    pub top: i32,
    pub size: i32,
    pub variant: IconVariant,
    pub state: InteractionState,
}

/// A renderable map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub width: i32,
    pub height: i32,
    pub icons: Vec<Icon>,
    pub warnings: Vec<String>,
}

impl MapView {
    pub fn active_count(&self) -> usize {
        self.icons.iter().filter(|i| i.variant.is_active()).count()
    }
}

/// What to display for the current fetch states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutput {
    /// The first host load failed; there is nothing to draw
    Fatal { message: String },
    /// Hosts are loading for the first time
    Loading,
    /// Hosts are known, sessions are loading for the first time
    SessionsLoading,
    Map(MapView),
}

impl RenderOutput {
    pub fn map(&self) -> Option<&MapView> {
        match self {
            RenderOutput::Map(view) => Some(view),
            _ => None,
        }
    }
}

/// Place every host of `model`, the moving one included, on a map of `size`.
pub fn icons(model: &HostModel, overlay: &SessionOverlay, size: RenderSize) -> Vec<Icon> {
    let settings = &model.map_settings;

    model
        .all_hosts()
        .into_iter()
        .map(|host| {
            let variant = overlay.variant_for(host);
            let icon_size = if variant.is_active() {
                settings.active_icon_size
            } else {
                settings.empty_icon_size
            };
            let origin = icon_origin(host.position, settings, size, icon_size);

            Icon {
                key: host.id.clone(),
                label: short_id(&host.id).to_string(),
                left: origin.left,
                top: origin.top,
                size: icon_size,
                variant,
                state: host.interaction_state,
            }
        })
        .collect()
}

/// Live "who is where" view: hosts fetched once, sessions refreshed.
#[derive(Debug)]
pub struct LiveMap {
    hosts: Resource<HostModel>,
    sessions: Resource<SessionOverlay>,
    size: Option<RenderSize>,
    background: Option<String>,
}

impl LiveMap {
    /// Both resources start in `Loading`.
    pub fn new(size: Option<RenderSize>, background: Option<String>) -> Self {
        Self {
            hosts: Resource::new("hosts"),
            sessions: Resource::new("sessions"),
            size,
            background,
        }
    }

    pub fn hosts(&self) -> &Resource<HostModel> {
        &self.hosts
    }

    pub fn sessions(&self) -> &Resource<SessionOverlay> {
        &self.sessions
    }

    pub fn begin_hosts(&mut self) -> RequestTicket {
        self.hosts.begin()
    }

    pub fn begin_sessions(&mut self) -> RequestTicket {
        self.sessions.begin()
    }

    pub fn complete_hosts(
        &mut self,
        ticket: RequestTicket,
        result: Result<HostModel, FetchError>,
    ) -> bool {
        self.hosts.complete(ticket, result)
    }

    pub fn complete_sessions(
        &mut self,
        ticket: RequestTicket,
        result: Result<SessionOverlay, FetchError>,
    ) -> bool {
        self.sessions.complete(ticket, result)
    }

    /// Decide what to draw.
    ///
    /// A reload of data that was loaded before keeps showing the old data
    /// without a warning. Failures with cached data add a warning. Only a
    /// transport failure of the first host load is fatal.
    pub fn render(&self) -> RenderOutput {
        let mut warnings = Vec::new();

        let empty_model = HostModel::default();
        let model = match (self.hosts.state().error(), self.hosts.data()) {
            // A payload that arrived but does not decode leaves an empty map.
            (Some(FetchError::Decode(e)), None) => {
                warnings.push(format!("Host list could not be read: {}", e));
                &empty_model
            }
            (Some(e), None) => {
                return RenderOutput::Fatal {
                    message: format!("Could not load hosts: {}", e),
                }
            }
            (Some(e), Some(model)) => {
                warnings.push(format!("Host list may be outdated: {}", e));
                model
            }
            (None, Some(model)) => model,
            (None, None) => return RenderOutput::Loading,
        };

        let empty = SessionOverlay::default();
        let overlay = match (self.sessions.state().error(), self.sessions.data()) {
            (Some(e), cached) => {
                warnings.push(format!("Sessions may be outdated: {}", e));
                cached.unwrap_or(&empty)
            }
            (None, Some(overlay)) => overlay,
            (None, None) => return RenderOutput::SessionsLoading,
        };

        let size = self
            .size
            .unwrap_or_else(|| RenderSize::reference(&model.map_settings));

        RenderOutput::Map(MapView {
            background: self.background.clone(),
            width: size.width,
            height: size.height,
            icons: icons(model, overlay, size),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::types::{
        Host, MapSettings, Position, Session, DEFAULT_REFERENCE_HEIGHT, DEFAULT_REFERENCE_WIDTH,
    };

    fn transport_error() -> FetchError {
        FetchError::Transport(TransportError::Status {
            url: "http://test/sessions".to_string(),
            status: 500,
        })
    }

    fn model() -> HostModel {
        HostModel::new(
            MapSettings::new(1000, 500, 60, 20).unwrap(),
            vec![
                Host::new("f1r1s1.codam.nl", Position::new(100, 200)),
                Host::new("f1r1s2.codam.nl", Position::new(250, 500)),
            ],
        )
    }

    #[test]
    fn test_icons_scaled_and_centered() {
        let overlay = SessionOverlay::new(vec![Session::new("alice", "f1r1s1")]);
        let icons = icons(&model(), &overlay, RenderSize::new(1000, 2000));

        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].key, "f1r1s1.codam.nl");
        assert_eq!(icons[0].label, "f1r1s1");
        // (100/500*1000, 200/1000*2000) = (200, 400), minus half of 60
        assert_eq!((icons[0].left, icons[0].top), (170, 370));
        assert_eq!(icons[0].size, 60);
        assert!(icons[0].variant.is_active());

        // (500, 1000) minus half of 20
        assert_eq!((icons[1].left, icons[1].top), (490, 990));
        assert_eq!(icons[1].variant, IconVariant::Empty);
    }

    #[test]
    fn test_icons_include_moving_host() {
        let mut model = model();
        model.start_drag("f1r1s2.codam.nl");
        let icons = icons(&model, &SessionOverlay::default(), RenderSize::new(500, 1000));
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[1].state, InteractionState::Dragging);
    }

    #[test]
    fn test_initial_state_is_loading() {
        let map = LiveMap::new(None, None);
        assert_eq!(map.render(), RenderOutput::Loading);
    }

    #[test]
    fn test_first_host_transport_failure_is_fatal() {
        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Err(transport_error()));

        assert!(matches!(map.render(), RenderOutput::Fatal { .. }));
    }

    #[test]
    fn test_first_host_decode_failure_renders_empty_map() {
        use crate::error::DecodeError;

        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(
            t,
            Err(FetchError::Decode(DecodeError::MissingHostname { index: 0 })),
        );
        let t = map.begin_sessions();
        map.complete_sessions(t, Ok(SessionOverlay::default()));

        let output = map.render();
        let view = output.map().unwrap();
        assert!(view.icons.is_empty());
        assert_eq!(view.warnings.len(), 1);
        assert!(view.warnings[0].contains("no hostname"));
        assert_eq!(
            (view.width, view.height),
            (DEFAULT_REFERENCE_WIDTH, DEFAULT_REFERENCE_HEIGHT)
        );
    }

    #[test]
    fn test_host_decode_failure_with_cache_keeps_hosts() {
        use crate::error::DecodeError;

        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        let t = map.begin_sessions();
        map.complete_sessions(t, Ok(SessionOverlay::default()));
        let t = map.begin_hosts();
        map.complete_hosts(
            t,
            Err(FetchError::Decode(DecodeError::UnrecognizedShape(
                "number".to_string(),
            ))),
        );

        let output = map.render();
        let view = output.map().unwrap();
        assert_eq!(view.icons.len(), 2);
        assert!(view.warnings[0].contains("Host list may be outdated"));
    }

    #[test]
    fn test_sessions_loading_placeholder_on_first_load() {
        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        map.begin_sessions();

        assert_eq!(map.render(), RenderOutput::SessionsLoading);
    }

    #[test]
    fn test_session_reload_keeps_stale_data_silently() {
        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        let t = map.begin_sessions();
        map.complete_sessions(t, Ok(SessionOverlay::new(vec![Session::new("a", "f1r1s1")])));
        map.begin_sessions();

        let output = map.render();
        let view = output.map().unwrap();
        assert!(view.warnings.is_empty());
        assert_eq!(view.active_count(), 1);
    }

    #[test]
    fn test_session_failure_without_cache_renders_empty_with_warning() {
        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        let t = map.begin_sessions();
        map.complete_sessions(t, Err(transport_error()));

        let output = map.render();
        let view = output.map().unwrap();
        assert_eq!(view.active_count(), 0);
        assert_eq!(view.warnings.len(), 1);
        assert!(view.warnings[0].contains("Sessions may be outdated"));
    }

    #[test]
    fn test_host_refresh_failure_with_cache_warns() {
        let mut map = LiveMap::new(None, None);
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        let t = map.begin_sessions();
        map.complete_sessions(t, Ok(SessionOverlay::default()));
        let t = map.begin_hosts();
        map.complete_hosts(t, Err(transport_error()));

        let output = map.render();
        let view = output.map().unwrap();
        assert_eq!(view.icons.len(), 2);
        assert!(view.warnings[0].contains("Host list may be outdated"));
    }

    #[test]
    fn test_default_size_is_reference() {
        let mut map = LiveMap::new(None, Some("map.svg".to_string()));
        let t = map.begin_hosts();
        map.complete_hosts(t, Ok(model()));
        let t = map.begin_sessions();
        map.complete_sessions(t, Ok(SessionOverlay::default()));

        let output = map.render();
        let view = output.map().unwrap();
        assert_eq!((view.width, view.height), (500, 1000));
        assert_eq!(view.background.as_deref(), Some("map.svg"));
    }
}
