//! Cluster map core.
//!
//! Shared model behind the live "who is where" map and the layout editor:
//! decoding host and session sources, scaling reference positions to the
//! rendered map, the fetch state machine with periodic session refresh,
//! drag-to-reposition and the canonical layout export.

pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod export;
pub mod fetch;
pub mod overlay;
pub mod registry;
pub mod render;
pub mod scaler;
pub mod storage;
pub mod types;

pub use editor::Editor;
pub use error::{CoreError, DecodeError, FetchError, Result, TransportError};
pub use render::{Icon, LiveMap, MapView, RenderOutput};
pub use types::{Host, HostModel, InteractionState, MapSettings, Position, Session};
