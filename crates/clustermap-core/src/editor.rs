//! Layout editor session.

use tracing::warn;

use crate::error::DecodeError;
use crate::export;
use crate::overlay::SessionOverlay;
use crate::registry::load;
use crate::render::{icons, Icon, MapView};
use crate::scaler::RenderSize;
use crate::types::{HostModel, Position};

/// One editing session over a single layout.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    model: HostModel,
    background: Option<String>,
}

impl Editor {
    pub fn new(model: HostModel) -> Self {
        Self {
            model,
            background: None,
        }
    }

    pub fn model(&self) -> &HostModel {
        &self.model
    }

    /// Set the background map image (path or URL).
    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
    }

    /// Replace the layout with a decoded host source.
    ///
    /// On failure the editor is left with an empty model and default settings.
    pub fn import(&mut self, raw: &str) -> Result<(), DecodeError> {
        match load(raw) {
            Ok(model) => {
                self.model = model;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Import failed, starting from an empty layout");
                self.model = HostModel::default();
                Err(e)
            }
        }
    }

    pub fn start_drag(&mut self, host_id: &str) -> bool {
        self.model.start_drag(host_id)
    }

    pub fn drag_by(&mut self, delta_x: f64, delta_y: f64) {
        self.model.drag_by(delta_x, delta_y)
    }

    pub fn end_drag(&mut self) -> Option<Position> {
        self.model.end_drag()
    }

    pub fn hover(&mut self, id_fragment: &str) -> usize {
        self.model.hover(id_fragment)
    }

    pub fn unhover(&mut self, id_fragment: &str) -> usize {
        self.model.unhover(id_fragment)
    }

    /// Icons for every host, all drawn as empty.
    pub fn icons(&self, size: Option<RenderSize>) -> Vec<Icon> {
        let size = size.unwrap_or_else(|| RenderSize::reference(&self.model.map_settings));
        icons(&self.model, &SessionOverlay::default(), size)
    }

    /// Render output of the editor: every host over the background map.
    pub fn view(&self, size: Option<RenderSize>) -> MapView {
        let size = size.unwrap_or_else(|| RenderSize::reference(&self.model.map_settings));
        MapView {
            background: self.background.clone(),
            width: size.width,
            height: size.height,
            icons: self.icons(Some(size)),
            warnings: Vec::new(),
        }
    }

    /// Canonical export of the current layout.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        export::serialize(&self.model)
    }
}
