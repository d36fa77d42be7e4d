//! Drag controller for the layout editor.
//!
//! A registry is either idle or dragging exactly one host. While dragging,
//! the host lives in `HostModel::moving` instead of the host list, so the
//! drag target is owned in one place and every host is in exactly one of the
//! two.

use tracing::{debug, trace};

use crate::types::{HostModel, InteractionState, MovingHost, Position};

impl HostModel {
    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.moving.is_some()
    }

    /// Take the host with exactly this id out of the list and start moving it.
    ///
    /// Returns `false` without touching the registry if the id is unknown or
    /// another drag is already active.
    pub fn start_drag(&mut self, host_id: &str) -> bool {
        if let Some(active) = &self.moving {
            debug!(active = %active.host.id, requested = host_id, "Ignoring drag start during active drag");
            return false;
        }

        let Some(index) = self.hosts.iter().position(|h| h.id == host_id) else {
            debug!(host = host_id, "Ignoring drag start for unknown host");
            return false;
        };

        let mut host = self.hosts.remove(index);
        host.interaction_state = InteractionState::Dragging;
        self.moving = Some(MovingHost { host, index });
        true
    }

    /// Move the dragged host by a pointer delta, rounded per call.
    ///
    /// Deltas accumulate on the current position. No-op when idle.
    pub fn drag_by(&mut self, delta_x: f64, delta_y: f64) {
        if let Some(moving) = &mut self.moving {
            let position = &mut moving.host.position;
            position.left = position.left.saturating_add(delta_x.round() as i32);
            position.top = position.top.saturating_add(delta_y.round() as i32);
            trace!(host = %moving.host.id, left = position.left, top = position.top, "Drag");
        }
    }

    /// Put the dragged host back in its original slot, wherever it ended up.
    ///
    /// Returns the final position, or `None` if nothing was being dragged.
    pub fn end_drag(&mut self) -> Option<Position> {
        let MovingHost { mut host, index } = self.moving.take()?;
        host.interaction_state = InteractionState::Idle;
        let position = host.position;
        let index = index.min(self.hosts.len());
        debug!(host = %host.id, left = position.left, top = position.top, "Drag ended");
        self.hosts.insert(index, host);
        Some(position)
    }
}
