//! Host registry: decoding, identifiers, session matching and hover state.

pub mod decode;

pub use decode::{decode_sessions, load, load_value};

use crate::types::{Host, HostModel, InteractionState, Session};

/// True if any session's host token occurs inside `host.id`.
///
/// The session token is searched in the host id, never the reverse, so a
/// short name like `f1r3s2` matches `f1r3s2.codam.nl`.
pub fn match_session(host: &Host, sessions: &[Session]) -> bool {
    sessions_for(host, sessions).next().is_some()
}

/// Sessions whose host token occurs inside `host.id`.
pub fn sessions_for<'a>(
    host: &'a Host,
    sessions: &'a [Session],
) -> impl Iterator<Item = &'a Session> + 'a {
    sessions
        .iter()
        .filter(move |s| !s.host_id.is_empty() && host.id.contains(s.host_id.as_str()))
}

/// The part of a hostname before its first `.`, or the whole id.
pub fn short_id(id: &str) -> &str {
    id.split_once('.').map_or(id, |(short, _)| short)
}

impl HostModel {
    /// Mark hosts whose id contains `id_fragment` as hovered.
    ///
    /// Returns the number of hosts affected. Unknown ids are a no-op.
    pub fn hover(&mut self, id_fragment: &str) -> usize {
        self.set_hover(id_fragment, InteractionState::Hovered)
    }

    /// Clear hover on hosts whose id contains `id_fragment`.
    pub fn unhover(&mut self, id_fragment: &str) -> usize {
        self.set_hover(id_fragment, InteractionState::Idle)
    }

    fn set_hover(&mut self, id_fragment: &str, state: InteractionState) -> usize {
        if id_fragment.is_empty() {
            return 0;
        }

        let mut affected = 0;
        for host in self
            .hosts
            .iter_mut()
            .filter(|h| h.id.contains(id_fragment))
        {
            host.interaction_state = state;
            affected += 1;
        }
        affected
    }
}
