//! Session overlay: joins active sessions against the host registry.

use serde::Serialize;

use crate::registry::{match_session, sessions_for};
use crate::types::{Host, Session};

/// Visual variant of a host icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IconVariant {
    /// Nobody is logged in
    Empty,
    /// One or more sessions matched the host
    Active { usernames: Vec<String> },
}

impl IconVariant {
    pub fn is_active(&self) -> bool {
        matches!(self, IconVariant::Active { .. })
    }
}

/// The current session list, replaced wholesale on every successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOverlay {
    sessions: Vec<Session>,
}

impl SessionOverlay {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Usernames of sessions matching `host`, in session order.
    pub fn users_on<'a>(&'a self, host: &'a Host) -> Vec<&'a str> {
        sessions_for(host, &self.sessions)
            .map(|s| s.username.as_str())
            .collect()
    }

    /// Icon variant for `host`.
    pub fn variant_for(&self, host: &Host) -> IconVariant {
        let usernames: Vec<String> = self.users_on(host).into_iter().map(String::from).collect();
        if usernames.is_empty() {
            IconVariant::Empty
        } else {
            IconVariant::Active { usernames }
        }
    }

    /// Sessions that match none of `hosts`. These are not displayed.
    pub fn unmatched<'a, I>(&'a self, hosts: I) -> Vec<&'a Session>
    where
        I: IntoIterator<Item = &'a Host>,
    {
        let hosts: Vec<&Host> = hosts.into_iter().collect();
        self.sessions
            .iter()
            .filter(|s| {
                !hosts
                    .iter()
                    .any(|h| match_session(h, std::slice::from_ref(*s)))
            })
            .collect()
    }
}
