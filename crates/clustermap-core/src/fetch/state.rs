//! Request lifecycle of a remote resource.

use tracing::debug;

use crate::error::FetchError;

/// State of one remote resource.
#[derive(Debug)]
pub enum FetchState<T> {
    Loading,
    Failed(FetchError),
    Succeeded(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            FetchState::Succeeded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Identifies one issued request of a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// A [`FetchState`] plus the last good payload and the request sequence.
///
/// Every request gets a ticket with a strictly increasing sequence number.
/// A completion whose ticket is not newer than the last applied one is
/// discarded, so a slow older response never overwrites newer data.
#[derive(Debug)]
pub struct Resource<T> {
    name: &'static str,
    state: FetchState<T>,
    last_good: Option<T>,
    issued: u64,
    applied: u64,
}

impl<T> Resource<T> {
    /// A resource whose first request is considered in flight.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: FetchState::Loading,
            last_good: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Current data if succeeded, otherwise the last good payload.
    pub fn data(&self) -> Option<&T> {
        self.state.succeeded().or(self.last_good.as_ref())
    }

    /// Whether the resource has ever held data.
    pub fn has_data(&self) -> bool {
        self.data().is_some()
    }

    /// Whether a request is outstanding that could still be applied.
    pub fn in_flight(&self) -> bool {
        self.issued > self.applied
    }

    /// Issue a new request and move to `Loading`.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.stash(FetchState::Loading);
        debug!(resource = self.name, seq = self.issued, "Request issued");
        RequestTicket(self.issued)
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `false` if the completion was stale and discarded.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<T, FetchError>) -> bool {
        if ticket.0 <= self.applied || ticket.0 > self.issued {
            debug!(
                resource = self.name,
                seq = ticket.0,
                applied = self.applied,
                "Discarding stale completion"
            );
            return false;
        }
        self.applied = ticket.0;

        match result {
            Ok(data) => {
                self.state = FetchState::Succeeded(data);
                self.last_good = None;
                debug!(resource = self.name, seq = ticket.0, "Request succeeded");
            }
            Err(e) => {
                debug!(resource = self.name, seq = ticket.0, error = %e, "Request failed");
                self.stash(FetchState::Failed(e));
            }
        }
        true
    }

    /// Replace the state, keeping succeeded data as the last good payload.
    fn stash(&mut self, next: FetchState<T>) {
        if let FetchState::Succeeded(data) = std::mem::replace(&mut self.state, next) {
            self.last_good = Some(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn transport_error() -> FetchError {
        FetchError::Transport(TransportError::Request {
            url: "http://test".to_string(),
            message: "refused".to_string(),
        })
    }

    #[test]
    fn test_starts_loading_without_data() {
        let resource: Resource<Vec<u8>> = Resource::new("test");
        assert!(resource.state().is_loading());
        assert!(!resource.has_data());
    }

    #[test]
    fn test_success_then_reload_keeps_last_good() {
        let mut resource = Resource::new("test");
        let t1 = resource.begin();
        assert!(resource.complete(t1, Ok(vec![1])));
        assert_eq!(resource.state().succeeded(), Some(&vec![1]));

        resource.begin();
        assert!(resource.state().is_loading());
        assert_eq!(resource.data(), Some(&vec![1]));
    }

    #[test]
    fn test_failure_keeps_last_good() {
        let mut resource = Resource::new("test");
        let t1 = resource.begin();
        resource.complete(t1, Ok(vec![1]));
        let t2 = resource.begin();
        resource.complete(t2, Err(transport_error()));

        assert!(resource.state().error().is_some());
        assert_eq!(resource.data(), Some(&vec![1]));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut resource = Resource::new("test");
        let older = resource.begin();
        let newer = resource.begin();

        assert!(resource.complete(newer, Ok(vec![2])));
        assert!(!resource.complete(older, Ok(vec![1])));
        assert_eq!(resource.data(), Some(&vec![2]));
        assert!(!resource.in_flight());
    }

    #[test]
    fn test_older_completion_applies_before_newer() {
        let mut resource = Resource::new("test");
        let older = resource.begin();
        let newer = resource.begin();

        assert!(resource.complete(older, Ok(vec![1])));
        assert!(resource.in_flight());
        assert!(resource.complete(newer, Ok(vec![2])));
        assert_eq!(resource.data(), Some(&vec![2]));
    }

    #[test]
    fn test_stale_failure_does_not_clobber_success() {
        let mut resource = Resource::new("test");
        let older = resource.begin();
        let newer = resource.begin();

        resource.complete(newer, Ok(vec![2]));
        assert!(!resource.complete(older, Err(transport_error())));
        assert_eq!(resource.state().succeeded(), Some(&vec![2]));
    }

    #[test]
    fn test_foreign_ticket_is_rejected() {
        let mut a: Resource<Vec<u8>> = Resource::new("a");
        let mut b: Resource<Vec<u8>> = Resource::new("b");
        b.begin();
        let ticket = b.begin();
        assert!(!a.complete(ticket, Ok(vec![9])));
    }
}
