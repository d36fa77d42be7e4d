//! Refresh driver for the live map.
//!
//! Fetches run as spawned tasks. Their completions come back over a channel
//! and are applied one at a time on the driver loop, so state is never
//! mutated concurrently. Requests are never cancelled; ordering is enforced
//! by the request tickets of each [`Resource`](super::Resource).

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::clock::Ticker;
use super::source::DataSource;
use super::state::RequestTicket;
use crate::error::FetchError;
use crate::overlay::SessionOverlay;
use crate::registry::{decode_sessions, load};
use crate::render::{LiveMap, RenderOutput};
use crate::types::HostModel;

enum Completion {
    Hosts(RequestTicket, Result<HostModel, FetchError>),
    Sessions(RequestTicket, Result<SessionOverlay, FetchError>),
}

/// Manual triggers accepted while the monitor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RetrySessions,
    RefreshHosts,
}

/// Sends [`Command`]s to a running [`Monitor`].
#[derive(Clone)]
pub struct MonitorHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl MonitorHandle {
    pub fn retry_sessions(&self) -> bool {
        self.tx.send(Command::RetrySessions).is_ok()
    }

    pub fn refresh_hosts(&self) -> bool {
        self.tx.send(Command::RefreshHosts).is_ok()
    }
}

enum Event {
    Tick,
    Command(Command),
    Completed(Completion),
}

/// Drives a [`LiveMap`] from a data source and a ticker.
pub struct Monitor<S, K> {
    source: Arc<S>,
    ticker: K,
    map: LiveMap,
    started: bool,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
}

impl<S: DataSource, K: Ticker> Monitor<S, K> {
    pub fn new(source: S, ticker: K, map: LiveMap) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        Self {
            source: Arc::new(source),
            ticker,
            map,
            started: false,
            done_tx,
            done_rx,
            cmd_tx,
            cmd_rx,
        }
    }

    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            tx: self.cmd_tx.clone(),
        }
    }

    pub fn map(&self) -> &LiveMap {
        &self.map
    }

    pub fn into_map(self) -> LiveMap {
        self.map
    }

    /// Issue a host request. Hosts are otherwise fetched only once.
    pub fn refresh_hosts(&mut self) {
        let ticket = self.map.begin_hosts();
        let source = Arc::clone(&self.source);
        let tx = self.done_tx.clone();

        tokio::spawn(async move {
            let result = match source.fetch_hosts().await {
                Ok(raw) => load(&raw).map_err(FetchError::from),
                Err(e) => Err(FetchError::from(e)),
            };
            let _ = tx.send(Completion::Hosts(ticket, result));
        });
    }

    /// Issue a session request, even if an earlier one is still in flight.
    pub fn refresh_sessions(&mut self) {
        let ticket = self.map.begin_sessions();
        let source = Arc::clone(&self.source);
        let tx = self.done_tx.clone();

        tokio::spawn(async move {
            let result = match source.fetch_sessions().await {
                Ok(raw) => decode_sessions(&raw)
                    .map(SessionOverlay::new)
                    .map_err(FetchError::from),
                Err(e) => Err(FetchError::from(e)),
            };
            let _ = tx.send(Completion::Sessions(ticket, result));
        });
    }

    fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Hosts(ticket, result) => {
                match &result {
                    Ok(model) => info!(hosts = model.len(), "Hosts loaded"),
                    Err(e) => warn!(error = %e, "Host fetch failed"),
                }
                self.map.complete_hosts(ticket, result)
            }
            Completion::Sessions(ticket, result) => {
                match &result {
                    Ok(overlay) => debug!(sessions = overlay.sessions().len(), "Sessions loaded"),
                    Err(e) => warn!(error = %e, "Session fetch failed"),
                }
                self.map.complete_sessions(ticket, result)
            }
        }
    }

    /// Run until `on_update` breaks.
    ///
    /// The first call issues the initial host and session requests. Each tick
    /// re-fetches sessions. `on_update` is called after every applied
    /// completion; stale completions are dropped silently.
    pub async fn run<F>(&mut self, mut on_update: F)
    where
        F: FnMut(&RenderOutput) -> ControlFlow<()>,
    {
        if !self.started {
            self.started = true;
            self.refresh_hosts();
            self.refresh_sessions();
        }

        loop {
            let event = tokio::select! {
                _ = self.ticker.tick() => Event::Tick,
                Some(cmd) = self.cmd_rx.recv() => Event::Command(cmd),
                Some(done) = self.done_rx.recv() => Event::Completed(done),
            };

            match event {
                Event::Tick => {
                    debug!("Session refresh tick");
                    self.refresh_sessions();
                }
                Event::Command(Command::RetrySessions) => self.refresh_sessions(),
                Event::Command(Command::RefreshHosts) => self.refresh_hosts(),
                Event::Completed(done) => {
                    if self.apply(done) && on_update(&self.map.render()).is_break() {
                        return;
                    }
                }
            }
        }
    }
}
