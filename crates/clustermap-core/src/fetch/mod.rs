//! Remote data loading: request state, data sources, ticks and the refresh
//! driver.

pub mod clock;
pub mod monitor;
pub mod source;
pub mod state;

pub use clock::{manual_ticker, IntervalTicker, ManualTicker, TickHandle, Ticker};
pub use monitor::{Command, Monitor, MonitorHandle};
pub use source::{DataSource, Endpoint, EndpointSource};
pub use state::{FetchState, RequestTicket, Resource};
