//! Slackr chat client.
//!
//! - `transport`: requests to the REST backend, with every outcome classified
//!   (`HttpTransport` over the network, `MemoryTransport` with scripted
//!   responses for tests and offline runs)
//! - `session`: token, user, open channel and pagination cursor
//! - `view`: headless mirror of the page (sidebar, channel pane, message cards, pin tray)
//! - `controller`: turns UI events into backend calls and applies their results

pub mod attachment;
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod transport;
pub mod view;

pub use config::ClientConfig;
pub use controller::{App, UiEvent};
pub use error::{ClientError, Result};
pub use session::Session;
pub use transport::{HttpTransport, MemoryTransport, Method, Transport};
pub use view::View;
