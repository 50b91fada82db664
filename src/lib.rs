//! Terminal dashboard for a single Proxmox VE node.
//!
//! Authenticates against the Proxmox HTTP API, polls node and guest
//! state on a fixed interval, and renders gauges and guest lists in a
//! tabbed terminal UI with start/stop/reboot/shutdown controls.

mod auth;
pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::application::connector::{
    connect_with_retry, ConnectionState, MAX_ATTEMPTS, RETRY_DELAY,
};
pub use crate::core::application::poller::{disconnected_snapshot, poll};
pub use crate::core::domain::error::{PveError, PveResult, ValidationError};
pub use crate::core::domain::model::{
    GuestAction, GuestKind, GuestStatus, GuestSummary, HostGauges, NodeStatus, PollSnapshot,
    PveConnection, PveConnectionBuilder, Session,
};
pub use crate::core::domain::value_object::{NodeName, PveHost, PvePort};
pub use crate::core::infrastructure::api_client::{ApiClient, VersionInfo};

#[cfg(test)]
mod tests;
