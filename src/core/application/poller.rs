//! The poll cycle: one tick fetches host status and both guest lists and
//! folds them into an immutable snapshot for the display layer.

use crate::core::domain::{
    error::PveResult,
    model::{GuestKind, GuestSummary, HostGauges, PollSnapshot},
    value_object::NodeName,
};
use crate::core::infrastructure::api_client::ApiClient;

/// Runs one poll tick against a live session.
///
/// Fetches are sequential; any failure aborts the whole tick and surfaces
/// to the caller, which logs it and leaves the previous snapshot on display
/// rather than flickering to an error state over a transient hiccup.
pub async fn poll(client: &ApiClient, node: &NodeName) -> PveResult<PollSnapshot> {
    let status = client.node_status(node).await?;
    let vms = client.list_guests(node, GuestKind::Vm).await?;
    let containers = client.list_guests(node, GuestKind::Container).await?;

    Ok(PollSnapshot::Connected {
        host: HostGauges::from_status(&status),
        vms: GuestSummary::from_records(vms),
        containers: GuestSummary::from_records(containers),
    })
}

/// The snapshot published when no session exists.
pub fn disconnected_snapshot() -> PollSnapshot {
    PollSnapshot::Disconnected
}
