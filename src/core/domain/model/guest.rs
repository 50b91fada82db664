//! Wire and display models for guests (VMs and containers).

use serde::Deserialize;
use std::fmt;

/// The two kinds of guest a node manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestKind {
    Vm,
    Container,
}

impl GuestKind {
    /// The API path segment for this kind (`/nodes/{node}/<segment>`).
    #[must_use]
    pub fn path_segment(&self) -> &'static str {
        match self {
            GuestKind::Vm => "qemu",
            GuestKind::Container => "lxc",
        }
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestKind::Vm => f.write_str("VM"),
            GuestKind::Container => f.write_str("CT"),
        }
    }
}

/// A lifecycle action that can be issued against a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestAction {
    Start,
    Stop,
    Reboot,
    Shutdown,
}

impl GuestAction {
    /// The status endpoint name (`.../status/<endpoint>`).
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            GuestAction::Start => "start",
            GuestAction::Stop => "stop",
            GuestAction::Reboot => "reboot",
            GuestAction::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for GuestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// A guest as returned by the `/nodes/{node}/qemu` and `/lxc` endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuestRecord {
    /// The guest identifier (unique within its kind).
    pub vmid: u32,
    /// Human-readable name. Containers occasionally report none.
    #[serde(default)]
    pub name: Option<String>,
    /// Current status string (e.g. "running", "stopped").
    pub status: String,
}

/// Guest status reduced to what the display color-codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestStatus {
    Running,
    Stopped,
    Other(String),
}

impl GuestStatus {
    fn from_wire(status: &str) -> Self {
        match status {
            "running" => GuestStatus::Running,
            "stopped" => GuestStatus::Stopped,
            other => GuestStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestStatus::Running => f.write_str("running"),
            GuestStatus::Stopped => f.write_str("stopped"),
            GuestStatus::Other(s) => f.write_str(s),
        }
    }
}

/// One row of a guest list: the immutable display projection of a guest.
///
/// The id travels with the row so dispatch never has to parse it back out
/// of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSummary {
    pub id: u32,
    pub name: String,
    pub status: GuestStatus,
}

impl GuestSummary {
    /// Converts a wire list into display rows, ordered ascending by id
    /// regardless of the order the server returned them in.
    pub fn from_records(records: Vec<GuestRecord>) -> Vec<GuestSummary> {
        let mut rows: Vec<GuestSummary> = records
            .into_iter()
            .map(|record| GuestSummary {
                id: record.vmid,
                name: record.name.unwrap_or_else(|| "-".to_string()),
                status: GuestStatus::from_wire(&record.status),
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        rows
    }
}
