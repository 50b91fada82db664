//! The immutable result of one poll tick, handed to the display layer.

use crate::core::domain::model::{GuestSummary, NodeStatus};

/// Aggregate host metrics derived from one [`NodeStatus`] response.
///
/// Recomputed wholesale every poll tick; no partial update, no history.
#[derive(Debug, Clone, PartialEq)]
pub struct HostGauges {
    pub cpu_fraction: f64,
    pub cores: Option<u32>,
    pub threads: Option<u32>,
    pub memory_used: u64,
    pub memory_total: u64,
    pub disk_used: u64,
    pub disk_total: u64,
    pub io_wait_fraction: f64,
}

impl HostGauges {
    pub fn from_status(status: &NodeStatus) -> Self {
        let (disk_used, disk_total) = status
            .rootfs
            .as_ref()
            .map(|fs| (fs.used, fs.total))
            .unwrap_or((0, 0));
        Self {
            cpu_fraction: status.cpu,
            cores: status.cpuinfo.as_ref().and_then(|info| info.cores),
            threads: status.cpuinfo.as_ref().and_then(|info| info.cpus),
            memory_used: status.memory.used,
            memory_total: status.memory.total,
            disk_used,
            disk_total,
            io_wait_fraction: status.wait.unwrap_or(0.0),
        }
    }

    pub fn cpu_percent(&self) -> u16 {
        percent(self.cpu_fraction)
    }

    pub fn memory_percent(&self) -> u16 {
        percent(ratio(self.memory_used, self.memory_total))
    }

    pub fn disk_percent(&self) -> u16 {
        percent(ratio(self.disk_used, self.disk_total))
    }

    pub fn io_wait_percent(&self) -> u16 {
        percent(self.io_wait_fraction)
    }
}

/// Projects a fraction in [0,1] to a rounded integer percentage in [0,100].
pub(crate) fn percent(fraction: f64) -> u16 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u16
}

fn ratio(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64
    }
}

/// What one poll tick produced for the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PollSnapshot {
    /// A full refresh of host gauges and both guest lists.
    Connected {
        host: HostGauges,
        vms: Vec<GuestSummary>,
        containers: Vec<GuestSummary>,
    },
    /// The backend was never reached; gauges show error text and guest
    /// lists show a placeholder row.
    Disconnected,
}
