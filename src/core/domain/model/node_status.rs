//! Wire model for node status from the `/nodes/{node}/status` endpoint.

use serde::Deserialize;

/// Detailed status information for a Proxmox node.
///
/// Returned by the `/api2/json/nodes/{node}/status` endpoint. Only the
/// fields the dashboard projects are modeled; the endpoint returns more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeStatus {
    /// CPU usage fraction (0.0 to 1.0).
    pub cpu: f64,
    /// IO wait fraction (0.0 to 1.0) - time spent waiting for I/O.
    #[serde(default)]
    pub wait: Option<f64>,
    /// CPU topology information.
    #[serde(default)]
    pub cpuinfo: Option<CpuInfo>,
    /// Memory usage in bytes.
    pub memory: MemoryInfo,
    /// Root filesystem usage in bytes.
    #[serde(default)]
    pub rootfs: Option<StorageInfo>,
}

/// CPU topology as reported by the node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CpuInfo {
    /// Physical core count.
    #[serde(default)]
    pub cores: Option<u32>,
    /// Logical thread count (Proxmox calls these "cpus").
    #[serde(default)]
    pub cpus: Option<u32>,
}

/// Memory usage information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemoryInfo {
    /// Total memory in bytes.
    pub total: u64,
    /// Used memory in bytes.
    pub used: u64,
}

/// Filesystem usage information.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageInfo {
    /// Total space in bytes.
    pub total: u64,
    /// Used space in bytes.
    pub used: u64,
}
