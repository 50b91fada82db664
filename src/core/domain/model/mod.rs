mod connection;
mod guest;
mod node_status;
mod session;
mod snapshot;

pub use connection::{PveConnection, PveConnectionBuilder};
pub use guest::{GuestAction, GuestKind, GuestRecord, GuestStatus, GuestSummary};
pub use node_status::{CpuInfo, MemoryInfo, NodeStatus, StorageInfo};
pub use session::Session;
pub use snapshot::{HostGauges, PollSnapshot};
