mod node_name;
mod pve_csrf_token;
mod pve_host;
mod pve_password;
mod pve_port;
mod pve_realm;
mod pve_ticket;
mod pve_username;

pub use node_name::NodeName;
pub use pve_csrf_token::PveCsrfToken;
pub use pve_host::PveHost;
pub use pve_password::PvePassword;
pub use pve_port::PvePort;
pub use pve_realm::PveRealm;
pub use pve_ticket::PveTicket;
pub use pve_username::PveUsername;
