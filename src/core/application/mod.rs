pub mod connector;
pub mod poller;
