pub mod inbound;
pub mod loader;
pub mod manager;
pub mod monitor;
pub mod outbound;
pub mod stats;
pub mod transform;
pub mod types;
