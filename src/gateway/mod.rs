pub mod client;
pub mod models;
pub mod pipeline;

pub use client::GatewayClient;
pub use models::{AudioPayload, Contact, Direction, StoredMessage};
pub use pipeline::{GatewayCommand, GatewayEvent, GatewayOp, GatewayPipeline};
