// footfall-api: Async client for the footfall visitor-count endpoint

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::CountClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{CountResponse, ErrorResponse};
