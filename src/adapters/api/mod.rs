//! Support API Adapters.
//!
//! Implementations of the ApiTransport port.
//!
//! ## Available Adapters
//!
//! - `ReqwestTransport` - HTTPS client with bearer authentication
//! - `MockTransport` - Canned replies for testing

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::{MockReply, MockTransport, RecordedRequest};
pub use reqwest_transport::{ReqwestTransport, ReqwestTransportConfig};
