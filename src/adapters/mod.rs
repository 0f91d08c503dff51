//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the export pipeline to external systems:
//! - `api` - Support API transports (reqwest, mock)
//! - `storage` - Cache stores and report writers (file, in-memory)

pub mod api;
pub mod storage;

pub use api::{MockTransport, ReqwestTransport, ReqwestTransportConfig};
pub use storage::{FileCacheStore, FileReportWriter, InMemoryCacheStore, InMemoryReportWriter};
