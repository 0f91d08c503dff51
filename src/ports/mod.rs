//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the export pipeline and the outside world. Adapters implement these ports.
//!
//! - `ApiTransport` - Authenticated GET requests against the support API
//! - `CacheStore` - Persistence of the export cache between runs
//! - `ReportWriter` - Output of the JSON report and CSV summary

mod api_transport;
mod cache_store;
mod report_writer;

pub use api_transport::{ApiTransport, TransportError};
pub use cache_store::{CacheStore, CacheStoreError};
pub use report_writer::{ReportError, ReportLocations, ReportWriter};
