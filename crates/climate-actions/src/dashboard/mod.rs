//! The dashboard read/write surface: a service composing the loader with the
//! status ledger, and the HTTP routes in front of it.

pub mod router;
pub mod service;

pub use router::catalog_router;
pub use service::{CatalogService, CatalogServiceError, CatalogSummary};
