//! The dashboard's record pipeline: validate, filter, sort, aggregate, export.
//!
//! Everything here is a pure function over borrowed records. Inputs are never
//! mutated; each step returns a new derived view.

pub mod domain;
pub mod export;
pub mod filter;
pub mod kpi;
pub mod query;
pub mod schema;
pub mod sort;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{ActionRecord, ActionStatus, Category, CostTier, Sector, StatusHistoryEntry};
pub use export::{export_actions, export_date, ExportError, ExportFormat, ExportPayload};
pub use filter::{distinct_cities, filter_actions, CriteriaUpdate, FilterCriteria};
pub use kpi::{aggregate, share_pct, KpiSummary};
pub use query::{from_query_string, to_query_string};
pub use schema::{validate_actions, validate_json, ValidationError};
pub use sort::sort_actions;
pub use status::{
    apply_status_change, overlay_status_changes, LedgerError, StatusChange, StatusLedger,
    StatusUpdateAck, StatusUpdateRequest,
};
