use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::catalog::domain::ActionRecord;
use crate::catalog::export::{export_actions, ExportError, ExportFormat, ExportPayload};
use crate::catalog::filter::{distinct_cities, filter_actions, FilterCriteria};
use crate::catalog::kpi::{aggregate, KpiSummary};
use crate::catalog::sort::sort_actions;
use crate::catalog::status::{
    overlay_status_changes, LedgerError, StatusChange, StatusLedger, StatusUpdateAck,
    StatusUpdateRequest,
};
use crate::loader::{LoadError, Loader};
use crate::sources::ActionSource;

/// Server-side view of one filter pass over the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub criteria: FilterCriteria,
    pub matched: Vec<ActionRecord>,
    pub kpis: KpiSummary,
    /// Cities across the whole catalog, not only the matched records.
    pub cities: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Composes the loader with the status ledger so reads reflect accepted
/// status updates.
pub struct CatalogService<S, L> {
    loader: Loader<S>,
    ledger: Arc<L>,
}

impl<S, L> CatalogService<S, L>
where
    S: ActionSource + 'static,
    L: StatusLedger + 'static,
{
    pub fn new(loader: Loader<S>, ledger: Arc<L>) -> Self {
        Self { loader, ledger }
    }

    /// Current catalog in display order with pending status changes applied.
    pub async fn actions(&self) -> Result<Vec<ActionRecord>, CatalogServiceError> {
        let records = self.loader.load().await?;
        let changes = self.ledger.entries()?;
        if changes.is_empty() {
            return Ok(records);
        }
        // Status changes alter priority, so re-sort after the overlay.
        Ok(sort_actions(&overlay_status_changes(&records, &changes)))
    }

    pub fn update_status(
        &self,
        request: StatusUpdateRequest,
        today: NaiveDate,
    ) -> Result<StatusUpdateAck, CatalogServiceError> {
        let change = StatusChange::from_request(request, today);
        let (action_id, status) = (change.action_id.clone(), change.status);
        self.ledger.record(change)?;
        info!(
            action_id = %action_id,
            status = %status,
            "status update accepted; spreadsheet write-back not performed"
        );
        Ok(StatusUpdateAck::accepted())
    }

    pub async fn summary(
        &self,
        criteria: FilterCriteria,
    ) -> Result<CatalogSummary, CatalogServiceError> {
        let records = self.actions().await?;
        let matched = filter_actions(&records, &criteria, criteria.effective_search(""));
        Ok(CatalogSummary {
            kpis: aggregate(&matched),
            cities: distinct_cities(&records),
            criteria,
            matched,
        })
    }

    pub async fn export(
        &self,
        criteria: &FilterCriteria,
        format: ExportFormat,
        date: NaiveDate,
    ) -> Result<ExportPayload, CatalogServiceError> {
        let records = self.actions().await?;
        let matched = filter_actions(&records, criteria, criteria.effective_search(""));
        Ok(export_actions(&matched, format, date)?)
    }
}
