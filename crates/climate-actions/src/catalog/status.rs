use super::domain::{ActionRecord, ActionStatus, StatusHistoryEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /api/update-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub action_id: String,
    pub new_status: ActionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateAck {
    pub success: bool,
    pub message: String,
}

impl StatusUpdateAck {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: "Status updated successfully".to_string(),
        }
    }
}

/// A status transition accepted by the service but not yet visible upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub action_id: String,
    pub status: ActionStatus,
    pub date: NaiveDate,
}

impl StatusChange {
    pub fn from_request(request: StatusUpdateRequest, date: NaiveDate) -> Self {
        Self {
            action_id: request.action_id,
            status: request.new_status,
            date,
        }
    }
}

/// Record of accepted status changes, replayed over every read.
pub trait StatusLedger: Send + Sync {
    fn record(&self, change: StatusChange) -> Result<(), LedgerError>;
    /// Changes in the order they were recorded.
    fn entries(&self) -> Result<Vec<StatusChange>, LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("status ledger unavailable: {0}")]
    Unavailable(String),
}

/// Copy of `record` moved to `status` on `date`; the history entry is
/// prepended so the log stays most-recent-first.
pub fn apply_status_change(
    record: &ActionRecord,
    status: ActionStatus,
    date: NaiveDate,
) -> ActionRecord {
    let date = date.format("%Y-%m-%d").to_string();
    let mut history = Vec::with_capacity(record.status_history().len() + 1);
    history.push(StatusHistoryEntry {
        date: date.clone(),
        status,
    });
    history.extend(record.status_history().iter().cloned());

    ActionRecord {
        status,
        last_updated: date,
        status_history: Some(history),
        ..record.clone()
    }
}

/// Replays `changes` over `records`. Changes for unknown ids are skipped and
/// record order is unchanged.
pub fn overlay_status_changes(
    records: &[ActionRecord],
    changes: &[StatusChange],
) -> Vec<ActionRecord> {
    let mut by_id: HashMap<&str, Vec<&StatusChange>> = HashMap::new();
    for change in changes {
        by_id.entry(change.action_id.as_str()).or_default().push(change);
    }

    records
        .iter()
        .map(|record| match by_id.get(record.id.as_str()) {
            Some(pending) => pending.iter().fold(record.clone(), |current, change| {
                apply_status_change(&current, change.status, change.date)
            }),
            None => record.clone(),
        })
        .collect()
}
