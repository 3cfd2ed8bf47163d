use climate_actions::catalog::{
    ActionStatus, ExportFormat, LedgerError, StatusChange, StatusLedger,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Accepted status changes for the lifetime of the process.
///
/// Unbounded: every change is kept because replaying the full sequence is
/// what rebuilds each record's `status_history`. Reads cost one pass over all
/// recorded changes; the ledger resets on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStatusLedger {
    changes: Arc<Mutex<Vec<StatusChange>>>,
}

impl StatusLedger for InMemoryStatusLedger {
    fn record(&self, change: StatusChange) -> Result<(), LedgerError> {
        let mut guard = self
            .changes
            .lock()
            .map_err(|_| LedgerError::Unavailable("ledger mutex poisoned".to_string()))?;
        guard.push(change);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<StatusChange>, LedgerError> {
        let guard = self
            .changes
            .lock()
            .map_err(|_| LedgerError::Unavailable("ledger mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

pub(crate) fn parse_status(raw: &str) -> Result<ActionStatus, String> {
    raw.parse::<ActionStatus>().map_err(|err| {
        let expected: Vec<_> = ActionStatus::ordered()
            .into_iter()
            .map(ActionStatus::label)
            .collect();
        format!("{err} (expected one of: {})", expected.join(", "))
    })
}

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ledger_returns_changes_in_recording_order() {
        let ledger = InMemoryStatusLedger::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        for (id, status) in [("a", ActionStatus::InProgress), ("b", ActionStatus::OnHold)] {
            ledger
                .record(StatusChange {
                    action_id: id.to_string(),
                    status,
                    date,
                })
                .expect("record succeeds");
        }
        let ids: Vec<_> = ledger
            .entries()
            .expect("entries available")
            .into_iter()
            .map(|change| change.action_id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn repeated_updates_to_one_action_are_all_kept() {
        let ledger = InMemoryStatusLedger::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        for status in [ActionStatus::ReadyToStart, ActionStatus::InProgress, ActionStatus::Completed] {
            ledger
                .record(StatusChange {
                    action_id: "a".to_string(),
                    status,
                    date,
                })
                .expect("record succeeds");
        }
        let statuses: Vec<_> = ledger
            .entries()
            .expect("entries available")
            .into_iter()
            .map(|change| change.status)
            .collect();
        assert_eq!(
            statuses,
            [ActionStatus::ReadyToStart, ActionStatus::InProgress, ActionStatus::Completed]
        );
    }

    #[test]
    fn parse_status_lists_valid_labels() {
        assert_eq!(parse_status("On hold"), Ok(ActionStatus::OnHold));
        let err = parse_status("Paused").expect_err("unknown label");
        assert!(err.contains("Not started, Ready to start, In progress, Completed, On hold"));
    }
}
