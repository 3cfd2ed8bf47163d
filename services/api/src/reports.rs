use crate::infra::{parse_format, parse_status};
use clap::error::ErrorKind;
use clap::Args;
use climate_actions::catalog::{
    aggregate, export_actions, export_date, filter_actions, from_query_string, to_query_string,
    ActionRecord, ActionStatus, ExportFormat, FilterCriteria, KpiSummary, Sector,
    StatusUpdateRequest,
};
use climate_actions::config::AppConfig;
use climate_actions::error::AppError;
use climate_actions::loader::{ActionsClient, Loader};
use climate_actions::sources::csv_import::convert_file;
use climate_actions::sources::SnapshotSource;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SummaryArgs {
    /// Shared filter query string, e.g. `city=Serra&status=In+progress`
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Read a local JSON snapshot instead of the running service
    #[arg(long)]
    pub(crate) source: Option<PathBuf>,
    /// Also list every matched action
    #[arg(long)]
    pub(crate) list: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Output format: csv or json
    #[arg(long, value_parser = parse_format, default_value = "csv")]
    pub(crate) format: ExportFormat,
    /// Shared filter query string
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Read a local JSON snapshot instead of the running service
    #[arg(long)]
    pub(crate) source: Option<PathBuf>,
    /// Directory the export file is written to
    #[arg(long, default_value = ".")]
    pub(crate) out: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct BuildDataArgs {
    /// CSV export with camelCase field names in the header row
    #[arg(long, default_value = "data/actions.csv")]
    pub(crate) input: PathBuf,
    /// Snapshot file to (re)write
    #[arg(long, default_value = "public/actions.json")]
    pub(crate) output: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateStatusArgs {
    /// Identifier of the action to update
    pub(crate) action_id: String,
    /// New status label, e.g. "In progress"
    #[arg(long, value_parser = parse_status, required_unless_present = "advance_from", conflicts_with = "advance_from")]
    pub(crate) status: Option<ActionStatus>,
    /// Send the status that follows this one in the cycle
    #[arg(long, value_parser = parse_status)]
    pub(crate) advance_from: Option<ActionStatus>,
}

impl UpdateStatusArgs {
    fn target_status(&self) -> Option<ActionStatus> {
        self.status
            .or_else(|| self.advance_from.map(ActionStatus::next))
    }

    pub(crate) fn into_request(self) -> Result<StatusUpdateRequest, clap::Error> {
        let new_status = self.target_status().ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::MissingRequiredArgument,
                "one of --status or --advance-from is required\n",
            )
        })?;
        Ok(StatusUpdateRequest {
            action_id: self.action_id,
            new_status,
        })
    }
}

async fn load_catalog(
    config: &AppConfig,
    source: Option<PathBuf>,
) -> Result<Vec<ActionRecord>, AppError> {
    match source {
        Some(path) => Ok(Loader::new(SnapshotSource::new(path)).load().await?),
        None => {
            let client =
                ActionsClient::new(config.data.api_url.clone(), config.data.request_timeout)?;
            Ok(Loader::new(client).load().await?)
        }
    }
}

fn filtered(records: &[ActionRecord], query: Option<&str>) -> (FilterCriteria, Vec<ActionRecord>) {
    let criteria = from_query_string(query.unwrap_or_default());
    let matched = filter_actions(records, &criteria, criteria.effective_search(""));
    (criteria, matched)
}

pub(crate) async fn run_summary(config: &AppConfig, args: SummaryArgs) -> Result<(), AppError> {
    let SummaryArgs {
        query,
        source,
        list,
    } = args;

    let records = load_catalog(config, source).await?;
    let (criteria, matched) = filtered(&records, query.as_deref());
    let kpis = aggregate(&matched);

    for line in summary_lines(&criteria, &kpis) {
        println!("{line}");
    }
    if list {
        println!("Matched actions:");
        for record in &matched {
            println!(
                "  - [{}] {}: {} ({})",
                record.status, record.city, record.action_name, record.id
            );
        }
    }
    Ok(())
}

pub(crate) fn summary_lines(criteria: &FilterCriteria, kpis: &KpiSummary) -> Vec<String> {
    let filters = to_query_string(criteria);
    let mut lines = vec![
        "Climate action summary".to_string(),
        format!(
            "Filters: {}",
            if filters.is_empty() { "none" } else { filters.as_str() }
        ),
        format!(
            "- {} actions across {} cities",
            kpis.total_actions, kpis.total_cities
        ),
        format!(
            "- Mitigation {} ({}%) | Adaptation {} ({}%)",
            kpis.mitigation_actions,
            kpis.mitigation_share(),
            kpis.adaptation_actions,
            kpis.adaptation_share()
        ),
        "Sectors:".to_string(),
    ];
    lines.extend(
        Sector::ordered()
            .into_iter()
            .map(|sector| format!("  - {}: {}", sector, kpis.sector_count(sector))),
    );
    lines.push("Statuses:".to_string());
    lines.extend(
        ActionStatus::ordered()
            .into_iter()
            .map(|status| format!("  - {}: {}", status, kpis.status_count(status))),
    );
    lines
}

pub(crate) async fn run_export(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        format,
        query,
        source,
        out,
    } = args;

    let records = load_catalog(config, source).await?;
    let (_, matched) = filtered(&records, query.as_deref());
    let payload = export_actions(&matched, format, export_date())?;

    tokio::fs::create_dir_all(&out).await?;
    let path = out.join(&payload.file_name);
    tokio::fs::write(&path, &payload.body).await?;

    println!(
        "Wrote {} actions to {} ({})",
        matched.len(),
        path.display(),
        payload.content_type
    );
    Ok(())
}

pub(crate) fn run_build_data(args: BuildDataArgs) -> Result<(), AppError> {
    let written = convert_file(&args.input, &args.output)?;
    println!(
        "Converted {} actions from {} into {}",
        written,
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

pub(crate) async fn run_update_status(
    config: &AppConfig,
    request: StatusUpdateRequest,
) -> Result<(), AppError> {
    let client = ActionsClient::new(config.data.api_url.clone(), config.data.request_timeout)?;
    let ack = client.update_status(&request).await?;
    println!(
        "{} -> {}: {}",
        request.action_id, request.new_status, ack.message
    );
    Ok(())
}
