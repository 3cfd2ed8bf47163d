use crate::reports::{
    run_build_data, run_export, run_summary, run_update_status, BuildDataArgs, ExportArgs,
    SummaryArgs, UpdateStatusArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use climate_actions::config::AppConfig;
use climate_actions::error::AppError;
use climate_actions::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Climate Action Dashboard",
    about = "Serve, summarise and export the climate action catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print KPIs for the catalog, optionally filtered by a shared query string
    Summary(SummaryArgs),
    /// Write the filtered catalog as a CSV or JSON download
    Export(ExportArgs),
    /// Regenerate the static JSON snapshot from a CSV export
    BuildData(BuildDataArgs),
    /// Send a status update to a running service
    UpdateStatus(UpdateStatusArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Summary(args) => run_summary(&config, args).await,
        Command::Export(args) => run_export(&config, args).await,
        Command::BuildData(args) => run_build_data(args),
        Command::UpdateStatus(args) => {
            let request = args.into_request().unwrap_or_else(|err| err.exit());
            run_update_status(&config, request).await
        }
    }
}
