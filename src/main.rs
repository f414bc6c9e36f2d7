use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use ids_console::gateway::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use ids_console::gateway::types::DEFAULT_ALERT_LIMIT;
use ids_console::gateway::{Gateway, GatewayError, StatsRange};
use ids_console::router::{NavigationState, RouteError, Router};
use ids_console::views::{ViewData, load_view};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "ids-console", about = "Query the intrusion-detection backend and walk the dashboard routes")]
struct Cli {
    #[arg(long, env = "IDS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "IDS_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recent alerts, in backend order.
    Alerts {
        #[arg(long, default_value_t = i64::from(DEFAULT_ALERT_LIMIT), allow_negative_numbers = true)]
        limit: i64,
    },
    /// Current engine/system status.
    Status,
    /// Threat counts for the chart.
    Stats {
        #[arg(long, default_value = "day", help = "day, week or month")]
        range: StatsRange,
    },
    Engine(EngineCommand),
    /// List the dashboard route table.
    Routes,
    /// Navigate to a path or route name and print that view's data.
    Open { target: String },
}

#[derive(Args, Debug)]
struct EngineCommand {
    #[command(subcommand)]
    command: EngineSubcommand,
}

#[derive(Subcommand, Debug)]
enum EngineSubcommand {
    Status,
    SetThreshold { threshold: f64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let gateway = Gateway::configure(&cli.base_url, Duration::from_millis(cli.timeout_ms))?;
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    match cli.command {
        Command::Alerts { limit } => print_json(&gateway.fetch_alert_history(limit, &cancel).await?),
        Command::Status => print_json(&gateway.fetch_status(&cancel).await?),
        Command::Stats { range } => print_json(&gateway.fetch_threat_stats(range, &cancel).await?),
        Command::Engine(engine) => match engine.command {
            EngineSubcommand::Status => print_json(&gateway.fetch_engine_status(&cancel).await?),
            EngineSubcommand::SetThreshold { threshold } => {
                print_json(&gateway.update_engine_threshold(threshold, &cancel).await?)
            }
        },
        Command::Routes => print_json(Router::dashboard().table().entries()),
        Command::Open { target } => run_open(&gateway, &target, &cancel).await,
    }
}

async fn run_open(gateway: &Gateway, target: &str, cancel: &CancellationToken) -> Result<(), CliError> {
    let router = Router::dashboard();
    let navigation = router.navigate(target)?;
    let data = load_view(gateway, navigation.current.view, cancel).await?;
    print_json(&OpenOutput { navigation, data })
}

#[derive(Serialize)]
struct OpenOutput {
    navigation: NavigationState,
    data: ViewData,
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling request");
            cancel.cancel();
        }
    });
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
