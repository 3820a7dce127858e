//! Budgetboard CLI
//!
//! Command-line tooling around the dashboard controller:
//! - Preview what the dashboard would show for a running backend
//! - Serve a fixture endpoint (and optionally the built frontend)
//! - Generate a default config file

use anyhow::Context;
use budgetboard::client::HttpSource;
use budgetboard::config::{generate_default_config, Config, LoggingConfig};
use budgetboard::headless::{MemoryPage, RecordingCharts};
use budgetboard::server::{build_router, empty_fixture, load_fixture, serve};
use budgetboard::DashboardController;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "budgetboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Budget dashboard tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dashboard from the backend and show what it would render
    Preview {
        /// Backend base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Serve a fixture dashboard endpoint
    Serve {
        /// JSON response body to serve (default: a dashboard with no expenses)
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Directory with the built frontend
        #[arg(long)]
        static_dir: Option<PathBuf>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Preview { base_url, format } => {
            if let Some(url) = base_url {
                config.client.base_url = url;
            }
            preview(&config, format).await?;
        }

        Commands::Serve {
            fixture,
            static_dir,
            port,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }

            let fixture_path = fixture.or(config.server.fixture.clone());
            let response = match &fixture_path {
                Some(path) => load_fixture(path)
                    .with_context(|| format!("loading fixture {}", path.display()))?,
                None => empty_fixture(),
            };

            let static_dir = static_dir.or(config.server.static_dir.clone());
            let router = build_router(
                response,
                &config.dashboard.endpoint,
                static_dir.as_deref(),
            );
            serve(router, &config.server.addr()).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("budgetboard={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn preview(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let settings = config.dashboard.clone();
    let source = HttpSource::new(&config.client, &settings)?;
    tracing::info!("Previewing dashboard from {}", source.url());

    let controller = DashboardController::new(
        source,
        MemoryPage::dashboard(&settings),
        RecordingCharts::new(),
        settings,
    );
    controller.initialize().await;

    let page = controller.page();
    let settings = controller.settings();
    let chart = controller.charts().last_config();

    match format {
        OutputFormat::Json => {
            let snapshot = serde_json::json!({
                "stats": {
                    "total_expenses": page.text(&settings.total_selector),
                    "category_count": page.text(&settings.count_selector),
                    "this_month": page.text(&settings.month_selector),
                },
                "banner": page.banner(),
                "empty_state": page.shows_empty_state(),
                "chart": chart,
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        OutputFormat::Text => {
            if let Some(message) = page.banner() {
                println!("Error banner: {}", message);
                return Ok(());
            }

            let stat = |selector: &str| page.text(selector).unwrap_or_else(|| "—".to_string());
            println!("{:<16} {}", "Total expenses:", stat(&settings.total_selector));
            println!("{:<16} {}", "Categories:", stat(&settings.count_selector));
            println!("{:<16} {}", "This month:", stat(&settings.month_selector));
            println!();

            match chart {
                Some(chart) => {
                    let dataset = &chart.data.datasets[0];
                    println!("{} ({} bars)", dataset.label, chart.len());
                    for (name, value) in chart.data.labels.iter().zip(&dataset.data) {
                        println!("  {:<20} {:>12}", name, settings.currency.amount(*value));
                    }
                }
                _ if page.shows_empty_state() => println!("No expense data available"),
                _ => println!("No chart rendered"),
            }
        }
    }

    Ok(())
}
