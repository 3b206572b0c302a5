//! # RC Beam CLI Application
//!
//! Terminal front-end for the RC beam calculation service.
//!
//! ```text
//! rcbeam calculate --depth 500 --main-count 3
//! rcbeam predict --fck 30 --load-type "Two Point Load"
//! rcbeam health
//! ```
//!
//! Field flags default to the form defaults and go through the same edit
//! path as the GUI, so out-of-range values are reported but still submitted.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use rcbeam_core::client::ServiceClient;
use rcbeam_core::config::{ClientConfig, API_URL_ENV};
use rcbeam_core::display::{ResultPanel, APP_TITLE};
use rcbeam_core::errors::FormError;
use rcbeam_core::form::BeamForm;
use rcbeam_core::params::Field;
use rcbeam_core::result::{CalcOutcome, ResultKind};

/// RC beam bearing capacity - IS-456 code and neural network predictions
#[derive(Parser, Debug)]
#[command(name = "rcbeam")]
#[command(about = "RC beam bearing capacity client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Service base URL (overrides RCBEAM_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<f64>,

    /// Print the raw service response as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Code-based capacity calculation (IS-456)
    Calculate(BeamArgs),
    /// Neural network capacity prediction
    Predict(BeamArgs),
    /// Check that the service is up and the model is loaded
    Health,
}

/// Beam parameters. Unset flags keep the form defaults.
#[derive(Args, Debug, Default)]
struct BeamArgs {
    /// Concrete grade fck (20, 25, 30, 35, 40) MPa
    #[arg(long)]
    fck: Option<String>,
    /// Steel grade fy (415, 500) MPa
    #[arg(long)]
    fy: Option<String>,
    /// Width b (mm)
    #[arg(long, visible_alias = "b")]
    width: Option<String>,
    /// Overall depth D (mm)
    #[arg(long)]
    depth: Option<String>,
    /// Span length L (mm)
    #[arg(long)]
    length: Option<String>,
    /// "Point Load" or "Two Point Load"
    #[arg(long)]
    load_type: Option<String>,
    /// Main bar diameter (mm)
    #[arg(long)]
    main_dia: Option<String>,
    /// Number of main bars
    #[arg(long)]
    main_count: Option<String>,
    /// Stirrup diameter (mm)
    #[arg(long)]
    stirrup_dia: Option<String>,
    /// Stirrup spacing (mm)
    #[arg(long)]
    spacing: Option<String>,
}

impl BeamArgs {
    fn edits(&self) -> Vec<(Field, &str)> {
        [
            (Field::Fck, &self.fck),
            (Field::Fy, &self.fy),
            (Field::Width, &self.width),
            (Field::Depth, &self.depth),
            (Field::Length, &self.length),
            (Field::LoadType, &self.load_type),
            (Field::MainDia, &self.main_dia),
            (Field::MainCount, &self.main_count),
            (Field::StirrupDia, &self.stirrup_dia),
            (Field::Spacing, &self.spacing),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Apply the flags to a default form, stopping at the first bad value
    fn to_form(&self) -> Result<BeamForm, FormError> {
        let mut form = BeamForm::new();
        for (field, raw) in self.edits() {
            form.edit(field, raw)?;
        }
        Ok(form)
    }
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = match &self.api_url {
            Some(url) => ClientConfig::new(url),
            None => ClientConfig::default(),
        };
        if let Some(secs) = self.timeout_secs.filter(|s| s.is_finite() && *s > 0.0) {
            config.timeout = Some(Duration::from_secs_f64(secs));
        }
        config
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rcbeam_core=warn,rcbeam=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let client = ServiceClient::from_config(&cli.client_config());
    tracing::info!(base_url = client.base_url(), "using calculation service");

    match &cli.command {
        Command::Calculate(args) => run_submit(&client, ResultKind::Is456, args, cli.json).await,
        Command::Predict(args) => run_submit(&client, ResultKind::Nn, args, cli.json).await,
        Command::Health => run_health(&client).await,
    }
}

async fn run_submit(client: &ServiceClient, kind: ResultKind, args: &BeamArgs, json: bool) -> ExitCode {
    let form = match args.to_form() {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            return ExitCode::from(2);
        }
    };

    for advisory in form.advisories() {
        eprintln!("Note: {}", advisory.message());
    }

    match client.submit(kind, form.snapshot()).await {
        Ok(outcome) => {
            if json {
                print_json(&outcome);
            } else {
                println!("{}", APP_TITLE);
                println!();
                print_panel(&ResultPanel::build(Some(&outcome), None));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(error = %e, "request failed");
            print_panel(&ResultPanel::build(None, Some(&e.user_message())));
            ExitCode::FAILURE
        }
    }
}

async fn run_health(client: &ServiceClient) -> ExitCode {
    match client.service_info().await {
        Ok(info) => println!("{} v{} at {}", info.message, info.version, client.base_url()),
        Err(e) => tracing::debug!(error = %e, "service info unavailable"),
    }

    match client.health().await {
        Ok(health) => {
            println!(
                "Status: {} (model {})",
                health.status,
                if health.model_loaded { "loaded" } else { "not loaded" }
            );
            if health.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Service unreachable at {}: {}", client.base_url(), e);
            eprintln!("Set {} or pass --api-url to point at the service.", API_URL_ENV);
            ExitCode::FAILURE
        }
    }
}

fn print_panel(panel: &ResultPanel) {
    let lines = panel.to_lines();
    let is_error = matches!(panel, ResultPanel::Error { .. });
    for line in lines {
        if is_error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

fn print_json(outcome: &CalcOutcome) {
    let rendered = match outcome {
        CalcOutcome::Is456(result) => serde_json::to_string_pretty(result),
        CalcOutcome::Nn(prediction) => serde_json::to_string_pretty(prediction),
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode result: {}", e),
    }
}
