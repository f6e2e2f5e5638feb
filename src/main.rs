use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use svg3d::{import_path, init_logging, Config, ContourImporter, ExtrusionPlan, ImportResponse};
use tracing::{debug, info};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(name = "svg3d", version, long_version = LONG_VERSION)]
#[command(about = "Extract a validated outer contour and holes from an SVG file")]
struct Cli {
    /// Input SVG file.
    file: PathBuf,

    /// Config file (.toml or .json). Defaults to the user config dir if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty JSON.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Also print the two-layer extrusion plan.
    #[arg(long, default_value_t = false)]
    plan: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlannedResponse<'a> {
    #[serde(flatten)]
    response: &'a ImportResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<ExtrusionPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    material_volume: Option<f64>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).context("loading config")?;
    init_logging(&config.logging)?;
    debug!("Using config: {:?}", config);

    let importer = ContourImporter::new(config.import_options());
    let result = import_path(&importer, &cli.file);
    let response = ImportResponse::from_result(&result);
    info!(
        "{}: ok={}, {} errors",
        cli.file.display(),
        response.ok,
        response.errors.len()
    );

    let json = if cli.plan {
        let plan = result.as_ref().ok().map(ExtrusionPlan::new);
        let output = PlannedResponse {
            response: &response,
            material_volume: plan.as_ref().map(ExtrusionPlan::material_volume),
            plan,
        };
        if cli.compact {
            serde_json::to_string(&output)?
        } else {
            serde_json::to_string_pretty(&output)?
        }
    } else {
        response.to_json(!cli.compact)?
    };
    println!("{json}");

    Ok(if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
