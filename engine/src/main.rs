// Command-line front end for the ROI calculators and the scenario planner.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use engine::config::settings::EngineSettings;
use engine::data::{InputSnapshotStore, JsonFileScenarioStore, ScenarioStore};
use engine::funnel::inputs::{apply_override, parse_assignment};
use engine::funnel::{compute, ModelOptions};
use engine::planner::{compare, rank, scenario_from_report, summarize, RankBy};
use engine::render::{render_comparison, render_report, render_scenarios};
use engine::validation::validate;
use shared::models::{CalculatorType, FunnelInputs};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "roi-suite")]
#[command(about = "Multi-channel outreach ROI calculator and scenario planner")]
struct Cli {
    /// Settings file (defaults to ./roi-suite.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Read inputs from this JSON file instead of the saved snapshot
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Override a field, e.g. --set closeRate=25 --set linkedIn.enabled=true
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the funnel and blended metrics
    Calculate {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Manage the saved input snapshot
    Inputs {
        #[command(subcommand)]
        action: InputsAction,
    },
    /// Save, list, delete and compare scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioAction,
    },
}

#[derive(Subcommand)]
enum InputsAction {
    /// Print the current inputs as JSON
    Show,
    /// Apply overrides (or a file) and store the result
    Save {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Forget saved inputs and go back to defaults
    Reset,
}

#[derive(Subcommand)]
enum ScenarioAction {
    /// Compute the current inputs and save the run as a scenario
    Save {
        /// Scenario name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// List saved scenarios
    List {
        #[arg(long, value_enum, default_value = "roi")]
        rank_by: RankArg,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Delete a saved scenario by id
    Delete { id: Uuid },
    /// Compare all saved scenarios and recommend one
    Compare {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankArg {
    Roi,
    Payback,
    Risk,
    Efficiency,
}

impl From<RankArg> for RankBy {
    fn from(arg: RankArg) -> Self {
        match arg {
            RankArg::Roi => RankBy::Roi,
            RankArg::Payback => RankBy::Payback,
            RankArg::Risk => RankBy::Risk,
            RankArg::Efficiency => RankBy::Efficiency,
        }
    }
}

const INPUT_KEY: CalculatorType = CalculatorType::ColdEmailRoi;

// Resolves the working input record: file or snapshot, then overrides.
// Returns whether anything was edited so the caller can persist it.
fn resolve_inputs(args: &InputArgs, settings: &EngineSettings, snapshots: &InputSnapshotStore) -> Result<(FunnelInputs, bool)> {
    let mut inputs = match &args.inputs {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read inputs from {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid inputs in {}", path.display()))?
        }
        None => snapshots.load_or(INPUT_KEY.storage_key(), || FunnelInputs {
            currency: settings.default_currency,
            ..FunnelInputs::default()
        }),
    };
    for assignment in &args.overrides {
        let (field, value) = parse_assignment(assignment)?;
        apply_override(&mut inputs, field, value)?;
    }
    let edited = args.inputs.is_some() || !args.overrides.is_empty();
    Ok((inputs, edited))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = EngineSettings::load(cli.config.as_deref())?;
    let options = ModelOptions { rate_policy: settings.rate_policy };
    let snapshots = InputSnapshotStore::new(settings.inputs_dir());
    let mut scenarios = JsonFileScenarioStore::new(settings.scenarios_path());

    match cli.command {
        Commands::Calculate { input, format } => {
            let (inputs, edited) = resolve_inputs(&input, &settings, &snapshots)?;
            if edited {
                snapshots.save(INPUT_KEY.storage_key(), &inputs)?;
            }
            let report = compute(&inputs, &options);
            let missing = validate(&inputs);
            match format {
                OutputFormat::Text => print!("{}", render_report(&report, &missing)),
                OutputFormat::Json => print_json(&serde_json::json!({ "report": report, "missingFields": missing }))?,
            }
        }
        Commands::Inputs { action } => match action {
            InputsAction::Show => {
                let (inputs, _) = resolve_inputs(&InputArgs { inputs: None, overrides: Vec::new() }, &settings, &snapshots)?;
                print_json(&inputs)?;
            }
            InputsAction::Save { input } => {
                let (inputs, _) = resolve_inputs(&input, &settings, &snapshots)?;
                snapshots.save(INPUT_KEY.storage_key(), &inputs)?;
                info!(key = INPUT_KEY.storage_key(), "Inputs saved");
            }
            InputsAction::Reset => {
                if snapshots.clear(INPUT_KEY.storage_key())? {
                    info!("Saved inputs cleared");
                } else {
                    info!("No saved inputs to clear");
                }
            }
        },
        Commands::Scenario { action } => match action {
            ScenarioAction::Save { name, input } => {
                let (inputs, edited) = resolve_inputs(&input, &settings, &snapshots)?;
                if edited {
                    snapshots.save(INPUT_KEY.storage_key(), &inputs)?;
                }
                let report = compute(&inputs, &options);
                let scenario = scenario_from_report(&name, &inputs, &report)?;
                let id = scenario.id();
                scenarios.save(scenario)?;
                println!("{}", id);
            }
            ScenarioAction::List { rank_by, format } => {
                let all = scenarios.load_all()?;
                let ranked = rank(&all, rank_by.into());
                match format {
                    OutputFormat::Text => print!("{}", render_scenarios(&ranked, settings.default_currency)),
                    OutputFormat::Json => print_json(&ranked)?,
                }
            }
            ScenarioAction::Delete { id } => {
                let removed = scenarios.delete(id)?;
                info!(%id, name = %removed.name(), "Scenario deleted");
            }
            ScenarioAction::Compare { format } => {
                let all = scenarios.load_all()?;
                let summary = summarize(&all);
                match (compare(&all, &settings.planner_weights), format) {
                    (None, OutputFormat::Text) => println!("No saved scenarios to compare."),
                    (None, OutputFormat::Json) => print_json(&serde_json::json!({ "summary": summary, "comparison": null }))?,
                    (Some(comparison), OutputFormat::Text) => {
                        print!("{}", render_comparison(&comparison, &summary, settings.default_currency))
                    }
                    (Some(comparison), OutputFormat::Json) => {
                        print_json(&serde_json::json!({ "summary": summary, "comparison": comparison }))?
                    }
                }
            }
        },
    }

    Ok(())
}
