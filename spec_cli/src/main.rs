//! # spec_cli
//!
//! Command line front end for the girder specification rules engine. Every
//! command prints pretty JSON on stdout; logs go to stderr.
//!
//! Without `--model` the commands run against a built-in three-segment
//! spliced girder.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, Level};
use tracing_subscriber::EnvFilter;

use spec_core::config::{load_bridge_model, load_criteria, save_criteria, EngineConfig};
use spec_core::criteria::SpecCriteria;
use spec_core::edition::SpecEdition;
use spec_core::engine::{Collaborators, SpecEngine};
use spec_core::errors::{SpecError, SpecResult};
use spec_core::location::{GirderKey, GirderSelection, GroupSelector, SegmentKey};
use spec_core::model::BridgeModel;
use spec_core::status::StatusLog;

#[derive(Parser)]
#[command(name = "spec_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Girder specification compliance and stress-limit rules engine", long_about = None)]
struct Cli {
    /// Specification criteria JSON file
    #[arg(long, global = true)]
    criteria: Option<PathBuf>,

    /// Bridge model JSON file
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print or write default criteria
    Criteria {
        /// Edition key, e.g. 9th2020
        #[arg(long)]
        edition: Option<String>,
        /// Write to a file instead of printing
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Stress check tasks for a girder
    Tasks {
        #[arg(long, default_value_t = 0)]
        group: usize,
        #[arg(long, default_value_t = 0)]
        girder: usize,
        /// Include checks a design may add
        #[arg(long)]
        design: bool,
    },
    /// Intervals with stress checks
    Intervals {
        /// Group index or "all"
        #[arg(long, default_value = "all", value_parser = parse_group)]
        group: GroupSelector,
        #[arg(long, default_value_t = 0)]
        girder: usize,
        #[arg(long)]
        design: bool,
    },
    /// Stress limits for every task at the start of a segment
    Limits(SegmentArgs),
    /// End zone splitting check
    Splitting(SegmentArgs),
    /// Lifting and hauling stability criteria
    Handling(SegmentArgs),
}

#[derive(Args)]
struct SegmentArgs {
    #[arg(long, default_value_t = 0)]
    group: usize,
    #[arg(long, default_value_t = 0)]
    girder: usize,
    #[arg(long, default_value_t = 0)]
    segment: usize,
}

impl SegmentArgs {
    fn key(&self) -> SegmentKey {
        SegmentKey::new(self.group, self.girder, self.segment)
    }
}

fn parse_group(value: &str) -> Result<GroupSelector, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(GroupSelector::All);
    }
    value
        .parse()
        .map(GroupSelector::Group)
        .map_err(|_| format!("expected a group index or \"all\", got \"{}\"", value))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> SpecResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_model(cli: &Cli) -> SpecResult<BridgeModel> {
    match &cli.model {
        Some(path) => load_bridge_model(path),
        None => Ok(BridgeModel::spliced_demo()),
    }
}

fn load_config(cli: &Cli, model: &BridgeModel) -> SpecResult<EngineConfig> {
    let criteria = match &cli.criteria {
        Some(path) => load_criteria(path)?,
        None => SpecCriteria::default(),
    };
    Ok(EngineConfig::new(criteria, model.document))
}

fn criteria_command(edition: Option<&str>, write: Option<&PathBuf>) -> SpecResult<()> {
    let criteria = match edition {
        Some(key) => {
            let edition = SpecEdition::from_key(key).ok_or_else(|| {
                SpecError::invalid_input(
                    "edition",
                    key,
                    format!(
                        "Unknown edition, expected one of: {}",
                        SpecEdition::ALL.iter().map(|e| e.key()).collect::<Vec<_>>().join(", ")
                    ),
                )
            })?;
            SpecCriteria::for_edition(edition)
        }
        None => SpecCriteria::default(),
    };
    match write {
        Some(path) => {
            save_criteria(&criteria, path)?;
            print_json(&json!({ "written": path.display().to_string() }))
        }
        None => print_json(&criteria),
    }
}

fn run(cli: &Cli) -> SpecResult<()> {
    if let Command::Criteria { edition, write } = &cli.command {
        return criteria_command(edition.as_deref(), write.as_ref());
    }

    let model = load_model(cli)?;
    let config = load_config(cli, &model)?;
    let status = StatusLog::new();
    let engine = SpecEngine::new(&config, Collaborators::from_model(&model, &status));
    debug!(document = ?model.document, "model loaded");

    match &cli.command {
        Command::Criteria { .. } => Ok(()),
        Command::Tasks { group, girder, design } => {
            print_json(&engine.tasks().girder_tasks(&GirderKey::new(*group, *girder), *design)?)
        }
        Command::Intervals { group, girder, design } => {
            let selection = GirderSelection {
                group: *group,
                girder: *girder,
            };
            print_json(&engine.tasks().stress_check_intervals(selection, *design)?)
        }
        Command::Limits(args) => print_json(&engine.segment_stress_limit_report(&args.key())?),
        Command::Splitting(args) => print_json(&engine.check_splitting(&args.key(), None)?),
        Command::Handling(args) => {
            let handling = engine.handling();
            let key = args.key();
            let lifting = handling.lifting_stability_criteria(&key, None)?;
            let hauling = handling.hauling_stability_criteria(&key, None);
            let hauling = match hauling {
                Ok(criteria) => json!(criteria),
                Err(err) if err.is_recoverable() => json!({ "error": err, "status": status.items() }),
                Err(err) => return Err(err),
            };
            print_json(&json!({ "lifting": lifting, "hauling": hauling }))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), "{}", err);
            eprintln!("{}", serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string()));
            ExitCode::FAILURE
        }
    }
}
