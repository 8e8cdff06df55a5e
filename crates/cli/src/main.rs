use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};
use xwahook_core::{
    config::{self, AppConfig},
    installation::MISSIONS_DIR,
    Feature, HookSession, Installation, Mission, SaveOutcome, SavePrompt,
};

const LOG_FILE: &str = "xwahook.log";

#[derive(Parser)]
#[command(name = "xwahook")]
#[command(about = "Inspect and migrate X-Wing Alliance mission hook settings", long_about = None)]
struct Cli {
    /// Game installation root; defaults to the configured one.
    #[arg(long, global = true)]
    install_dir: Option<PathBuf>,

    /// File listing the mission's flight-group names, one per line.
    #[arg(long, global = true, conflicts_with = "fg")]
    flight_groups: Option<PathBuf>,

    /// Flight-group name, in mission order. Repeat for each group.
    #[arg(long, global = true)]
    fg: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the merged configuration of a mission.
    Show {
        /// Mission file, e.g. Missions/1b6m1.tie
        mission: PathBuf,
        /// Print the model as JSON instead of the unified text.
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a mission's settings as a unified file, retiring legacy files.
    Migrate {
        mission: PathBuf,
        #[command(flatten)]
        answer: Answer,
    },
    /// Print the files that hold a mission's settings.
    Paths { mission: PathBuf },
}

/// Answer given to undersized hangar map prompts.
#[derive(Args)]
#[group(multiple = false)]
struct Answer {
    /// Drop undersized hangar maps without asking.
    #[arg(long)]
    yes: bool,
    /// Abort the save instead of dropping undersized hangar maps.
    #[arg(long)]
    no: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config)?;

    let flight_groups = load_flight_groups(cli.flight_groups.as_deref(), cli.fg)?;
    let installation = cli.install_dir.map(Installation::new).or_else(|| config.installation());

    match cli.command {
        Command::Show { mission, json } => {
            let mission = Mission::new(mission, flight_groups);
            let installation = installation.or_else(|| infer_installation(mission.path()));
            show(HookSession::open(mission, installation)?, json)
        }
        Command::Migrate { mission, answer } => {
            let mission = Mission::new(mission, flight_groups);
            let installation = installation.or_else(|| infer_installation(mission.path()));
            migrate(HookSession::open(mission, installation)?, &answer)
        }
        Command::Paths { mission } => {
            let mission = Mission::new(mission, flight_groups);
            let installation = installation.or_else(|| infer_installation(mission.path()));
            paths(&mission, installation.as_ref());
            Ok(())
        }
    }
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let log_path = dir.join(LOG_FILE);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .with_context(|| format!("failed to open {}", log_path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .compact()
                    .with_writer(std::sync::Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn load_flight_groups(file: Option<&Path>, names: Vec<String>) -> Result<Vec<String>> {
    let Some(file) = file else {
        return Ok(names);
    };
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok(parse_flight_groups(&text))
}

fn parse_flight_groups(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// A mission stored in `<root>/Missions/` implies the installation root.
fn infer_installation(mission: &Path) -> Option<Installation> {
    let missions = mission.parent()?;
    let is_missions_dir = missions
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(MISSIONS_DIR));
    if !is_missions_dir {
        return None;
    }
    missions.parent().map(Installation::new)
}

fn show(session: HookSession, as_json: bool) -> Result<()> {
    if as_json {
        let legacy: Vec<_> = session
            .legacy_sources()
            .iter()
            .map(|source| json!({ "feature": source.feature, "path": source.path }))
            .collect();
        let issues: Vec<String> = session.issues().iter().map(ToString::to_string).collect();
        let value = json!({
            "mission": session.mission(),
            "config_path": session.mission().config_path(),
            "legacy_files": legacy,
            "issues": issues,
            "model": session.model(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for feature in Feature::ALL {
        let hook = match session.hook_available(feature) {
            Some(true) => "installed",
            Some(false) => "missing",
            None => "unknown",
        };
        let state = if session.model().is_written(feature) {
            "written"
        } else if session.model().is_used(feature) {
            "kept in memory"
        } else {
            "unused"
        };
        println!("{:<16} hook {hook:<9} {state}", feature.section_name());
    }
    for issue in session.issues() {
        println!("issue: {issue}");
    }
    println!();
    print!("{}", session.render()?);
    Ok(())
}

struct StdinPrompt;

impl SavePrompt for StdinPrompt {
    fn confirm_drop_map(&mut self, feature: Feature, entries: usize) -> bool {
        print!("{feature} has only {entries} entries and will not be saved. Continue? [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut reply = String::new();
        if io::stdin().lock().read_line(&mut reply).is_err() {
            return false;
        }
        matches!(reply.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn migrate(mut session: HookSession, answer: &Answer) -> Result<()> {
    let outcome = if answer.yes {
        session.save(&mut |_: Feature, _: usize| true)?
    } else if answer.no {
        session.save(&mut |_: Feature, _: usize| false)?
    } else {
        session.save(&mut StdinPrompt)?
    };

    match outcome {
        SaveOutcome::Written(path) => println!("Wrote {}", path.display()),
        SaveOutcome::Removed => println!("No hooks in use; no unified file kept"),
        SaveOutcome::Aborted => println!("Save aborted; nothing changed"),
    }
    for source in session.legacy_sources() {
        println!("Kept legacy file {}", source.path.display());
    }
    Ok(())
}

fn paths(mission: &Mission, installation: Option<&Installation>) {
    println!("unified  {}", mission.config_path().display());
    println!("backup   {}", mission.backup_path().display());
    let Some(installation) = installation else {
        println!("legacy   (installation unknown)");
        return;
    };
    let name = mission.name();
    for feature in Feature::ALL {
        let path = installation.legacy_path(&name, feature);
        let marker = if path.is_file() { "*" } else { " " };
        println!("legacy {marker} {}", path.display());
    }
}
