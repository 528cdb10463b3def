use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use scope_release::analyzer::{analyze_modules, ModuleOutcome};
use scope_release::input::read_commits;
use scope_release::module_config::{discover_modules, ModuleConfigResolver};
use scope_release::settings::load_settings;
use scope_release::ui;
use scope_release::warnings::AnalysisWarning;

#[derive(Parser)]
#[command(
    name = "scope-release",
    version,
    about = "Decide per-module release levels from scoped conventional commits"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom settings file path")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a module's resolved identity as JSON
    Config {
        /// Module directory
        module_dir: PathBuf,
    },

    /// Compute the release decision for one or more modules
    Analyze {
        /// Module directories to analyze
        #[arg(required_unless_present = "root")]
        module_dirs: Vec<PathBuf>,

        /// Analyze every module found directly under this directory
        #[arg(long, conflicts_with = "module_dirs")]
        root: Option<PathBuf>,

        /// JSON commit list, or `-` for stdin
        #[arg(short, long)]
        commits: PathBuf,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// List module directories under a root
    Modules {
        /// Directory containing module directories
        root: PathBuf,
    },
}

fn main() {
    scope_release::init_tracing();

    let args = Args::parse();
    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when some module failed but output was still produced.
fn run(args: Args) -> Result<bool> {
    let settings = load_settings(args.settings.as_deref()).context("Error loading settings")?;
    let resolver = ModuleConfigResolver::new(settings);

    match args.command {
        Command::Config { module_dir } => {
            let module = resolver.resolve(&module_dir)?;
            let output = json!({
                "tag_prefix": module.config.tag_prefix,
                "commit_scope": module.config.commit_scope,
                "name": module.config.name,
                "title": module.config.title,
                "source": module.source,
            });
            println!("{}", output);
            Ok(true)
        }
        Command::Analyze {
            module_dirs,
            root,
            commits,
            json,
        } => {
            let dirs = match root {
                Some(root) => discover(&root, &resolver)?,
                None => module_dirs,
            };
            let commits = read_commits(&commits)
                .with_context(|| format!("Failed to read commits from {}", commits.display()))?;

            let outcomes = analyze_modules(&resolver, &dirs, &commits);
            let all_ok = outcomes.iter().all(|o| o.result.is_ok());
            if json {
                print_json(&outcomes)?;
            } else {
                print_human(&outcomes);
            }
            Ok(all_ok)
        }
        Command::Modules { root } => {
            let modules = discover(&root, &resolver)?;
            if modules.is_empty() {
                ui::display_status(&format!("No modules found in {}", root.display()));
            } else {
                ui::display_modules(&modules);
            }
            Ok(true)
        }
    }
}

fn discover(root: &Path, resolver: &ModuleConfigResolver) -> Result<Vec<PathBuf>> {
    discover_modules(root, resolver.settings())
        .with_context(|| format!("Failed to list modules in {}", root.display()))
}

fn print_json(outcomes: &[ModuleOutcome]) -> Result<()> {
    let values = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(report) => serde_json::to_value(report),
            Err(e) => Ok(json!({
                "dir": outcome.dir,
                "error": e.to_string(),
            })),
        })
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

fn print_human(outcomes: &[ModuleOutcome]) {
    let mut analyzed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                analyzed += 1;
                ui::display_module_report(report);
                for warning in AnalysisWarning::for_report(report) {
                    ui::display_warning(&warning);
                }
            }
            Err(e) => ui::display_error(&format!("{}: {}", outcome.dir.display(), e)),
        }
    }
    if analyzed == outcomes.len() {
        ui::display_success(&format!("Analyzed {} module(s)", analyzed));
    }
}
