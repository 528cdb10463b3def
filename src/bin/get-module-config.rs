//! Print a module's tag prefix and commit scope as one line of JSON.
//!
//! Usage: get-module-config <module-directory>

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;

use scope_release::module_config::ModuleConfigResolver;
use scope_release::settings::Settings;

#[derive(clap::Parser)]
#[command(
    name = "get-module-config",
    about = "Extract tag prefix and commit scope from a module's release config"
)]
struct Args {
    /// Module directory containing module.toml or .releaserc.json
    module_dir: PathBuf,
}

#[derive(Serialize)]
struct Output<'a> {
    tag_prefix: &'a str,
    commit_scope: &'a str,
}

fn main() {
    scope_release::init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            eprintln!("Error: Module directory not provided.");
            process::exit(1);
        }
        Err(e) => {
            let message = e.to_string();
            let first = message.lines().next().unwrap_or("invalid arguments");
            eprintln!("Error: {}", first.trim_start_matches("error: "));
            process::exit(1);
        }
    };

    let resolver = ModuleConfigResolver::new(Settings::default());
    let config = match resolver.resolve_config(&args.module_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = Output {
        tag_prefix: &config.tag_prefix,
        commit_scope: &config.commit_scope,
    };
    match serde_json::to_string(&output) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
