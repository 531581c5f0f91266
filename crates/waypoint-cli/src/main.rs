use anyhow::{Context, Result};
use std::{env, path::PathBuf, process};
use waypoint_config::Config;

mod script;

use script::Script;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <edit-script.toml>", args[0]);
        process::exit(1);
    }

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!(
                "No config file at {}, using defaults",
                Config::config_path().display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let script_path = config.script_path(&PathBuf::from(&args[1]));
    log::info!("Replaying {}", script_path.display());

    let content = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read edit script {}", script_path.display()))?;
    let script = Script::parse(&content)
        .with_context(|| format!("Failed to parse edit script {}", script_path.display()))?;

    let report = script::run(&script, &config)?;
    print!("{report}");

    Ok(())
}
