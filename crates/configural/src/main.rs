mod cli;

use std::process::ExitCode;

use clap::Parser;
use configural_core::{Application, FileStore, Result, StoreKind};
use log::{debug, error};
use serde_json::Value;

use crate::cli::{CliArgs, Commands};

fn main() -> ExitCode {
    if let Err(e) = env_logger::try_init() {
        eprintln!("Failed to initialize env_logger: {}", e);
    }

    let args = CliArgs::parse();
    debug!("Parsed args: {:?}", args);

    let app = match build_app(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&app, args.store.into(), args.command) {
        Ok(code) => code,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_app(args: &CliArgs) -> Result<Application> {
    let mut builder = Application::builder(&args.app);
    if let Some(format) = &args.format {
        builder = builder.default_format(format);
    }
    if let Some(dir) = &args.config_dir {
        builder = builder.config_dir(dir);
    }
    if let Some(dir) = &args.cache_dir {
        builder = builder.cache_dir(dir);
    }
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(dir);
    }
    builder.build()
}

fn run(app: &Application, kind: StoreKind, command: Commands) -> Result<ExitCode> {
    let store: &FileStore = app.store(kind);

    match command {
        Commands::Paths => {
            for kind in StoreKind::ALL {
                println!("{}: {}", kind, app.dirs().dir(kind).display());
            }
        }
        Commands::Get { file, key } => {
            let handle = store.get(&file)?;
            match handle.get(&key) {
                Some(value) => println!("{}", value),
                None => {
                    eprintln!("Key '{}' not found in {}", key, handle.path().display());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Set { file, key, value } => {
            let handle = store.get(&file)?;
            handle.set(&key, parse_value(&value));
            handle.try_save()?;
            println!("Saved '{}' to {}", key, handle.path().display());
        }
        Commands::Keys { file } => {
            for key in store.get(&file)?.keys() {
                println!("{}", key);
            }
        }
        Commands::List => {
            for name in store.list_files()? {
                println!("{}", name);
            }
        }
        Commands::Delete { file } => {
            let handle = store.get(&file)?;
            handle.delete()?;
            println!("Deleted {}", handle.path().display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Interpret a command-line value as JSON, falling back to a plain string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
