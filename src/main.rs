// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> -C DIR --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Run
//! ```

use std::process::ExitCode;

use presto_rs::cli::global::GlobalOptions;
use presto_rs::cli::run::RunArgs;
use presto_rs::cli::{self, Command};
use presto_rs::cmd::config::{run_inis_command, run_options_command};
use presto_rs::cmd::run::run_run_command;
use presto_rs::config::loader::ConfigLoader;
use presto_rs::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use presto_rs::error::Result;
use presto_rs::logging::init_logging;

use anyhow::Context;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(dir) = &cli.global.directory
        && let Err(e) = std::env::set_current_dir(dir)
    {
        eprintln!("Error: failed to change directory to {}: {e}", dir.display());
        return ExitCode::FAILURE;
    }

    dispatch_command(&cli).await
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global, None).and_then(|config| run_options_command(&config))
        }
        Some(Command::Inis) => build_config_loader(&cli.global, None)
            .map(|loader| run_inis_command(&loader.format_loaded_files())),
        Some(Command::Run(args)) => handle_run_command(&cli.global, args).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

async fn handle_run_command(global: &GlobalOptions, args: &RunArgs) -> Result<()> {
    let config = load_config(global, Some(args))?;
    let _log_guard = init_logging(&config.log_config())?;
    run_run_command(args, &config).await
}

fn build_config_loader(global: &GlobalOptions, run: Option<&RunArgs>) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(CONFIG_FILE_NAME);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    let run_overrides = run.map(RunArgs::to_config_overrides).unwrap_or_default();
    for assignment in global.to_config_overrides().iter().chain(&run_overrides) {
        loader = loader.apply_override(assignment)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions, run: Option<&RunArgs>) -> Result<Config> {
    build_config_loader(global, run)?
        .build()
        .context("failed to load config")
}
