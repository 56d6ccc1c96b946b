use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use ctrace::cli::{Cli, Command};
use ctrace::config::Config;
use ctrace::{GoLang, GoModDiscovery, GoModule, Resolver, output, trace_function};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn explain(config: &Config, file_path: &Path, function_name: &str, json: bool) -> Result<()> {
    let resolver = match &config.module_root {
        Some(root) => Resolver::new(GoLang, &GoModDiscovery::new(root)),
        None => {
            let start = file_path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            Resolver::new(GoLang, &GoModDiscovery::new(start))
        }
    };

    if let Some(GoModule { name, root }) = resolver.module() {
        tracing::info!("Tracing within module {} ({})", name, root.display());
    }

    let report = trace_function(file_path, function_name, &resolver).with_context(|| {
        format!(
            "Failed to trace {} in {}",
            function_name,
            file_path.display()
        )
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in output::render_report(&report, config.color) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    cli.apply_to(&mut config);

    init_tracing(&config);

    cli.validate()?;

    match &cli.command {
        Some(Command::Explain {
            file_path,
            function_name,
            json,
        }) => explain(&config, file_path, function_name, *json),
        None => {
            println!("{}", output::banner(config.color));
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
