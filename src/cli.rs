//! Command-line argument parsing for the `ctrace` binary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// ctrace traces the lifecycle of a function across a Go module without
/// running it: where it is declared, what it calls, and where those callees
/// are declared.
#[derive(Parser, Debug)]
#[command(name = "ctrace", version, about = "Static Code Lifecycle Tracer")]
pub struct Cli {
    /// Log filter (e.g. 'debug', 'ctrace=trace'); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory containing go.mod (default: nearest to the traced file)
    #[arg(long, global = true, value_name = "DIR")]
    pub module_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Explain the flow of a given endpoint or function
    Explain {
        /// Go source file declaring the function
        file_path: PathBuf,

        /// Name of the function to trace
        function_name: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Applies command-line flags on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.no_color {
            config.color = false;
        }
        if let Some(root) = &self.module_root {
            config.module_root = Some(root.clone());
        }
    }

    /// Validates the inputs of the selected command
    pub fn validate(&self) -> Result<()> {
        if let Some(Command::Explain { file_path, .. }) = &self.command {
            if !file_path.exists() {
                anyhow::bail!("File does not exist: {}", file_path.display());
            }
            if !file_path.is_file() {
                anyhow::bail!("Path is not a file: {}", file_path.display());
            }
        }

        if let Some(root) = &self.module_root
            && !root.is_dir()
        {
            anyhow::bail!("Module root is not a directory: {}", root.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_explain() {
        let cli = Cli::try_parse_from(["ctrace", "explain", "main.go", "run", "--json"]).unwrap();

        match cli.command {
            Some(Command::Explain {
                file_path,
                function_name,
                json,
            }) => {
                assert_eq!(file_path, PathBuf::from("main.go"));
                assert_eq!(function_name, "run");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_explain_requires_two_arguments() {
        assert!(Cli::try_parse_from(["ctrace", "explain", "main.go"]).is_err());
        assert!(Cli::try_parse_from(["ctrace", "explain", "a.go", "f", "extra"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["ctrace"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "ctrace",
            "explain",
            "main.go",
            "run",
            "--no-color",
            "--log-level",
            "debug",
            "--module-root",
            "/src/app",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert_eq!(config.log_level, "debug");
        assert!(!config.color);
        assert_eq!(config.module_root, Some(PathBuf::from("/src/app")));
    }

    #[test]
    fn test_validate() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["ctrace", "explain", path.as_str(), "run"])?;
        assert!(cli.validate().is_ok());

        let cli = Cli::try_parse_from(["ctrace", "explain", "/nonexistent/main.go", "run"])?;
        assert!(cli.validate().is_err());

        Ok(())
    }
}
