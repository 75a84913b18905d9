use crate::error::AnalyzerError;
use crate::models::{ModuleKind, MAX_SCORE};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tfs-analyzer")]
#[command(about = "Static analyzer for The Forgotten Server Lua scripts")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Script to analyze; reads stdin when omitted or `-`
    pub path: Option<PathBuf>,

    /// Target server version, e.g. 1.4.2
    #[arg(long = "tfs-version", env = "TFS_ANALYZER_TFS_VERSION", value_name = "VERSION")]
    pub tfs_version: Option<String>,

    /// Module type to assume when it cannot be detected (action, movement, ...)
    #[arg(short = 'm', long = "module", value_name = "KIND")]
    pub module: Option<String>,

    /// Print the structured JSON response instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when the overall score is below this value (0-100)
    #[arg(long, env = "TFS_ANALYZER_MIN_SCORE", value_parser = validate_min_score)]
    pub min_score: Option<u8>,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output including detector decisions
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    pub fn parse_args() -> Result<Self, AnalyzerError> {
        let cli = Self::try_parse().map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => AnalyzerError::InvalidArguments(e.to_string()),
        })?;

        cli.validate()?;

        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if let Some(min_score) = self.min_score {
            if min_score > MAX_SCORE {
                return Err(AnalyzerError::InvalidArguments(format!(
                    "Minimum score must be between 0 and {}",
                    MAX_SCORE
                )));
            }
        }

        if let Some(ref module) = self.module {
            if ModuleKind::from_hint(module).is_none() {
                return Err(AnalyzerError::InvalidArguments(format!(
                    "Unknown module type '{}'",
                    module
                )));
            }
        }

        Ok(())
    }

    /// `None` means stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    pub fn get_tfs_version(&self) -> Option<&str> {
        self.tfs_version.as_deref()
    }

    pub fn get_module_hint(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    pub fn should_use_color(&self) -> bool {
        // Disable color if NO_COLOR environment variable is set
        std::env::var("NO_COLOR").is_err()
    }
}

fn validate_min_score(s: &str) -> Result<u8, String> {
    let score: u8 = s
        .parse()
        .map_err(|_| "Minimum score must be a number between 0 and 100")?;

    if score <= MAX_SCORE {
        Ok(score)
    } else {
        Err(format!("Minimum score must be between 0 and {}", MAX_SCORE))
    }
}
