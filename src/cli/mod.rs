pub mod args;
pub mod reporter;

pub use args::Cli;
pub use reporter::ReportFormatter;

use crate::analyzer::ScriptAnalyzer;
use crate::error::AnalyzerError;
use crate::models::{AnalysisInput, AnalysisResponse, AnalysisResult};
use std::io::{self, Read};
use tracing::{debug, info};

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn run(&self) -> Result<i32, AnalyzerError> {
        let bytes = self.read_input()?;
        let result = self.analyze_bytes(&bytes)?;

        println!("{}", self.render(&result)?);

        let exit_code = self.exit_code(&result);
        if exit_code != 0 {
            info!(
                overall = result.scores.overall,
                min_score = self.cli.min_score,
                "score below threshold"
            );
        }
        Ok(exit_code)
    }

    fn read_input(&self) -> Result<Vec<u8>, AnalyzerError> {
        match self.cli.input_path() {
            Some(path) => {
                debug!(path = %path.display(), "reading script file");
                Ok(std::fs::read(path)?)
            }
            None => {
                debug!("reading script from stdin");
                let mut buffer = Vec::new();
                io::stdin().read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    pub fn build_input(&self, bytes: &[u8]) -> Result<AnalysisInput, AnalyzerError> {
        let mut input = AnalysisInput::from_bytes(bytes)?;
        if let Some(version) = self.cli.get_tfs_version() {
            input = input.with_tfs_version(version);
        }
        if let Some(module) = self.cli.get_module_hint() {
            input = input.with_module_type(module);
        }
        Ok(input)
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, AnalyzerError> {
        let input = self.build_input(bytes)?;
        ScriptAnalyzer::new().analyze(&input)
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<String, AnalyzerError> {
        if self.cli.json {
            return Ok(AnalysisResponse::from(result).to_json_pretty()?);
        }
        Ok(ReportFormatter::new(&self.cli).format_analysis_report(result))
    }

    pub fn exit_code(&self, result: &AnalysisResult) -> i32 {
        match self.cli.min_score {
            Some(min_score) if result.scores.overall < min_score => 1,
            _ => 0,
        }
    }
}
