pub mod analyzer;
pub mod cli;
pub mod error;
pub mod models;
pub mod parser;

pub use error::AnalyzerError;

// Re-export commonly used types
pub use models::{
    AnalysisInput, AnalysisResponse, AnalysisResult, Finding, FindingCode, FormatKind,
    FunctionSignature, ModuleKind, Recommendation, ScoreReport, Severity,
};

pub use analyzer::{analyze, ScriptAnalyzer};

pub use cli::CliHandler;
