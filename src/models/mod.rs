pub mod analysis;
pub mod report;
pub mod script;

pub use analysis::{AnalysisResult, Finding, FindingCode, FunctionSignature, Recommendation, Severity};
pub use report::{
    AnalysisResponse, ErrorEntry, FunctionEntry, RecommendationEntry, ScoreReport, MAX_SCORE,
};
pub use script::{AnalysisInput, FormatKind, ModuleKind, TfsVersion};
