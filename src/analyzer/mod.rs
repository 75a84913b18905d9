// Analyzer module - error scanning, scoring and pipeline orchestration

pub mod orchestrator;
pub mod rules;
pub mod scanner;
pub mod scoring;

pub use orchestrator::{analyze, ScriptAnalyzer};
pub use rules::{RuleEntry, ScoreCategory, RULES};
pub use scanner::{ErrorScanner, ScanContext};
pub use scoring::ScoreSynthesizer;
