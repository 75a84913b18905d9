use crate::models::{FormatKind, ModuleKind, ScoreReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Stable identifier of a detected issue. The category, penalty and
/// remediation text of each code live in `analyzer::rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    BadTableSyntax,
    MissingRegistration,
    MissingReturn,
    SecurityLeakage,
    DialectMix,
    MalformedSignature,
    UnsupportedDialect,
    QueryInLoop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<String>,
    pub line_number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    pub message: String,
    pub line_number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub message: String,
    /// Index into `AnalysisResult::findings`.
    pub related_finding: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub format: FormatKind,
    pub module_type: ModuleKind,
    pub functions: Vec<FunctionSignature>,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub scores: ScoreReport,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn as_emoji(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Error => "🚨",
        }
    }

    pub fn numeric_value(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        }
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(self, Severity::Info)
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.numeric_value().cmp(&other.numeric_value())
    }
}

impl FindingCode {
    pub const ALL: [FindingCode; 8] = [
        FindingCode::BadTableSyntax,
        FindingCode::MissingRegistration,
        FindingCode::MissingReturn,
        FindingCode::SecurityLeakage,
        FindingCode::DialectMix,
        FindingCode::MalformedSignature,
        FindingCode::UnsupportedDialect,
        FindingCode::QueryInLoop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::BadTableSyntax => "BAD_TABLE_SYNTAX",
            FindingCode::MissingRegistration => "MISSING_REGISTRATION",
            FindingCode::MissingReturn => "MISSING_RETURN",
            FindingCode::SecurityLeakage => "SECURITY_LEAKAGE",
            FindingCode::DialectMix => "DIALECT_MIX",
            FindingCode::MalformedSignature => "MALFORMED_SIGNATURE",
            FindingCode::UnsupportedDialect => "UNSUPPORTED_DIALECT",
            FindingCode::QueryInLoop => "QUERY_IN_LOOP",
        }
    }
}

impl std::fmt::Display for FindingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
            line_number: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line_number = Some(line);
        self
    }

    /// Event callbacks follow the `onSomething` naming convention.
    pub fn is_handler(&self) -> bool {
        self.name.starts_with("on")
            && self
                .name
                .chars()
                .nth(2)
                .map_or(false, |c| c.is_ascii_uppercase())
    }
}

impl Finding {
    pub fn new(severity: Severity, code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            line_number: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line_number = Some(line);
        self
    }

    pub fn location(&self) -> String {
        match self.line_number {
            Some(line) => format!("line {}", line),
            None => "script".to_string(),
        }
    }
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f.severity, Severity::Error))
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn findings_with_code(&self, code: FindingCode) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.code == code).collect()
    }
}
