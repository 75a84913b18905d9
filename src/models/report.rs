use crate::models::analysis::{AnalysisResult, Finding, FunctionSignature, Recommendation};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall: u8,
    pub quality: u8,
    pub performance: u8,
    pub security: u8,
}

/// Wire shape handed to HTTP-style callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub format: String,
    pub module_type: String,
    pub functions: Vec<FunctionEntry>,
    pub errors: Vec<ErrorEntry>,
    pub recommendations: Vec<RecommendationEntry>,
    pub scores: ScoreReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub name: String,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub severity: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ScoreReport {
    pub fn perfect() -> Self {
        Self {
            overall: MAX_SCORE,
            quality: MAX_SCORE,
            performance: MAX_SCORE,
            security: MAX_SCORE,
        }
    }

    /// Builds a report from category scores; `overall` is their unweighted
    /// mean rounded half away from zero.
    pub fn from_categories(quality: u8, performance: u8, security: u8) -> Self {
        let quality = quality.min(MAX_SCORE);
        let performance = performance.min(MAX_SCORE);
        let security = security.min(MAX_SCORE);
        let mean = (quality as f64 + performance as f64 + security as f64) / 3.0;

        Self {
            overall: mean.round() as u8,
            quality,
            performance,
            security,
        }
    }

    pub fn grade(&self) -> &'static str {
        match self.overall {
            90..=100 => "excellent",
            75..=89 => "good",
            50..=74 => "fair",
            _ => "poor",
        }
    }
}

impl Default for ScoreReport {
    fn default() -> Self {
        Self::perfect()
    }
}

impl From<&FunctionSignature> for FunctionEntry {
    fn from(function: &FunctionSignature) -> Self {
        Self {
            name: function.name.clone(),
            parameters: function.parameters.clone(),
            line: function.line_number,
        }
    }
}

impl From<&Finding> for ErrorEntry {
    fn from(finding: &Finding) -> Self {
        Self {
            severity: finding.severity.as_str().to_string(),
            code: finding.code.as_str().to_string(),
            message: finding.message.clone(),
            line: finding.line_number,
        }
    }
}

impl RecommendationEntry {
    fn from_recommendation(recommendation: &Recommendation, findings: &[Finding]) -> Self {
        let related = recommendation
            .related_finding
            .and_then(|index| findings.get(index));

        Self {
            message: recommendation.message.clone(),
            code: related.map(|f| f.code.as_str().to_string()),
            line: related.and_then(|f| f.line_number),
        }
    }
}

impl From<&AnalysisResult> for AnalysisResponse {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            format: result.format.as_str().to_string(),
            module_type: result.module_type.as_str().to_string(),
            functions: result.functions.iter().map(FunctionEntry::from).collect(),
            errors: result.findings.iter().map(ErrorEntry::from).collect(),
            recommendations: result
                .recommendations
                .iter()
                .map(|r| RecommendationEntry::from_recommendation(r, &result.findings))
                .collect(),
            scores: result.scores,
        }
    }
}

impl AnalysisResponse {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
