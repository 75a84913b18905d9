use crate::analyzer::rules::{self, ScoreCategory};
use crate::models::{Finding, Recommendation, ScoreReport, MAX_SCORE};
use tracing::debug;

/// Turns findings into category scores and actionable recommendations.
pub struct ScoreSynthesizer;

impl ScoreSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Every category starts at 100 and loses its findings' penalties,
    /// saturating at 0. A finding only ever lowers its own category.
    pub fn score(&self, findings: &[Finding]) -> ScoreReport {
        let mut quality = MAX_SCORE;
        let mut performance = MAX_SCORE;
        let mut security = MAX_SCORE;

        for finding in findings {
            let penalty = rules::penalty(finding.severity);
            let category = match rules::rule(finding.code).category {
                ScoreCategory::Quality => &mut quality,
                ScoreCategory::Performance => &mut performance,
                ScoreCategory::Security => &mut security,
            };
            *category = category.saturating_sub(penalty);
        }

        let report = ScoreReport::from_categories(quality, performance, security);
        debug!(
            overall = report.overall,
            quality = report.quality,
            performance = report.performance,
            security = report.security,
            "scores computed"
        );
        report
    }

    /// One recommendation per warning or error, in finding order.
    pub fn recommend(&self, findings: &[Finding]) -> Vec<Recommendation> {
        findings
            .iter()
            .enumerate()
            .filter(|(_, finding)| finding.severity.is_actionable())
            .map(|(index, finding)| {
                let remediation = rules::rule(finding.code).remediation;
                let message = match finding.line_number {
                    Some(line) => format!("Line {}: {}", line, remediation),
                    None => remediation.to_string(),
                };
                Recommendation {
                    message,
                    related_finding: Some(index),
                }
            })
            .collect()
    }
}

impl Default for ScoreSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn score(findings: &[Finding]) -> ScoreReport {
    ScoreSynthesizer::new().score(findings)
}

pub fn recommend(findings: &[Finding]) -> Vec<Recommendation> {
    ScoreSynthesizer::new().recommend(findings)
}
