use tfs_analyzer::analyzer::rules::{self, ScoreCategory, RULES};
use tfs_analyzer::analyzer::scoring::{recommend, score};
use tfs_analyzer::models::{Finding, FindingCode, ScoreReport, Severity};

#[test]
fn overall_is_unweighted_rounded_mean() {
    assert_eq!(ScoreReport::from_categories(92, 100, 100).overall, 97);
    assert_eq!(ScoreReport::from_categories(80, 92, 100).overall, 91);
    assert_eq!(ScoreReport::from_categories(0, 0, 1).overall, 0);
    assert_eq!(ScoreReport::from_categories(0, 1, 1).overall, 1);
}

#[test]
fn each_code_lowers_exactly_one_category() {
    for entry in RULES {
        let report = score(&[rules::finding(entry.code, "x")]);
        let lowered = [
            (ScoreCategory::Quality, report.quality),
            (ScoreCategory::Performance, report.performance),
            (ScoreCategory::Security, report.security),
        ];

        for (category, value) in lowered {
            if category == entry.category {
                assert!(value < 100, "{} should lower {:?}", entry.code, category);
            } else {
                assert_eq!(value, 100, "{} should not touch {:?}", entry.code, category);
            }
        }
    }
}

#[test]
fn scores_stay_in_range() {
    let findings: Vec<Finding> = (0..50)
        .map(|_| rules::finding(FindingCode::SecurityLeakage, "leak"))
        .collect();
    let report = score(&findings);

    assert_eq!(report.security, 0);
    assert!(report.overall <= 100);
}

#[test]
fn severity_override_changes_penalty() {
    let warning = Finding::new(Severity::Warning, FindingCode::BadTableSyntax, "x");
    let error = Finding::new(Severity::Error, FindingCode::BadTableSyntax, "x");

    assert_eq!(score(&[warning]).quality, 92);
    assert_eq!(score(&[error]).quality, 80);
}

#[test]
fn recommendations_follow_actionable_findings() {
    let findings = vec![
        rules::finding(FindingCode::QueryInLoop, "loop").at_line(12),
        Finding::new(Severity::Info, FindingCode::DialectMix, "note"),
        rules::finding(FindingCode::SecurityLeakage, "leak").at_line(2),
    ];
    let recommendations = recommend(&findings);

    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0].related_finding, Some(0));
    assert!(recommendations[0].message.starts_with("Line 12:"));
    assert_eq!(recommendations[1].related_finding, Some(2));
    assert!(recommendations[1].message.contains("db.escapeString"));
}
