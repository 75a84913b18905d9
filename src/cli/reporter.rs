use crate::cli::args::Cli;
use crate::error::AnalyzerError;
use crate::models::{AnalysisResult, Severity};

const RESET: &str = "\x1b[0m";

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
}

impl ReportFormatter {
    pub fn new(cli: &Cli) -> Self {
        Self::plain()
            .with_colors(cli.should_use_color())
            .with_verbose(cli.is_verbose())
    }

    pub fn plain() -> Self {
        Self {
            use_colors: false,
            verbose: false,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn format_analysis_report(&self, result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(result));
        output.push_str("\n\n");

        output.push_str(&self.format_scores(result));
        output.push_str("\n\n");

        if !result.functions.is_empty() {
            let functions = result
                .functions
                .iter()
                .map(|f| {
                    let line = f.line_number.map_or(String::new(), |l| format!("  (line {})", l));
                    format!("• {}({}){}", f.name, f.parameters.join(", "), line)
                })
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str(&self.format_section("Functions", &functions));
            output.push_str("\n\n");
        }

        let findings: Vec<_> = result
            .findings
            .iter()
            .filter(|f| self.verbose || f.severity.is_actionable())
            .map(|f| {
                format!(
                    "{}{} [{}] {}: {}{}",
                    self.severity_color(f.severity),
                    f.severity.as_emoji(),
                    f.code,
                    f.location(),
                    f.message,
                    self.reset()
                )
            })
            .collect();

        if findings.is_empty() {
            output.push_str(&self.format_section("Findings", "No issues found"));
        } else {
            output.push_str(&self.format_section("Findings", &findings.join("\n")));
        }

        if !result.recommendations.is_empty() {
            let recommendations = result
                .recommendations
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{}. {}", i + 1, r.message))
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str("\n\n");
            output.push_str(&self.format_section("Recommendations", &recommendations));
        }

        output
    }

    fn format_header(&self, result: &AnalysisResult) -> String {
        let title = "TFS SCRIPT ANALYSIS REPORT";
        let details = format!(
            "Format: {} | Module: {}",
            result.format.as_str(),
            result.module_type.as_str()
        );

        if self.use_colors {
            format!("\x1b[1m\x1b[36m═══ {} ═══{}\n{}", title, RESET, details)
        } else {
            format!("=== {} ===\n{}", title, details)
        }
    }

    fn format_scores(&self, result: &AnalysisResult) -> String {
        let scores = &result.scores;
        let color = if !self.use_colors {
            ""
        } else if scores.overall >= 90 {
            "\x1b[1m\x1b[32m"
        } else if scores.overall >= 50 {
            "\x1b[1m\x1b[33m"
        } else {
            "\x1b[1m\x1b[31m"
        };

        format!(
            "{}Overall score: {}/100 ({}){}\nQuality: {}  Performance: {}  Security: {}",
            color,
            scores.overall,
            scores.grade(),
            self.reset(),
            scores.quality,
            scores.performance,
            scores.security
        )
    }

    fn format_section(&self, title: &str, content: &str) -> String {
        if self.use_colors {
            format!("\x1b[1m\x1b[37m{}{}\n{}", title, RESET, content)
        } else {
            format!("{}\n{}\n{}", title, "─".repeat(title.len()), content)
        }
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        if !self.use_colors {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[34m",
        }
    }

    fn reset(&self) -> &'static str {
        if self.use_colors {
            RESET
        } else {
            ""
        }
    }

    pub fn format_error(&self, error: &AnalyzerError) -> String {
        if self.use_colors {
            format!("\x1b[1m\x1b[31m❌ {}{}", error, RESET)
        } else {
            format!("❌ {}", error)
        }
    }
}
