use crate::models::{FormatKind, ModuleKind};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// One row of the format policy: first matching row decides the dialect.
pub struct FormatRule {
    pub format: FormatKind,
    pub signal: &'static str,
    pattern: Regex,
}

lazy_static! {
    /// `Action|MoveEvent|...` built from the known module constructors.
    pub static ref CONSTRUCTOR_ALTERNATION: String = ModuleKind::KNOWN
        .iter()
        .filter_map(|kind| kind.constructor())
        .collect::<Vec<_>>()
        .join("|");

    static ref FORMAT_RULES: Vec<FormatRule> = vec![
        FormatRule::new(FormatKind::Xml, "xml prolog", r"<\?xml"),
        FormatRule::new(FormatKind::Xml, "xml tag", r"</?[A-Za-z_][\w\-]*>"),
        FormatRule::new(
            FormatKind::RevScript,
            "constructor call",
            &format!(
                r"\blocal\s+[A-Za-z_]\w*\s*=\s*(?:{})\(",
                *CONSTRUCTOR_ALTERNATION
            ),
        ),
        FormatRule::new(FormatKind::RevScript, "register call", r":register\(\)"),
        FormatRule::new(FormatKind::RevScript, "method call", r":[A-Za-z_]\w*\("),
    ];
}

impl FormatRule {
    fn new(format: FormatKind, signal: &'static str, pattern: &str) -> Self {
        Self {
            format,
            signal,
            pattern: Regex::new(pattern).expect("valid format pattern"),
        }
    }

    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

pub struct FormatDetector;

impl FormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Legacy (XML-registered) scripts are plain callback functions, so
    /// `Xml` is the fallback when no rule matches.
    pub fn detect_format(&self, content: &str) -> FormatKind {
        match FORMAT_RULES.iter().find(|rule| rule.matches(content)) {
            Some(rule) => {
                debug!(signal = rule.signal, format = rule.format.as_str(), "format detected");
                rule.format
            }
            None => {
                debug!("no format signal, defaulting to xml");
                FormatKind::Xml
            }
        }
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn detect_format(content: &str) -> FormatKind {
    FormatDetector::new().detect_format(content)
}
