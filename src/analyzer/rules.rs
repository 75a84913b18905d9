//! Central rule table: every finding code's category, default severity and
//! remediation text. Checks and the scorer only ever read from here.

use crate::models::{Finding, FindingCode, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    Quality,
    Performance,
    Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEntry {
    pub code: FindingCode,
    pub category: ScoreCategory,
    pub severity: Severity,
    pub remediation: &'static str,
}

pub const RULES: &[RuleEntry] = &[
    RuleEntry {
        code: FindingCode::BadTableSyntax,
        category: ScoreCategory::Quality,
        severity: Severity::Error,
        remediation: "Lua tables are built with braces: replace `[ ... ]` with `{ ... }` and use `[key] = value` only for keys inside a table constructor.",
    },
    RuleEntry {
        code: FindingCode::MissingRegistration,
        category: ScoreCategory::Quality,
        severity: Severity::Warning,
        remediation: "Call `:register()` on the event object after defining its handlers, or add the matching entry to the XML registration file, otherwise the server never loads the script.",
    },
    RuleEntry {
        code: FindingCode::MissingReturn,
        category: ScoreCategory::Quality,
        severity: Severity::Warning,
        remediation: "Return `true` (or `false` to cancel the event) at the end of the handler so the server knows whether the event succeeded.",
    },
    RuleEntry {
        code: FindingCode::SecurityLeakage,
        category: ScoreCategory::Security,
        severity: Severity::Error,
        remediation: "Remove embedded credentials from the script and pass values through `db.escapeString` instead of concatenating them into SQL.",
    },
    RuleEntry {
        code: FindingCode::DialectMix,
        category: ScoreCategory::Quality,
        severity: Severity::Warning,
        remediation: "Replace legacy global functions with their object methods (for example `player:sendTextMessage` instead of `doPlayerSendTextMessage`).",
    },
    RuleEntry {
        code: FindingCode::MalformedSignature,
        category: ScoreCategory::Quality,
        severity: Severity::Warning,
        remediation: "Write the function header on one line as `function name(param1, param2)` with a closing parenthesis.",
    },
    RuleEntry {
        code: FindingCode::UnsupportedDialect,
        category: ScoreCategory::Quality,
        severity: Severity::Warning,
        remediation: "RevScriptSys requires TFS 1.3 or newer: upgrade the server or rewrite the script as a legacy XML-registered script.",
    },
    RuleEntry {
        code: FindingCode::QueryInLoop,
        category: ScoreCategory::Performance,
        severity: Severity::Warning,
        remediation: "Move the database query out of the loop and fetch all rows with a single query, or batch the writes.",
    },
];

pub fn rule(code: FindingCode) -> &'static RuleEntry {
    RULES
        .iter()
        .find(|entry| entry.code == code)
        .unwrap_or_else(|| unreachable!("rule table is missing {}", code))
}

/// Builds a finding with the code's default severity.
pub fn finding(code: FindingCode, message: impl Into<String>) -> Finding {
    Finding::new(rule(code).severity, code, message)
}

pub fn penalty(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 20,
        Severity::Warning => 8,
        Severity::Info => 2,
    }
}
