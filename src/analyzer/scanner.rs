use crate::analyzer::rules;
use crate::models::{Finding, FindingCode, FormatKind, FunctionSignature, ModuleKind, TfsVersion};
use crate::parser::blocks::BlockTracker;
use crate::parser::extractor::FunctionExtractor;
use crate::parser::format::CONSTRUCTOR_ALTERNATION;
use crate::parser::source::{split_lines, SourceLine};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Deprecated pre-1.0 globals that have object-method replacements.
pub const LEGACY_FUNCTIONS: &[&str] = &[
    "doPlayerSendTextMessage",
    "doPlayerSendCancel",
    "doPlayerAddItem",
    "doPlayerRemoveItem",
    "doPlayerAddMoney",
    "doPlayerRemoveMoney",
    "doPlayerAddExp",
    "doPlayerAddOutfit",
    "getPlayerStorageValue",
    "setPlayerStorageValue",
    "getGlobalStorageValue",
    "setGlobalStorageValue",
    "getPlayerLevel",
    "getPlayerName",
    "getPlayerGUID",
    "getPlayerPosition",
    "getCreatureName",
    "getCreaturePosition",
    "getThingPos",
    "getThingfromPos",
    "doTeleportThing",
    "doSendMagicEffect",
    "doSendAnimatedText",
    "doRemoveItem",
    "doTransformItem",
    "doCreateItem",
    "doCreatureSay",
    "doCreatureAddHealth",
    "doSummonCreature",
];

lazy_static! {
    static ref LOOSE_BRACKET: Regex =
        Regex::new(r"(?:(?:^|[^=~<>])=|\breturn)\s*\[(?:[^\[=]|$)").expect("valid table pattern");
    static ref CONSTRUCTOR_BINDING: Regex = Regex::new(&format!(
        r"\blocal\s+([A-Za-z_]\w*)\s*=\s*(?:{})\s*\(",
        *CONSTRUCTOR_ALTERNATION
    ))
    .expect("valid constructor pattern");
    static ref REGISTER_CALL: Regex =
        Regex::new(r"\b([A-Za-z_]\w*)\s*:\s*register\s*\(").expect("valid register pattern");
    static ref XML_REGISTRATION: Regex =
        Regex::new(r#"<[A-Za-z_][\w\-]*\s[^>]*\b(?:script|function)\s*="#).expect("valid xml pattern");
    static ref RETURN_STATEMENT: Regex =
        Regex::new(r"\breturn\b\s*([A-Za-z_0-9]*)(.?)").expect("valid return pattern");
    static ref CREDENTIAL: Regex = Regex::new(
        r#"(?i)\b(?:password|passwd|pwd|secret|api_?key|apikey|access_?token|auth_?token|token|private_?key|client_?secret)\b["']?\]?\s*==?\s*["'][^"']{3,}["']"#
    )
    .expect("valid credential pattern");
    static ref SECRET_LITERAL: Regex = Regex::new(
        r#"["'](?:sk-[A-Za-z0-9_\-]{20,}|AKIA[0-9A-Z]{16}|gh[pousr]_[A-Za-z0-9]{36}|xox[abprs]-[A-Za-z0-9\-]{10,}|[a-z][a-z0-9+.\-]*://[^/\s:"'@]+:[^@\s"']+@[^"'\s]+)["']"#
    )
    .expect("valid secret pattern");
    static ref SQL_STRING: Regex = Regex::new(
        r#"(?i)["'][^"']*\b(?:select\s.*\bfrom|insert\s+into|update\s+\S+\s+set|delete\s+from|replace\s+into)\b"#
    )
    .expect("valid sql pattern");
    static ref LEGACY_CALL: Regex = Regex::new(&format!(
        r"(?:^|[^.:\w])({})\s*\(",
        LEGACY_FUNCTIONS.join("|")
    ))
    .expect("valid legacy pattern");
    static ref DB_QUERY: Regex =
        Regex::new(r"\bdb\.(?:query|storeQuery|asyncQuery|asyncStoreQuery)\s*\(").expect("valid query pattern");
}

/// Everything a check may look at. Built once per scan.
pub struct ScanContext<'a> {
    pub content: &'a str,
    pub format: FormatKind,
    pub module_type: ModuleKind,
    pub tfs_version: Option<TfsVersion>,
    pub lines: Vec<SourceLine<'a>>,
    pub functions: Vec<FunctionSignature>,
}

impl<'a> ScanContext<'a> {
    pub fn new(content: &'a str, format: FormatKind, module_type: ModuleKind) -> Self {
        let lines = split_lines(content);
        let functions = FunctionExtractor::new()
            .extract_from_lines(&lines, format)
            .functions;

        Self::from_parts(content, format, module_type, lines, functions)
    }

    /// Reuses lines and functions the caller already extracted.
    pub fn from_parts(
        content: &'a str,
        format: FormatKind,
        module_type: ModuleKind,
        lines: Vec<SourceLine<'a>>,
        functions: Vec<FunctionSignature>,
    ) -> Self {
        Self {
            content,
            format,
            module_type,
            tfs_version: None,
            lines,
            functions,
        }
    }

    pub fn with_tfs_version(mut self, version: Option<TfsVersion>) -> Self {
        self.tfs_version = version;
        self
    }

    fn handlers(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.iter().filter(|f| f.is_handler())
    }
}

pub type CheckFn = fn(&ScanContext<'_>) -> Vec<Finding>;

pub struct Check {
    pub name: &'static str,
    pub run: CheckFn,
}

/// Independent checks, run in order. None of them assumes another ran.
pub const CHECKS: &[Check] = &[
    Check { name: "table_syntax", run: check_table_syntax },
    Check { name: "registration", run: check_registration },
    Check { name: "handler_returns", run: check_handler_returns },
    Check { name: "security_leakage", run: check_security_leakage },
    Check { name: "dialect_mix", run: check_dialect_mix },
    Check { name: "query_in_loop", run: check_query_in_loop },
    Check { name: "dialect_version", run: check_dialect_version },
];

pub struct ErrorScanner {
    tfs_version: Option<TfsVersion>,
}

impl ErrorScanner {
    pub fn new() -> Self {
        Self { tfs_version: None }
    }

    pub fn with_tfs_version(mut self, version: Option<TfsVersion>) -> Self {
        self.tfs_version = version;
        self
    }

    pub fn scan(&self, content: &str, format: FormatKind, module_type: ModuleKind) -> Vec<Finding> {
        self.run(ScanContext::new(content, format, module_type))
    }

    pub fn run(&self, context: ScanContext<'_>) -> Vec<Finding> {
        let context = context.with_tfs_version(self.tfs_version);

        CHECKS
            .iter()
            .flat_map(|check| {
                let findings = (check.run)(&context);
                trace!(check = check.name, findings = findings.len(), "check complete");
                findings
            })
            .collect()
    }
}

impl Default for ErrorScanner {
    fn default() -> Self {
        Self::new()
    }
}

pub fn scan(content: &str, format: FormatKind, module_type: ModuleKind) -> Vec<Finding> {
    ErrorScanner::new().scan(content, format, module_type)
}

/// `x = [1, 2]` style literals; Lua long strings (`[[`, `[=[`) are fine.
pub fn check_table_syntax(ctx: &ScanContext<'_>) -> Vec<Finding> {
    ctx.lines
        .iter()
        .filter(|line| LOOSE_BRACKET.is_match(&line.code))
        .map(|line| {
            rules::finding(
                FindingCode::BadTableSyntax,
                "`[` opens a value where a table constructor `{` is expected",
            )
            .at_line(line.number)
        })
        .collect()
}

pub fn check_registration(ctx: &ScanContext<'_>) -> Vec<Finding> {
    match ctx.format {
        FormatKind::RevScript => check_revscript_registration(ctx),
        FormatKind::Xml => check_xml_registration(ctx),
    }
}

fn check_revscript_registration(ctx: &ScanContext<'_>) -> Vec<Finding> {
    let registered: HashSet<&str> = ctx
        .lines
        .iter()
        .flat_map(|line| REGISTER_CALL.captures_iter(&line.code))
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let bindings: Vec<(&str, usize)> = ctx
        .lines
        .iter()
        .flat_map(|line| {
            CONSTRUCTOR_BINDING
                .captures_iter(&line.code)
                .filter_map(move |c| c.get(1).map(|m| (m.as_str(), line.number)))
        })
        .collect();

    if bindings.is_empty() {
        return match ctx.handlers().next() {
            Some(handler) if registered.is_empty() => vec![rules::finding(
                FindingCode::MissingRegistration,
                format!("Handler `{}` is defined but nothing calls `:register()`", handler.name),
            )
            .at_line(handler.line_number.unwrap_or(1))],
            _ => Vec::new(),
        };
    }

    bindings
        .into_iter()
        .filter(|(name, _)| !registered.contains(name))
        .map(|(name, line)| {
            rules::finding(
                FindingCode::MissingRegistration,
                format!("Event object `{}` is never registered with `{}:register()`", name, name),
            )
            .at_line(line)
        })
        .collect()
}

fn check_xml_registration(ctx: &ScanContext<'_>) -> Vec<Finding> {
    if XML_REGISTRATION.is_match(ctx.content) {
        return Vec::new();
    }

    match ctx.handlers().next() {
        Some(handler) => vec![rules::finding(
            FindingCode::MissingRegistration,
            format!(
                "Handler `{}` has no XML registration entry with a `script` or `function` attribute",
                handler.name
            ),
        )
        .at_line(handler.line_number.unwrap_or(1))],
        None => Vec::new(),
    }
}

struct OpenHandler<'f> {
    name: &'f str,
    line: usize,
    depth: usize,
    function_depth: usize,
    returns_value: bool,
}

pub fn check_handler_returns(ctx: &ScanContext<'_>) -> Vec<Finding> {
    if !ctx.module_type.expects_handler_return() {
        return Vec::new();
    }

    let handler_lines: HashMap<usize, &str> = ctx
        .handlers()
        .filter_map(|f| f.line_number.map(|line| (line, f.name.as_str())))
        .collect();

    let mut findings = Vec::new();
    let mut tracker = BlockTracker::new();
    let mut open: Option<OpenHandler<'_>> = None;

    for line in &ctx.lines {
        if open.is_none() {
            if let Some(&name) = handler_lines.get(&line.number) {
                open = Some(OpenHandler {
                    name,
                    line: line.number,
                    depth: tracker.depth(),
                    function_depth: tracker.function_depth(),
                    returns_value: false,
                });
            }
        }

        if let Some(handler) = open.as_mut() {
            if !handler.returns_value {
                handler.returns_value = returns_from(&tracker, &line.code, handler.function_depth + 1);
            }
        }

        tracker.feed(&line.code);

        let closed = open
            .as_ref()
            .map_or(false, |handler| tracker.depth() <= handler.depth);

        if closed {
            findings.extend(open.take().and_then(|h| missing_return(&h, ctx.module_type)));
        }
    }

    // Unterminated body: judge what was seen.
    findings.extend(open.take().and_then(|h| missing_return(&h, ctx.module_type)));

    findings
}

fn missing_return(handler: &OpenHandler<'_>, module_type: ModuleKind) -> Option<Finding> {
    if handler.returns_value {
        return None;
    }
    Some(
        rules::finding(
            FindingCode::MissingReturn,
            format!(
                "Handler `{}` of a {} script never returns a value",
                handler.name,
                module_type.as_str()
            ),
        )
        .at_line(handler.line),
    )
}

/// True when `code` holds a `return <value>` that belongs to the function
/// at `function_depth`. Returns inside nested closures do not count.
fn returns_from(tracker: &BlockTracker, code: &str, function_depth: usize) -> bool {
    value_returns(code).any(|at| {
        let mut prefix = tracker.clone();
        prefix.feed(&code[..at]);
        prefix.function_depth() == function_depth
    })
}

/// Byte offsets of `return` statements that carry a value.
fn value_returns(code: &str) -> impl Iterator<Item = usize> + '_ {
    RETURN_STATEMENT.captures_iter(code).filter_map(|c| {
        let word = c.get(1).map_or("", |m| m.as_str());
        let next = c.get(2).map_or("", |m| m.as_str());
        let has_value = match word {
            "" => !next.is_empty() && next != ";",
            "end" => false,
            _ => true,
        };
        if has_value {
            c.get(0).map(|m| m.start())
        } else {
            None
        }
    })
}

/// Reads raw lines: a secret in a comment or string is still a leak.
pub fn check_security_leakage(ctx: &ScanContext<'_>) -> Vec<Finding> {
    ctx.lines
        .iter()
        .filter_map(|line| {
            let raw = line.raw;
            let message = if CREDENTIAL.is_match(raw) {
                "Hard-coded credential literal"
            } else if SECRET_LITERAL.is_match(raw) {
                "Embedded secret or connection string"
            } else if SQL_STRING.is_match(raw) && raw.contains("..") && !raw.contains("escapeString") {
                "SQL statement built by string concatenation"
            } else {
                return None;
            };
            Some(rules::finding(FindingCode::SecurityLeakage, message).at_line(line.number))
        })
        .collect()
}

pub fn check_dialect_mix(ctx: &ScanContext<'_>) -> Vec<Finding> {
    if ctx.format != FormatKind::RevScript {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut findings = Vec::new();

    for line in &ctx.lines {
        for capture in LEGACY_CALL.captures_iter(&line.code) {
            let name = &capture[1];
            if seen.insert(name.to_string()) {
                findings.push(
                    rules::finding(
                        FindingCode::DialectMix,
                        format!("Legacy function `{}` used in a RevScript script", name),
                    )
                    .at_line(line.number),
                );
            }
        }
    }

    findings
}

pub fn check_query_in_loop(ctx: &ScanContext<'_>) -> Vec<Finding> {
    let mut tracker = BlockTracker::new();
    let mut findings = Vec::new();

    for line in &ctx.lines {
        let was_in_loop = tracker.in_loop();
        let effect = tracker.feed(&line.code);

        if (was_in_loop || effect.opened_loop) && DB_QUERY.is_match(&line.code) {
            findings.push(
                rules::finding(FindingCode::QueryInLoop, "Database query executed inside a loop")
                    .at_line(line.number),
            );
        }
    }

    findings
}

pub fn check_dialect_version(ctx: &ScanContext<'_>) -> Vec<Finding> {
    match ctx.tfs_version {
        Some(version) if ctx.format == FormatKind::RevScript && !version.supports_revscript() => {
            vec![rules::finding(
                FindingCode::UnsupportedDialect,
                format!(
                    "RevScriptSys syntax requires TFS {} or newer, but the target is TFS {}",
                    TfsVersion::REVSCRIPT_MIN,
                    version
                ),
            )]
        }
        _ => Vec::new(),
    }
}
