use crate::analyzer::rules;
use crate::models::{Finding, FindingCode, FormatKind, FunctionSignature};
use crate::parser::source::{split_lines, SourceLine};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

lazy_static! {
    /// A line that starts a named function definition.
    static ref HEADER_START: Regex =
        Regex::new(r"^\s*(?:local\s+)?function\s+[A-Za-z_]").expect("valid header pattern");
    /// A complete `function path(params)` header on a single line.
    static ref HEADER: Regex = Regex::new(
        r"^\s*(local\s+)?function\s+([A-Za-z_]\w*(?:[.:][A-Za-z_]\w*)*)\s*\(([^)]*)\)"
    )
    .expect("valid header pattern");
}

/// Functions found in a script, plus any headers that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub functions: Vec<FunctionSignature>,
    pub findings: Vec<Finding>,
}

pub struct FunctionExtractor;

impl FunctionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// RevScript scripts define handlers as `function table.handler(...)`;
    /// legacy scripts define free `function name(...)` callbacks.
    pub fn extract(&self, content: &str, format: FormatKind) -> Extraction {
        let lines = split_lines(content);
        self.extract_from_lines(&lines, format)
    }

    pub fn extract_from_lines(&self, lines: &[SourceLine<'_>], format: FormatKind) -> Extraction {
        let mut extraction = Extraction::default();

        for line in lines {
            if !HEADER_START.is_match(&line.code) {
                continue;
            }

            let Some(captures) = HEADER.captures(&line.code) else {
                trace!(line = line.number, "unterminated function header");
                extraction.findings.push(
                    rules::finding(
                        FindingCode::MalformedSignature,
                        format!(
                            "Function header could not be parsed: `{}`",
                            line.raw.trim()
                        ),
                    )
                    .at_line(line.number),
                );
                continue;
            };

            let is_local = captures.get(1).is_some();
            let path = &captures[2];
            let name = match format {
                FormatKind::RevScript => match path.rsplit_once(['.', ':']) {
                    Some((_, handler)) => handler,
                    None => continue,
                },
                FormatKind::Xml => {
                    if path.contains(['.', ':']) {
                        continue;
                    }
                    path
                }
            };
            if is_local && format == FormatKind::RevScript {
                continue;
            }

            extraction.functions.push(
                FunctionSignature::new(name, split_parameters(&captures[3])).at_line(line.number),
            );
        }

        debug!(
            functions = extraction.functions.len(),
            malformed = extraction.findings.len(),
            "function extraction complete"
        );
        extraction
    }
}

impl Default for FunctionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn extract_functions(content: &str, format: FormatKind) -> Vec<FunctionSignature> {
    FunctionExtractor::new().extract(content, format).functions
}

fn split_parameters(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
