use crate::analyzer::scanner::{ErrorScanner, ScanContext};
use crate::analyzer::scoring::ScoreSynthesizer;
use crate::error::AnalyzerError;
use crate::models::{AnalysisInput, AnalysisResult, FormatKind, ModuleKind, TfsVersion};
use crate::parser::{split_lines, FormatDetector, FunctionExtractor, ModuleTypeDetector};
use tracing::{debug, info};

/// Runs the full pipeline over one script. Holds no state between calls,
/// so the same input always yields the same result.
pub struct ScriptAnalyzer {
    format_detector: FormatDetector,
    module_detector: ModuleTypeDetector,
    extractor: FunctionExtractor,
    synthesizer: ScoreSynthesizer,
}

impl ScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            format_detector: FormatDetector::new(),
            module_detector: ModuleTypeDetector::new(),
            extractor: FunctionExtractor::new(),
            synthesizer: ScoreSynthesizer::new(),
        }
    }

    pub fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalyzerError> {
        input.validate()?;

        let content = input.content.as_str();
        info!(
            bytes = input.size_bytes(),
            lines = input.line_count(),
            "analyzing script"
        );

        let format = self.format_detector.detect_format(content);
        let module_type = self.resolve_module_type(content, format, input);
        let tfs_version = self.resolve_tfs_version(input);

        let lines = split_lines(content);
        let extraction = self.extractor.extract_from_lines(&lines, format);
        let context = ScanContext::from_parts(
            content,
            format,
            module_type,
            lines,
            extraction.functions.clone(),
        );

        let mut findings = extraction.findings;
        findings.extend(ErrorScanner::new().with_tfs_version(tfs_version).run(context));

        let scores = self.synthesizer.score(&findings);
        let recommendations = self.synthesizer.recommend(&findings);

        info!(
            format = format.as_str(),
            module_type = module_type.as_str(),
            functions = extraction.functions.len(),
            findings = findings.len(),
            overall = scores.overall,
            "analysis complete"
        );

        Ok(AnalysisResult {
            format,
            module_type,
            functions: extraction.functions,
            findings,
            recommendations,
            scores,
        })
    }

    /// Content wins; the caller's hint only fills in an undetected type.
    fn resolve_module_type(
        &self,
        content: &str,
        format: FormatKind,
        input: &AnalysisInput,
    ) -> ModuleKind {
        let detected = self.module_detector.detect_module_type(content, format);
        if detected != ModuleKind::Unknown {
            return detected;
        }

        match input.module_type_hint.as_deref() {
            Some(hint) => match ModuleKind::from_hint(hint) {
                Some(kind) => {
                    debug!(hint, module_type = kind.as_str(), "module type taken from hint");
                    kind
                }
                None => {
                    debug!(hint, "ignoring unrecognized module type hint");
                    ModuleKind::Unknown
                }
            },
            None => ModuleKind::Unknown,
        }
    }

    fn resolve_tfs_version(&self, input: &AnalysisInput) -> Option<TfsVersion> {
        let hint = input.tfs_version_hint.as_deref()?;
        let version = TfsVersion::parse(hint);
        if version.is_none() {
            debug!(hint, "ignoring unparsable TFS version hint");
        }
        version
    }
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point over raw content and optional hints.
pub fn analyze(
    content: &str,
    tfs_version_hint: Option<&str>,
    module_type_hint: Option<&str>,
) -> Result<AnalysisResult, AnalyzerError> {
    let mut input = AnalysisInput::new(content);
    input.tfs_version_hint = tfs_version_hint.map(str::to_string);
    input.module_type_hint = module_type_hint.map(str::to_string);
    ScriptAnalyzer::new().analyze(&input)
}
