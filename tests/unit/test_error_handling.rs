use tfs_analyzer::error::AnalyzerError;
use tfs_analyzer::models::{AnalysisInput, FindingCode, ModuleKind};
use tfs_analyzer::{analyze, ScriptAnalyzer};

#[test]
fn empty_input_is_an_input_error() {
    let err = analyze("", None, None).unwrap_err();

    assert!(matches!(err, AnalyzerError::EmptyInput));
    assert!(err.is_input_error());
}

#[test]
fn whitespace_input_is_not_an_error() {
    let result = analyze(" \n\t\n", None, None).unwrap();

    assert_eq!(result.module_type, ModuleKind::Unknown);
    assert!(result.functions.is_empty());
    assert!(result.findings.is_empty());
    assert_eq!(result.scores.overall, 100);
}

#[test]
fn non_text_bytes_are_rejected() {
    let err = AnalysisInput::from_bytes(&[0x00, 0x9f, 0x92, 0x96]).unwrap_err();

    assert!(matches!(err, AnalyzerError::NotText));
    assert!(err.is_input_error());
}

#[test]
fn io_errors_are_not_input_errors() {
    let err: AnalyzerError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(!err.is_input_error());
    assert!(err.to_string().contains("missing"));
}

#[test]
fn exit_codes_by_error_kind() {
    assert_eq!(AnalyzerError::EmptyInput.exit_code(), 3);
    assert_eq!(AnalyzerError::NotText.exit_code(), 3);
    assert_eq!(AnalyzerError::InvalidArguments("bad".into()).exit_code(), 2);

    let io: AnalyzerError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert_eq!(io.exit_code(), 4);
}

#[test]
fn broken_content_yields_findings_not_errors() {
    let content = "function a.onUse(player\nlocal t = [1, 2\nend end end";
    let result = ScriptAnalyzer::new()
        .analyze(&AnalysisInput::new(content))
        .unwrap();

    assert!(!result.findings_with_code(FindingCode::MalformedSignature).is_empty());
    assert!(!result.findings_with_code(FindingCode::BadTableSyntax).is_empty());
}
