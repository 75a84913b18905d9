use tfs_analyzer::models::{AnalysisInput, FindingCode, FormatKind, ModuleKind, Severity};
use tfs_analyzer::{analyze, ScriptAnalyzer};

const MOVEMENT: &str = "local movement = MoveEvent()\nfunction movement.onStepIn(creature, item, position, fromPosition)\n  return true\nend\nmovement:register()";

const ACTIONS_XML: &str = "<actions><action itemid=\"2050\" script=\"potion.lua\"/></actions>";

const LEGACY_TALKACTION: &str = r#"local config = {
    cost = 10000,
    storage = 50010
}

function onSay(cid, words, param)
    if not doPlayerRemoveMoney(cid, config.cost) then
        doPlayerSendCancel(cid, "You do not have enough money.")
        return false
    end
    setPlayerStorageValue(cid, config.storage, 1)
    return false
end
"#;

const BROKEN_REVSCRIPT: &str = r#"local rewards = [2160, 2152, 2148]

local chest = Action()

function chest.onUse(player, item, fromPosition, target, toPosition, isHotkey)
    for _, id in ipairs(rewards) do
        db.query("INSERT INTO rewards (player_id, item) VALUES (" .. player:getGuid() .. ", " .. id .. ")")
    end
    doPlayerSendTextMessage(player, MESSAGE_INFO_DESCR, "You found a reward.")
end

chest:aid(4500)
"#;

#[test]
fn movement_scenario() {
    let result = analyze(MOVEMENT, None, None).unwrap();

    assert_eq!(result.format, FormatKind::RevScript);
    assert_eq!(result.module_type, ModuleKind::Movement);
    assert_eq!(result.functions.len(), 1);
    assert_eq!(result.functions[0].name, "onStepIn");
    assert_eq!(result.functions[0].parameters.len(), 4);
    assert_eq!(result.count_by_severity(Severity::Error), 0);
    assert_eq!(result.scores.overall, 100);
}

#[test]
fn xml_actions_scenario() {
    let result = analyze(ACTIONS_XML, None, None).unwrap();

    assert_eq!(result.format, FormatKind::Xml);
    assert_eq!(result.module_type, ModuleKind::Action);
    assert!(result.functions.is_empty());
    assert!(result.findings_with_code(FindingCode::MissingRegistration).is_empty());
}

#[test]
fn legacy_talkaction_without_xml_entry_is_unregistered() {
    let result = analyze(LEGACY_TALKACTION, None, None).unwrap();

    assert_eq!(result.format, FormatKind::Xml);
    assert_eq!(result.module_type, ModuleKind::TalkAction);
    assert_eq!(result.functions.len(), 1);

    let codes: Vec<_> = result.findings.iter().map(|f| f.code).collect();
    assert_eq!(codes, vec![FindingCode::MissingRegistration]);
    assert_eq!(result.findings[0].severity, Severity::Warning);
    assert_eq!(result.findings[0].line_number, Some(6));
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.scores.quality, 92);
}

#[test]
fn legacy_action_gets_registration_warning() {
    let result = analyze("function onUse(cid, item)\n  return true\nend", None, None).unwrap();

    assert_eq!(result.format, FormatKind::Xml);
    let findings = result.findings_with_code(FindingCode::MissingRegistration);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert_eq!(result.scores.quality, 92);
    assert_eq!(result.recommendations.len(), 1);
}

#[test]
fn handler_returning_only_from_callback_is_flagged() {
    let content = "local a = Action()\nfunction a.onUse(player, item)\n  addEvent(function() return true end, 100)\nend\na:register()";
    let result = analyze(content, None, None).unwrap();

    let codes: Vec<_> = result.findings.iter().map(|f| f.code).collect();
    assert_eq!(codes, vec![FindingCode::MissingReturn]);
    assert_eq!(result.findings[0].line_number, Some(2));
}

#[test]
fn broken_revscript_collects_every_problem() {
    let result = analyze(BROKEN_REVSCRIPT, None, None).unwrap();

    assert_eq!(result.format, FormatKind::RevScript);
    assert_eq!(result.module_type, ModuleKind::Action);

    for code in [
        FindingCode::BadTableSyntax,
        FindingCode::MissingRegistration,
        FindingCode::MissingReturn,
        FindingCode::SecurityLeakage,
        FindingCode::DialectMix,
        FindingCode::QueryInLoop,
    ] {
        assert_eq!(result.findings_with_code(code).len(), 1, "{}", code);
    }

    assert_eq!(result.findings_with_code(FindingCode::BadTableSyntax)[0].line_number, Some(1));
    assert_eq!(result.findings_with_code(FindingCode::QueryInLoop)[0].line_number, Some(7));
    assert!(result.has_errors());
    assert!(result.scores.overall < 100);
    assert_eq!(result.scores.performance, 92);
    assert_eq!(result.recommendations.len(), result.findings.len());
}

#[test]
fn whitespace_only_scenario() {
    let result = analyze("\n   \n", None, None).unwrap();

    assert_eq!(result.module_type, ModuleKind::Unknown);
    assert!(result.functions.is_empty());
    assert!(result.findings.is_empty());
    assert_eq!(result.scores.overall, 100);
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = ScriptAnalyzer::new();
    let input = AnalysisInput::new(BROKEN_REVSCRIPT).with_tfs_version("1.4");

    let first = analyzer.analyze(&input).unwrap();
    let second = analyzer.analyze(&input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn revscript_on_old_server_is_flagged() {
    let input = AnalysisInput::new(MOVEMENT).with_tfs_version("1.2");
    let result = ScriptAnalyzer::new().analyze(&input).unwrap();

    let findings = result.findings_with_code(FindingCode::UnsupportedDialect);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
}

#[test]
fn module_hint_applies_to_undetected_scripts() {
    let content = "function onCustom(cid)\nend";

    let result = analyze(content, None, Some("weapon")).unwrap();
    assert_eq!(result.module_type, ModuleKind::Weapon);
    assert_eq!(result.findings_with_code(FindingCode::MissingReturn).len(), 1);

    let result = analyze(content, None, None).unwrap();
    assert_eq!(result.module_type, ModuleKind::Unknown);
    assert!(result.findings_with_code(FindingCode::MissingReturn).is_empty());
}
