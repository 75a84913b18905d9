use tfs_analyzer::models::{FormatKind, ModuleKind};
use tfs_analyzer::parser::{detect_format, detect_module_type};

#[test]
fn paired_xml_tag_is_xml() {
    assert_eq!(detect_format("<talkactions>\n</talkactions>"), FormatKind::Xml);
    assert_eq!(
        detect_format("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<actions/>"),
        FormatKind::Xml
    );
}

#[test]
fn constructor_with_register_is_revscript() {
    let content = "local x = Action()\nx:id(1945)\nx:register()";
    let format = detect_format(content);

    assert_eq!(format, FormatKind::RevScript);
    assert_eq!(detect_module_type(content, format), ModuleKind::Action);
}

#[test]
fn plain_callbacks_default_to_xml() {
    let content = "function onSay(cid, words, param)\n  return true\nend";
    let format = detect_format(content);

    assert_eq!(format, FormatKind::Xml);
    assert_eq!(detect_module_type(content, format), ModuleKind::TalkAction);
}

#[test]
fn every_constructor_maps_to_its_module() {
    for kind in ModuleKind::KNOWN {
        let ctor = kind.constructor().unwrap();
        let content = format!("local ev = {}()\nev:register()", ctor);
        let format = detect_format(&content);

        assert_eq!(format, FormatKind::RevScript, "{}", ctor);
        assert_eq!(detect_module_type(&content, format), kind, "{}", ctor);
    }
}

#[test]
fn xml_registration_files() {
    let cases = [
        ("<movements><movevent event=\"StepIn\" actionid=\"100\" script=\"tile.lua\"/></movements>", ModuleKind::Movement),
        ("<talkactions><talkaction words=\"!bless\" script=\"bless.lua\"/></talkactions>", ModuleKind::TalkAction),
        ("<globalevents><globalevent name=\"save\" interval=\"900000\" script=\"save.lua\"/></globalevents>", ModuleKind::GlobalEvent),
        ("<creaturescripts><event type=\"login\" name=\"Login\" script=\"login.lua\"/></creaturescripts>", ModuleKind::CreatureEvent),
    ];

    for (content, expected) in cases {
        assert_eq!(detect_format(content), FormatKind::Xml, "{}", content);
        assert_eq!(detect_module_type(content, FormatKind::Xml), expected, "{}", content);
    }
}

#[test]
fn think_callback_needs_an_interval_to_be_global() {
    let global = "local e = GlobalEvent(\"clean\")\nfunction e.onThink(interval)\n  return true\nend\ne:interval(60000)\ne:register()";
    assert_eq!(detect_module_type(global, FormatKind::RevScript), ModuleKind::GlobalEvent);

    let creature = "function onThink(cid)\n  return true\nend";
    assert_eq!(detect_module_type(creature, FormatKind::Xml), ModuleKind::CreatureEvent);
}

#[test]
fn unrecognized_content_is_unknown() {
    assert_eq!(detect_module_type("print('hello')", FormatKind::Xml), ModuleKind::Unknown);
    assert_eq!(detect_module_type("   \n", FormatKind::Xml), ModuleKind::Unknown);
}
