use crate::models::{FormatKind, ModuleKind};
use crate::parser::source::split_lines;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Any pattern in the row is enough.
    Any,
    /// Every pattern in the row must be present.
    All,
}

/// Declarative description of a detection row.
struct RuleSpec {
    kind: ModuleKind,
    mode: MatchMode,
    xml_only: bool,
    patterns: &'static [&'static str],
}

/// Rows are evaluated top to bottom. New module kinds are added by
/// appending rows here.
const MODULE_RULES: &[RuleSpec] = &[
    RuleSpec {
        kind: ModuleKind::Movement,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[
            r"\bonStepIn\b",
            r"\bonStepOut\b",
            r"\bonEquip\b",
            r"\bonDeEquip\b",
            r"\bonAddItem\b",
            r"\bonRemoveItem\b",
            r"\bMoveEvent\s*\(",
        ],
    },
    RuleSpec {
        kind: ModuleKind::Movement,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<movevent\b"],
    },
    RuleSpec {
        kind: ModuleKind::Spell,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[r"\bonCastSpell\b", r"\bSpell\s*\("],
    },
    RuleSpec {
        kind: ModuleKind::Spell,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<instant\b", r"<rune\b", r"<conjure\b"],
    },
    RuleSpec {
        kind: ModuleKind::TalkAction,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[r"\bonSay\b", r"\bTalkAction\s*\("],
    },
    RuleSpec {
        kind: ModuleKind::TalkAction,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<talkaction\b"],
    },
    RuleSpec {
        kind: ModuleKind::CreatureEvent,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[
            r"\bonLogin\b",
            r"\bonLogout\b",
            r"\bonDeath\b",
            r"\bonPrepareDeath\b",
            r"\bonKill\b",
            r"\bonAdvance\b",
            r"\bonHealthChange\b",
            r"\bonManaChange\b",
            r"\bonModalWindow\b",
            r"\bonTextEdit\b",
            r"\bCreatureEvent\s*\(",
        ],
    },
    RuleSpec {
        kind: ModuleKind::CreatureEvent,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<event\b"],
    },
    RuleSpec {
        kind: ModuleKind::GlobalEvent,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[
            r"\bGlobalEvent\s*\(",
            r"\bonStartup\b",
            r"\bonShutdown\b",
            r"\bonRecord\b",
            r"\bonTime\b",
        ],
    },
    RuleSpec {
        kind: ModuleKind::GlobalEvent,
        mode: MatchMode::All,
        xml_only: false,
        patterns: &[r"\bonThink\b", r#"(?::interval\s*\(|\binterval\s*=)"#],
    },
    RuleSpec {
        kind: ModuleKind::GlobalEvent,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<globalevent\b"],
    },
    // A think callback without an interval belongs to a creature.
    RuleSpec {
        kind: ModuleKind::CreatureEvent,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[r"\bonThink\b"],
    },
    RuleSpec {
        kind: ModuleKind::Weapon,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[r"\bonUseWeapon\b", r"\bWeapon\s*\("],
    },
    RuleSpec {
        kind: ModuleKind::Weapon,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<melee\b", r"<distance\b", r"<wand\b"],
    },
    RuleSpec {
        kind: ModuleKind::Action,
        mode: MatchMode::Any,
        xml_only: false,
        patterns: &[r"\bonUse\b", r"\bAction\s*\("],
    },
    RuleSpec {
        kind: ModuleKind::Action,
        mode: MatchMode::Any,
        xml_only: true,
        patterns: &[r"<action\b"],
    },
];

pub struct ModuleRule {
    pub kind: ModuleKind,
    pub mode: MatchMode,
    pub xml_only: bool,
    patterns: Vec<Regex>,
}

lazy_static! {
    static ref COMPILED_RULES: Vec<ModuleRule> = MODULE_RULES
        .iter()
        .map(|spec| ModuleRule {
            kind: spec.kind,
            mode: spec.mode,
            xml_only: spec.xml_only,
            patterns: spec
                .patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid module pattern"))
                .collect(),
        })
        .collect();
}

impl ModuleRule {
    pub fn applies_to(&self, format: FormatKind) -> bool {
        !self.xml_only || format == FormatKind::Xml
    }

    pub fn matches(&self, content: &str) -> bool {
        match self.mode {
            MatchMode::Any => self.patterns.iter().any(|p| p.is_match(content)),
            MatchMode::All => self.patterns.iter().all(|p| p.is_match(content)),
        }
    }
}

pub struct ModuleTypeDetector;

impl ModuleTypeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Lua rows read masked code so commented-out handlers do not count.
    /// XML rows read the raw text, where `<!--` would look like a comment.
    pub fn detect_module_type(&self, content: &str, format: FormatKind) -> ModuleKind {
        let code = split_lines(content)
            .into_iter()
            .map(|line| line.code)
            .collect::<Vec<_>>()
            .join("\n");

        let kind = COMPILED_RULES
            .iter()
            .filter(|rule| rule.applies_to(format))
            .find(|rule| {
                let text = if rule.xml_only { content } else { code.as_str() };
                rule.matches(text)
            })
            .map_or(ModuleKind::Unknown, |rule| rule.kind);

        debug!(module_type = kind.as_str(), format = format.as_str(), "module type detected");
        kind
    }
}

impl Default for ModuleTypeDetector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn detect_module_type(content: &str, format: FormatKind) -> ModuleKind {
    ModuleTypeDetector::new().detect_module_type(content, format)
}
