use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};

/// Raw script text handed to the analyzer, plus optional caller hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub content: String,
    pub tfs_version_hint: Option<String>,
    pub module_type_hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// Legacy scripts: free callback functions registered from an XML file.
    Xml,
    /// RevScriptSys: object constructors with explicit `:register()`.
    RevScript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Action,
    Movement,
    CreatureEvent,
    TalkAction,
    GlobalEvent,
    Spell,
    Weapon,
    Unknown,
}

/// Server version parsed from a hint such as `"1.4.2"` or `"tfs-1.3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TfsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl TfsVersion {
    /// RevScriptSys shipped with TFS 1.3.
    pub const REVSCRIPT_MIN: TfsVersion = TfsVersion {
        major: 1,
        minor: 3,
        patch: 0,
    };

    pub fn parse(hint: &str) -> Option<Self> {
        let start = hint.find(|c: char| c.is_ascii_digit())?;
        let version = hint[start..]
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .next()?;

        let mut numbers = version
            .split('.')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u32>());

        let major = numbers.next()?.ok()?;
        let minor = numbers.next().and_then(Result::ok).unwrap_or(0);
        let patch = numbers.next().and_then(Result::ok).unwrap_or(0);

        Some(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn supports_revscript(&self) -> bool {
        *self >= Self::REVSCRIPT_MIN
    }
}

impl std::fmt::Display for TfsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl AnalysisInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tfs_version_hint: None,
            module_type_hint: None,
        }
    }

    /// Decodes raw bytes, rejecting anything that is not UTF-8 text.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnalyzerError> {
        let content = std::str::from_utf8(bytes).map_err(|_| AnalyzerError::NotText)?;
        Ok(Self::new(content))
    }

    pub fn with_tfs_version(mut self, version: impl Into<String>) -> Self {
        self.tfs_version_hint = Some(version.into());
        self
    }

    pub fn with_module_type(mut self, module_type: impl Into<String>) -> Self {
        self.module_type_hint = Some(module_type.into());
        self
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.content.is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        Ok(())
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Xml => "xml",
            FormatKind::RevScript => "revscript",
        }
    }
}

impl ModuleKind {
    pub const KNOWN: [ModuleKind; 7] = [
        ModuleKind::Action,
        ModuleKind::Movement,
        ModuleKind::CreatureEvent,
        ModuleKind::TalkAction,
        ModuleKind::GlobalEvent,
        ModuleKind::Spell,
        ModuleKind::Weapon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Action => "action",
            ModuleKind::Movement => "movement",
            ModuleKind::CreatureEvent => "creatureevent",
            ModuleKind::TalkAction => "talkaction",
            ModuleKind::GlobalEvent => "globalevent",
            ModuleKind::Spell => "spell",
            ModuleKind::Weapon => "weapon",
            ModuleKind::Unknown => "unknown",
        }
    }

    /// RevScriptSys constructor that creates a script of this kind.
    pub fn constructor(&self) -> Option<&'static str> {
        match self {
            ModuleKind::Action => Some("Action"),
            ModuleKind::Movement => Some("MoveEvent"),
            ModuleKind::CreatureEvent => Some("CreatureEvent"),
            ModuleKind::TalkAction => Some("TalkAction"),
            ModuleKind::GlobalEvent => Some("GlobalEvent"),
            ModuleKind::Spell => Some("Spell"),
            ModuleKind::Weapon => Some("Weapon"),
            ModuleKind::Unknown => None,
        }
    }

    /// Parses a caller-supplied hint such as `"talkaction"` or `"movements"`.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let normalized: String = hint
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "action" | "actions" => Some(ModuleKind::Action),
            "movement" | "movements" | "moveevent" | "movevent" => Some(ModuleKind::Movement),
            "creatureevent" | "creatureevents" | "creaturescript" | "creaturescripts" => {
                Some(ModuleKind::CreatureEvent)
            }
            "talkaction" | "talkactions" => Some(ModuleKind::TalkAction),
            "globalevent" | "globalevents" => Some(ModuleKind::GlobalEvent),
            "spell" | "spells" => Some(ModuleKind::Spell),
            "weapon" | "weapons" => Some(ModuleKind::Weapon),
            _ => None,
        }
    }

    /// Every known event system expects its callbacks to return a value
    /// (usually a boolean) telling the server whether the event succeeded.
    pub fn expects_handler_return(&self) -> bool {
        !matches!(self, ModuleKind::Unknown)
    }
}
