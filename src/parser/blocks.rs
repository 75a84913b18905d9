use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref KEYWORD: Regex =
        Regex::new(r"\b(function|if|for|while|do|repeat|end|until)\b").expect("valid keyword pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Function,
    Loop,
    Conditional,
    Plain,
}

/// What a single line did to the block structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineEffect {
    pub opened_loop: bool,
    pub opened_function: bool,
}

/// Tracks Lua block nesting (`function ... end`, `for ... do ... end`,
/// `repeat ... until`) over masked code lines.
#[derive(Debug, Clone, Default)]
pub struct BlockTracker {
    stack: Vec<BlockKind>,
    pending_do: bool,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, code: &str) -> LineEffect {
        let mut effect = LineEffect::default();

        for capture in KEYWORD.captures_iter(code) {
            // `t.end` / `obj:repeat` are field names, not keywords.
            let start = capture.get(0).map_or(0, |m| m.start());
            if start > 0 && matches!(code.as_bytes()[start - 1], b'.' | b':') {
                continue;
            }

            match &capture[1] {
                "function" => {
                    self.stack.push(BlockKind::Function);
                    effect.opened_function = true;
                }
                "if" => self.stack.push(BlockKind::Conditional),
                "for" | "while" => {
                    self.stack.push(BlockKind::Loop);
                    self.pending_do = true;
                    effect.opened_loop = true;
                }
                "repeat" => {
                    self.stack.push(BlockKind::Loop);
                    effect.opened_loop = true;
                }
                "do" => {
                    if self.pending_do {
                        self.pending_do = false;
                    } else {
                        self.stack.push(BlockKind::Plain);
                    }
                }
                "end" | "until" => {
                    self.stack.pop();
                }
                _ => {}
            }
        }

        effect
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of enclosing `function` blocks.
    pub fn function_depth(&self) -> usize {
        self.stack
            .iter()
            .filter(|kind| **kind == BlockKind::Function)
            .count()
    }

    pub fn in_loop(&self) -> bool {
        self.stack.contains(&BlockKind::Loop)
    }
}
