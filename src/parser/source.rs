//! Line-oriented view of a Lua script with comments and string contents
//! masked out, so structural scans do not trip over text that is not code.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub raw: &'a str,
    /// `raw` with comments blanked and string contents replaced by spaces.
    /// Quote characters and long-bracket delimiters are kept.
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    ShortString(char),
    LongString(usize),
    BlockComment(usize),
}

pub fn split_lines(content: &str) -> Vec<SourceLine<'_>> {
    let mut state = LexState::Code;

    content
        .lines()
        .enumerate()
        .map(|(index, raw)| SourceLine {
            number: index + 1,
            raw,
            code: mask_line(raw, &mut state),
        })
        .collect()
}

fn mask_line(raw: &str, state: &mut LexState) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match *state {
            LexState::Code => {
                let c = chars[i];
                if c == '-' && chars.get(i + 1) == Some(&'-') {
                    if let Some(level) = long_bracket_level(&chars, i + 2) {
                        *state = LexState::BlockComment(level);
                        let consumed = 2 + level + 2;
                        push_spaces(&mut out, consumed);
                        i += consumed;
                    } else {
                        push_spaces(&mut out, chars.len() - i);
                        i = chars.len();
                    }
                } else if c == '"' || c == '\'' {
                    out.push(c);
                    *state = LexState::ShortString(c);
                    i += 1;
                } else if let Some(level) = long_bracket_level(&chars, i) {
                    let consumed = level + 2;
                    out.extend(&chars[i..i + consumed]);
                    *state = LexState::LongString(level);
                    i += consumed;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
            LexState::ShortString(quote) => {
                let c = chars[i];
                if c == '\\' {
                    let skipped = if i + 1 < chars.len() { 2 } else { 1 };
                    push_spaces(&mut out, skipped);
                    i += skipped;
                } else if c == quote {
                    out.push(c);
                    *state = LexState::Code;
                    i += 1;
                } else {
                    out.push(' ');
                    i += 1;
                }
            }
            LexState::LongString(level) => {
                if closes_long_bracket(&chars, i, level) {
                    out.extend(&chars[i..i + level + 2]);
                    *state = LexState::Code;
                    i += level + 2;
                } else {
                    out.push(' ');
                    i += 1;
                }
            }
            LexState::BlockComment(level) => {
                if closes_long_bracket(&chars, i, level) {
                    push_spaces(&mut out, level + 2);
                    *state = LexState::Code;
                    i += level + 2;
                } else {
                    out.push(' ');
                    i += 1;
                }
            }
        }
    }

    // Short strings cannot span lines.
    if matches!(state, LexState::ShortString(_)) {
        *state = LexState::Code;
    }

    out
}

/// `[[`, `[=[`, `[==[` ... starting at `start`; returns the `=` count.
fn long_bracket_level(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&'[') {
        return None;
    }
    let mut j = start + 1;
    while chars.get(j) == Some(&'=') {
        j += 1;
    }
    if chars.get(j) == Some(&'[') {
        Some(j - start - 1)
    } else {
        None
    }
}

fn closes_long_bracket(chars: &[char], start: usize, level: usize) -> bool {
    if chars.get(start) != Some(&']') {
        return false;
    }
    let equals_end = start + 1 + level;
    chars[start + 1..].len() > level
        && chars[start + 1..equals_end].iter().all(|&c| c == '=')
        && chars.get(equals_end) == Some(&']')
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}
