//! Script channel spoken between the native side and the editing surface.
//!
//! Outbound calls are rendered as script source (`setMarkdown(`...`)`,
//! `toggleBold()`, ...) and evaluated by the surface. Text travels inside a
//! template literal, so the characters that literal treats specially are
//! escaped on the way out and restored on evaluation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCall {
    SetMarkdown(String),
    ToggleBold,
    ToggleItalic,
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown script call: {0}")]
    UnknownCall(String),
    #[error("unterminated template literal")]
    UnterminatedLiteral,
    #[error("invalid escape sequence: \\{0}")]
    InvalidEscape(char),
}

/// Signals the surface sends back to the native side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSignal {
    Ready,
    ContentChanged(String),
}

impl ScriptCall {
    pub fn to_script(&self) -> String {
        match self {
            Self::SetMarkdown(text) => format!("setMarkdown(`{}`)", escape_literal(text)),
            Self::ToggleBold => "toggleBold()".to_string(),
            Self::ToggleItalic => "toggleItalic()".to_string(),
            Self::Undo => "undo()".to_string(),
            Self::Redo => "redo()".to_string(),
        }
    }

    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let script = script.trim();
        match script {
            "toggleBold()" => return Ok(Self::ToggleBold),
            "toggleItalic()" => return Ok(Self::ToggleItalic),
            "undo()" => return Ok(Self::Undo),
            "redo()" => return Ok(Self::Redo),
            _ => {}
        }

        let literal = script
            .strip_prefix("setMarkdown(`")
            .ok_or_else(|| ScriptError::UnknownCall(script.to_string()))?
            .strip_suffix("`)")
            .ok_or(ScriptError::UnterminatedLiteral)?;

        Ok(Self::SetMarkdown(unescape_literal(literal)?))
    }
}

pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

pub fn unescape_literal(literal: &str) -> Result<String, ScriptError> {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\\') => out.push('\\'),
                Some('`') => out.push('`'),
                Some('$') => out.push('$'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => return Err(ScriptError::InvalidEscape(other)),
                None => return Err(ScriptError::UnterminatedLiteral),
            },
            // An unescaped backtick would have closed the literal early.
            '`' => return Err(ScriptError::UnterminatedLiteral),
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape_literal("a\\b`c$d\ne\rf"),
            "a\\\\b\\`c\\$d\\ne\\rf"
        );
        assert_eq!(escape_literal("plain *text*"), "plain *text*");
    }

    #[test]
    fn test_set_markdown_survives_channel() {
        let text = "# Title\n\nCost: $5 `code` \\path\r\n${injection}`)";
        let script = ScriptCall::SetMarkdown(text.to_string()).to_script();
        assert!(!script.contains('\n'));
        assert_eq!(
            ScriptCall::parse(&script).unwrap(),
            ScriptCall::SetMarkdown(text.to_string())
        );
    }

    #[test]
    fn test_parse_simple_calls() {
        assert_eq!(ScriptCall::parse("toggleBold()").unwrap(), ScriptCall::ToggleBold);
        assert_eq!(ScriptCall::parse(" undo() ").unwrap(), ScriptCall::Undo);
    }

    #[test]
    fn test_parse_rejects_broken_scripts() {
        assert!(matches!(
            ScriptCall::parse("alert(1)"),
            Err(ScriptError::UnknownCall(_))
        ));
        assert_eq!(
            ScriptCall::parse("setMarkdown(`a`b`)"),
            Err(ScriptError::UnterminatedLiteral)
        );
        assert_eq!(
            ScriptCall::parse("setMarkdown(`\\q`)"),
            Err(ScriptError::InvalidEscape('q'))
        );
    }
}
