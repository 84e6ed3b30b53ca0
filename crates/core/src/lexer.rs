//! Markup lexer.
//!
//! Splits template markup into literal text and `{{...}}` tags. Tags that are
//! not part of the placeholder syntax are kept as literal text, so lexing
//! never fails.

use crate::contract::FieldKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text, including any unrecognized `{{...}}` tags
    Text(String),
    /// `{{name}}`
    Var(String),
    /// `{{#if name}}`
    If(String),
    /// `{{else}}`
    Else,
    /// `{{/if}}`
    EndIf,
    /// `{{signature_placeholder_<party>}}` / `{{date_placeholder_<party>}}`
    Anchor { party: String, kind: FieldKind },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    /// Source text of the token, used when a tag is demoted back to text.
    pub raw: String,
    pub line: u32,
}

/// Identifier rule for variable names and party roles.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn classify(inner: &str) -> Option<Token> {
    let inner = inner.trim();
    if inner == "else" {
        return Some(Token::Else);
    }
    if inner == "/if" {
        return Some(Token::EndIf);
    }
    if let Some(rest) = inner.strip_prefix("#if") {
        // `#if` must be followed by whitespace, `{{#ifx}}` is not a conditional
        if rest.starts_with(char::is_whitespace) && is_identifier(rest.trim()) {
            return Some(Token::If(rest.trim().to_string()));
        }
        return None;
    }
    for kind in [FieldKind::Signature, FieldKind::Date] {
        if let Some(party) = inner.strip_prefix(kind.placeholder_prefix()) {
            if is_identifier(party) {
                return Some(Token::Anchor {
                    party: party.to_string(),
                    kind,
                });
            }
        }
    }
    if is_identifier(inner) {
        return Some(Token::Var(inner.to_string()));
    }
    None
}

fn push_text(tokens: &mut Vec<Spanned>, text: &str, line: u32) {
    if text.is_empty() {
        return;
    }
    if let Some(Spanned {
        token: Token::Text(prev),
        raw,
        ..
    }) = tokens.last_mut()
    {
        prev.push_str(text);
        raw.push_str(text);
        return;
    }
    tokens.push(Spanned {
        token: Token::Text(text.to_string()),
        raw: text.to_string(),
        line,
    });
}

fn count_lines(s: &str) -> u32 {
    s.bytes().filter(|b| *b == b'\n').count() as u32
}

pub fn lex(src: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let mut rest = src;
    let mut line: u32 = 1;

    while let Some(open) = rest.find("{{") {
        let (before, tail) = rest.split_at(open);
        push_text(&mut tokens, before, line);
        line += count_lines(before);

        let Some(close) = tail[2..].find("}}") else {
            // No closing braces: everything left is literal
            push_text(&mut tokens, tail, line);
            rest = "";
            break;
        };
        // A tag starts at the last `{{` before its `}}`; earlier braces are text
        let start = tail[..close + 2].rfind("{{").unwrap_or(0);
        let (stray, tail) = tail.split_at(start);
        let close = close - start;
        push_text(&mut tokens, stray, line);
        line += count_lines(stray);

        let raw = &tail[..close + 4];
        let inner = &tail[2..close + 2];
        match classify(inner) {
            Some(token) => tokens.push(Spanned {
                token,
                raw: raw.to_string(),
                line,
            }),
            None => push_text(&mut tokens, raw, line),
        }
        line += count_lines(raw);
        rest = &tail[close + 4..];
    }
    push_text(&mut tokens, rest, line);
    tokens
}
