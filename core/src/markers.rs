//! The inline escape language shared with the host.
//!
//! A rendered statusline is plain text interleaved with markers:
//!
//! - `%#Name#` switches to the highlight registered as `Name`
//! - `%*` resets to the window's base highlight
//! - `%=` separates sections; the host expands it into padding
//! - `%%` is a literal percent sign
//!
//! Markers never occupy display cells.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

pub const RESET: &str = "%*";
pub const ALIGN: &str = "%=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Switch(&'a str),
    Reset,
    Align,
}

pub fn switch(name: &str) -> String {
    format!("%#{name}#")
}

/// Escape text produced by providers so it can't be read as a marker.
pub fn escape(text: &str) -> Cow<'_, str> {
    if text.contains('%') {
        Cow::Owned(text.replace('%', "%%"))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(pos) = rest.find('%') {
        if pos > 0 {
            tokens.push(Token::Text(&rest[..pos]));
        }
        let after = &rest[pos + 1..];
        match after.chars().next() {
            Some('#') => match after[1..].find('#') {
                Some(end) => {
                    tokens.push(Token::Switch(&after[1..=end]));
                    rest = &after[end + 2..];
                }
                None => {
                    // Unterminated switch: show it as typed.
                    tokens.push(Token::Text(&rest[pos..]));
                    rest = "";
                }
            },
            Some('*') => {
                tokens.push(Token::Reset);
                rest = &after[1..];
            }
            Some('=') => {
                tokens.push(Token::Align);
                rest = &after[1..];
            }
            Some('%') => {
                tokens.push(Token::Text(&after[..1]));
                rest = &after[1..];
            }
            _ => {
                tokens.push(Token::Text(&rest[pos..=pos]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}

/// Display width of a marker string, counting only visible text.
pub fn display_width(input: &str) -> usize {
    tokenize(input)
        .into_iter()
        .map(|token| match token {
            Token::Text(text) => UnicodeWidthStr::width(text),
            Token::Switch(_) | Token::Reset | Token::Align => 0,
        })
        .sum()
}
