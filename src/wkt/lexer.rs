use std::fmt;

use crate::error::WktError;

/// Lexical unit of WKT text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Keyword, upper-cased.
    Word(String),
    Number(f64),
    Open,
    Close,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => f.write_str(word),
            Self::Number(x) => write!(f, "{x}"),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// Token with the byte offset it starts at.
pub(crate) type Spanned = (Token, usize);

/// Splits WKT text into tokens.
///
/// # Errors
///
/// Returns [`WktError::InvalidNumber`] for a numeric literal that does not
/// parse to a finite `f64`, and [`WktError::UnexpectedToken`] for any
/// character outside the WKT alphabet.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Spanned>, WktError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' | ')' | ',' => {
                chars.next();
                let token = match c {
                    '(' => Token::Open,
                    ')' => Token::Close,
                    _ => Token::Comma,
                };
                tokens.push((token, offset));
            }
            c if c.is_ascii_alphabetic() => {
                let end = scan(&mut chars, |c| c.is_ascii_alphanumeric() || c == '_');
                let word = &text[offset..end.unwrap_or(text.len())];
                tokens.push((Token::Word(word.to_ascii_uppercase()), offset));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let end = scan(&mut chars, |c| {
                    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')
                });
                let literal = &text[offset..end.unwrap_or(text.len())];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| WktError::InvalidNumber(literal.to_string()))?;
                if !value.is_finite() {
                    return Err(WktError::InvalidNumber(literal.to_string()));
                }
                tokens.push((Token::Number(value), offset));
            }
            other => {
                return Err(WktError::UnexpectedToken {
                    expected: "WKT token",
                    found: other.to_string(),
                    offset,
                });
            }
        }
    }
    Ok(tokens)
}

/// Advances past every character matching `accept`; returns the offset of
/// the first rejected one, or `None` at the end of the text.
fn scan(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    accept: impl Fn(char) -> bool,
) -> Option<usize> {
    while let Some(&(offset, c)) = chars.peek() {
        if !accept(c) {
            return Some(offset);
        }
        chars.next();
    }
    None
}
