//! Item key grammar.
//!
//! An item key is a metric name optionally followed by a bracketed,
//! comma-separated parameter list:
//!
//! ```text
//! system.cpu.load
//! mycheck[*]
//! vfs.fs.size[/, "free space", [a,b]]
//! ```
//!
//! # Syntax
//!
//! - The name is one or more of `0-9 A-Z a-z _ . -`.
//! - Parameters follow in `[...]`, which must end the expression.
//! - Leading spaces of a parameter are skipped.
//! - A quoted parameter (`"..."`) may contain `,` and `]`; `\"` is the only
//!   escape. Only spaces may follow the closing quote.
//! - An array parameter (`[...]`) is returned as its raw text, brackets
//!   included. Arrays do not nest.
//! - Any other parameter runs up to the next `,` or `]`, trailing spaces kept.
//! - `name[]` has a single empty parameter; `name` has none.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Error type for item key parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The expression does not start with a key name.
    #[error("key name is missing")]
    MissingName,

    /// A character that is not allowed at this point of the key.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// A quoted parameter has no closing quote.
    #[error("unterminated quoted parameter at position {position}")]
    UnterminatedQuote { position: usize },

    /// The parameter list has no closing `]`.
    #[error("missing ']' at the end of parameters")]
    UnterminatedParameters,

    /// An array parameter contains another array.
    #[error("nested array parameter at position {position}")]
    NestedArray { position: usize },
}

/// A parsed item key: the metric name and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub name: String,
    pub params: Vec<String>,
}

/// Split an item key expression into its name and parameter list.
///
/// # Examples
///
/// ```
/// use userparam::key::parse_key;
///
/// let key = parse_key("mycheck[a, \"b,c\"]").unwrap();
/// assert_eq!(key.name, "mycheck");
/// assert_eq!(key.params, vec!["a", "b,c"]);
/// ```
pub fn parse_key(expr: &str) -> Result<ItemKey, KeyError> {
    let name_len = expr.bytes().take_while(|b| is_key_char(*b)).count();
    if name_len == 0 {
        return match char_at(expr, 0) {
            None => Err(KeyError::MissingName),
            Some(ch) => Err(KeyError::UnexpectedCharacter { ch, position: 0 }),
        };
    }

    let name = expr[..name_len].to_string();
    let params = match char_at(expr, name_len) {
        None => Vec::new(),
        Some('[') => {
            let (params, end) = parse_params(expr, name_len + 1)?;
            if let Some(ch) = char_at(expr, end) {
                return Err(KeyError::UnexpectedCharacter { ch, position: end });
            }
            params
        }
        Some(ch) => {
            return Err(KeyError::UnexpectedCharacter {
                ch,
                position: name_len,
            });
        }
    };

    Ok(ItemKey { name, params })
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-'
}

fn char_at(s: &str, pos: usize) -> Option<char> {
    s.get(pos..).and_then(|rest| rest.chars().next())
}

fn skip_spaces(s: &str, mut pos: usize) -> usize {
    while char_at(s, pos) == Some(' ') {
        pos += 1;
    }
    pos
}

/// Parse parameters starting just after the opening `[`.
///
/// Returns the parameters and the position just past the closing `]`.
fn parse_params(expr: &str, mut pos: usize) -> Result<(Vec<String>, usize), KeyError> {
    let mut params = Vec::new();

    loop {
        pos = skip_spaces(expr, pos);

        let (param, next) = match char_at(expr, pos) {
            None => return Err(KeyError::UnterminatedParameters),
            Some('"') => {
                let (param, next) = parse_quoted(expr, pos)?;
                (param, skip_spaces(expr, next))
            }
            Some('[') => {
                let (param, next) = parse_array(expr, pos)?;
                (param, skip_spaces(expr, next))
            }
            Some(_) => parse_unquoted(expr, pos),
        };
        params.push(param);
        pos = next;

        match char_at(expr, pos) {
            Some(',') => pos += 1,
            Some(']') => return Ok((params, pos + 1)),
            Some(ch) => return Err(KeyError::UnexpectedCharacter { ch, position: pos }),
            None => return Err(KeyError::UnterminatedParameters),
        }
    }
}

fn parse_quoted(expr: &str, start: usize) -> Result<(String, usize), KeyError> {
    let mut value = String::new();
    let mut chars = expr[start + 1..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' if matches!(chars.peek(), Some((_, '"'))) => {
                chars.next();
                value.push('"');
            }
            '"' => return Ok((value, start + 1 + offset + 1)),
            _ => value.push(ch),
        }
    }

    Err(KeyError::UnterminatedQuote { position: start })
}

fn parse_array(expr: &str, start: usize) -> Result<(String, usize), KeyError> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (offset, ch) in expr[start + 1..].char_indices() {
        let position = start + 1 + offset;
        if in_quotes {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_quotes = false,
                _ => escaped = false,
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            '[' => return Err(KeyError::NestedArray { position }),
            ']' => return Ok((expr[start..=position].to_string(), position + 1)),
            _ => {}
        }
    }

    Err(KeyError::UnterminatedParameters)
}

fn parse_unquoted(expr: &str, start: usize) -> (String, usize) {
    let end = expr[start..]
        .find([',', ']'])
        .map_or(expr.len(), |offset| start + offset);
    (expr[start..end].to_string(), end)
}
