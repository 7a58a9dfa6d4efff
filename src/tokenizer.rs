//! Lexical analysis of cron strings.
//!
//! The time fields are scanned one code point at a time. Once the fifth space
//! has been consumed the rest of the input is taken verbatim as the command,
//! so the command may contain anything, including multi-byte characters.

use std::fmt;

use serde::Serialize;

use crate::error::TokenizeError;

/// Number of spaces that separate the five time fields from the command.
pub const FIELD_SEPARATORS: usize = 5;

/// A lexical token of a cron string.
///
/// `Number` keeps the digits as written; they are only interpreted as an
/// integer during semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Asterisk,
    Comma,
    Dash,
    Slash,
    Number(String),
    Space,
    Command(String),
    EndOfInput,
}

impl Token {
    /// The exact text this token was scanned from.
    pub fn text(&self) -> &str {
        match self {
            Token::Asterisk => "*",
            Token::Comma => ",",
            Token::Dash => "-",
            Token::Slash => "/",
            Token::Space => " ",
            Token::Number(digits) => digits,
            Token::Command(command) => command,
            Token::EndOfInput => "",
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Token::Asterisk => "Asterisk",
            Token::Comma => "Comma",
            Token::Dash => "Dash",
            Token::Slash => "Slash",
            Token::Number(_) => "Number",
            Token::Space => "Space",
            Token::Command(_) => "Command",
            Token::EndOfInput => "EOF",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.text())
    }
}

/// Scans the maximal run of ASCII digits starting at `start`.
///
/// Returns the number token and the index one past its last digit, or `None`
/// if there is no digit at `start`.
fn scan_number(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let len = chars[start.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let end = start + len;
    Some((Token::Number(chars[start..end].iter().collect()), end))
}

/// Converts a cron string into tokens, terminated by [`Token::EndOfInput`].
///
/// Every unrecognised character before the command is collected so the error
/// can report all of them at once.
///
/// # Examples
///
/// ```rust
/// use cron_compiler::{tokenize, Token};
///
/// let tokens = tokenize("*/5").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Asterisk,
///         Token::Slash,
///         Token::Number("5".to_string()),
///         Token::EndOfInput,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut invalid = Vec::new();
    let mut spaces = 0;

    let mut i = 0;
    while i < chars.len() {
        if spaces >= FIELD_SEPARATORS {
            break;
        }

        match chars[i] {
            '*' => tokens.push(Token::Asterisk),
            ',' => tokens.push(Token::Comma),
            '-' => tokens.push(Token::Dash),
            '/' => tokens.push(Token::Slash),
            ' ' => {
                tokens.push(Token::Space);
                spaces += 1;
            }
            c if c.is_ascii_digit() => {
                if let Some((number, end)) = scan_number(&chars, i) {
                    tokens.push(number);
                    i = end;
                    continue;
                }
            }
            c => invalid.push(c),
        }
        i += 1;
    }

    if spaces >= FIELD_SEPARATORS {
        tokens.push(Token::Command(chars[i..].iter().collect()));
    }

    if !invalid.is_empty() {
        return Err(TokenizeError::InvalidCharacters(invalid));
    }
    if tokens.is_empty() {
        return Err(TokenizeError::Empty);
    }

    tokens.push(Token::EndOfInput);
    tracing::trace!(count = tokens.len(), "tokenized cron string");
    Ok(tokens)
}

/// Renders a token sequence as `[Number(1) Space( ) ...]` for diagnostics.
pub fn display_tokens(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens.iter().map(Token::to_string).collect();
    format!("[{}]", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(digits: &str) -> Token {
        Token::Number(digits.to_string())
    }

    #[test]
    fn test_scan_number() {
        let chars: Vec<char> = "1234 5".chars().collect();
        assert_eq!(scan_number(&chars, 0), Some((num("1234"), 4)));
        assert_eq!(scan_number(&chars, 5), Some((num("5"), 6)));
        assert_eq!(scan_number(&chars, 4), None);
        assert_eq!(scan_number(&chars, 6), None);
        assert_eq!(scan_number(&[], 0), None);
    }

    #[test]
    fn test_tokenize_symbols() {
        let tokens = tokenize("*,-/54").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Asterisk,
                Token::Comma,
                Token::Dash,
                Token::Slash,
                num("54"),
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_tokenize_single_number() {
        assert_eq!(tokenize("123").unwrap(), vec![num("123"), Token::EndOfInput]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize(""), Err(TokenizeError::Empty));
    }

    #[test]
    fn test_tokenize_collects_every_invalid_character() {
        assert_eq!(
            tokenize("1 a 2 b&"),
            Err(TokenizeError::InvalidCharacters(vec!['a', 'b', '&']))
        );
    }

    #[test]
    fn test_tokenize_command_is_not_rescanned() {
        let tokens = tokenize("1 2 3 4 5 echo a*b 7 & ünïcødé").unwrap();
        assert_eq!(tokens.len(), 12);
        assert_eq!(
            tokens[10],
            Token::Command("echo a*b 7 & ünïcødé".to_string())
        );
        assert_eq!(tokens[11], Token::EndOfInput);
    }

    #[test]
    fn test_tokenize_empty_command() {
        let tokens = tokenize("* * * * * ").unwrap();
        assert_eq!(tokens[10], Token::Command(String::new()));
    }

    #[test]
    fn test_non_ascii_digits_are_invalid() {
        assert_eq!(
            tokenize("٣"),
            Err(TokenizeError::InvalidCharacters(vec!['٣']))
        );
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Slash.to_string(), "Slash(/)");
        assert_eq!(num("10").to_string(), "Number(10)");
        assert_eq!(Token::EndOfInput.to_string(), "EOF()");
        assert_eq!(
            display_tokens(&[num("1"), Token::Space, Token::EndOfInput]),
            "[Number(1) Space( ) EOF()]"
        );
    }
}
