//! Recursive-descent parser over the token stream.
//!
//! Grammar, alternatives listed in the order they are tried:
//!
//! ```text
//! Task      := Field Field Field Field Field Command
//! Field     := TimeExpr Space
//! TimeExpr  := TimePart (Comma TimePart)*
//! TimePart  := TimeSteps | TimeRange | TimeVal
//! TimeSteps := (Asterisk | TimeRange) Slash Number
//! TimeRange := Number Dash Number
//! TimeVal   := Number | Asterisk
//! ```
//!
//! Every production takes the token slice and a cursor and either returns the
//! node with the advanced cursor or fails without consuming anything, so
//! backtracking is just retrying from the same cursor.

use crate::ast::AstNode;
use crate::error::{FieldError, ParseError, StepHint};
use crate::tokenizer::{Token, FIELD_SEPARATORS};

type Parsed = Option<(AstNode, usize)>;

fn number_at(tokens: &[Token], pos: usize) -> Option<AstNode> {
    match tokens.get(pos) {
        Some(Token::Number(digits)) => Some(AstNode::time_val(digits.as_str())),
        _ => None,
    }
}

fn parse_time_val(tokens: &[Token], pos: usize) -> Parsed {
    match tokens.get(pos)? {
        Token::Asterisk => Some((AstNode::Asterisk, pos + 1)),
        Token::Number(digits) => Some((AstNode::time_val(digits.as_str()), pos + 1)),
        _ => None,
    }
}

fn parse_time_range(tokens: &[Token], pos: usize) -> Parsed {
    match tokens.get(pos..pos + 3)? {
        [Token::Number(from), Token::Dash, Token::Number(to)] => Some((
            AstNode::time_range(AstNode::time_val(from.as_str()), AstNode::time_val(to.as_str())),
            pos + 3,
        )),
        _ => None,
    }
}

fn parse_time_steps(tokens: &[Token], pos: usize) -> Parsed {
    let (base, next) = match tokens.get(pos)? {
        Token::Asterisk => (AstNode::Asterisk, pos + 1),
        _ => parse_time_range(tokens, pos)?,
    };

    if tokens.get(next)? != &Token::Slash {
        return None;
    }
    let step = number_at(tokens, next + 1)?;
    Some((AstNode::time_steps(base, step), next + 2))
}

fn parse_time_part(tokens: &[Token], pos: usize) -> Parsed {
    parse_time_steps(tokens, pos)
        .or_else(|| parse_time_range(tokens, pos))
        .or_else(|| parse_time_val(tokens, pos))
}

fn parse_time_expr(tokens: &[Token], pos: usize) -> Parsed {
    let mut parts = Vec::new();
    let mut cursor = pos;

    while let Some((part, next)) = parse_time_part(tokens, cursor) {
        parts.push(part);
        cursor = next;
        if tokens.get(cursor) != Some(&Token::Comma) {
            break;
        }
        cursor += 1;
    }

    if parts.is_empty() {
        return None;
    }
    Some((AstNode::TimeExpr(parts), cursor))
}

fn parse_time_field(tokens: &[Token], pos: usize) -> Result<(AstNode, usize), FieldError> {
    let (expr, cursor) = parse_time_expr(tokens, pos).ok_or(FieldError::NoTimeExpression)?;

    match tokens.get(cursor) {
        Some(Token::Space) => Ok((AstNode::Field(Box::new(expr)), cursor + 1)),
        found => {
            let found = found.cloned().unwrap_or(Token::EndOfInput);
            let hint = match (&found, cursor.checked_sub(1)) {
                (Token::Slash, Some(before)) => {
                    tokens.get(cursor + 1).map(|step| StepHint {
                        step: step.clone(),
                        range: tokens[before].clone(),
                    })
                }
                _ => None,
            };
            Err(FieldError::MissingSpace {
                found,
                expression: expr.to_string(),
                hint,
            })
        }
    }
}

fn parse_task(tokens: &[Token], pos: usize) -> Result<(AstNode, usize), ParseError> {
    let mut children = Vec::with_capacity(FIELD_SEPARATORS + 1);
    let mut cursor = pos;

    for index in 1..=FIELD_SEPARATORS {
        let (field, next) = parse_time_field(tokens, cursor)
            .map_err(|source| ParseError::Field { index, source })?;
        tracing::trace!(index, field = %field, "parsed time field");
        children.push(field);
        cursor = next;
    }

    match tokens.get(cursor) {
        Some(Token::Command(command)) if !command.is_empty() => {
            children.push(AstNode::Command(command.clone()));
            Ok((AstNode::Task(children), cursor + 1))
        }
        _ => Err(ParseError::MissingCommand),
    }
}

/// Builds the syntax tree for a full token sequence.
///
/// The sequence must end with exactly one [`Token::EndOfInput`] after the
/// command; anything left over is reported as a format error.
pub fn parse(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let (root, cursor) = parse_task(tokens, 0)?;
    if cursor + 1 != tokens.len() {
        return Err(ParseError::TrailingTokens);
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn num(digits: &str) -> Token {
        Token::Number(digits.to_string())
    }

    #[test]
    fn test_parse_time_range_needs_three_tokens() {
        assert_eq!(parse_time_range(&[num("1"), Token::Dash], 0), None);
        assert_eq!(
            parse_time_range(&[Token::Asterisk, num("1"), Token::Dash, num("5")], 1),
            Some((
                AstNode::time_range(AstNode::time_val("1"), AstNode::time_val("5")),
                4
            ))
        );
        assert_eq!(
            parse_time_range(&[num("1"), Token::Comma, num("5")], 0),
            None
        );
    }

    #[test]
    fn test_parse_time_val() {
        assert_eq!(
            parse_time_val(&[Token::Asterisk], 0),
            Some((AstNode::Asterisk, 1))
        );
        assert_eq!(
            parse_time_val(&[num("3")], 0),
            Some((AstNode::time_val("3"), 1))
        );
        assert_eq!(parse_time_val(&[Token::Comma], 0), None);
    }

    #[test]
    fn test_time_part_prefers_longest_match() {
        let tokens = tokenize("1-10/2").unwrap();
        let (node, next) = parse_time_part(&tokens, 0).unwrap();
        assert_eq!(next, 5);
        assert_eq!(
            node,
            AstNode::time_steps(
                AstNode::time_range(AstNode::time_val("1"), AstNode::time_val("10")),
                AstNode::time_val("2"),
            )
        );
    }

    #[test]
    fn test_time_part_backtracks_to_range() {
        let tokens = tokenize("1-10,").unwrap();
        let (node, next) = parse_time_part(&tokens, 0).unwrap();
        assert_eq!(next, 3);
        assert_eq!(node.kind(), "TimeRange");
    }

    #[test]
    fn test_time_expr_list() {
        let tokens = tokenize("*/15,1-5,7 ").unwrap();
        let (node, next) = parse_time_expr(&tokens, 0).unwrap();
        assert_eq!(node.to_string(), "*/15,1-5,7");
        assert_eq!(tokens[next], Token::Space);
    }

    #[test]
    fn test_parse_task() {
        let tokens = tokenize("*/15 0 1,15 * 1-5 /usr/bin/find").unwrap();
        let root = parse(&tokens).unwrap();
        let AstNode::Task(children) = &root else {
            panic!("expected a task, got {root:?}");
        };
        assert_eq!(children.len(), 6);
        assert_eq!(children[5], AstNode::Command("/usr/bin/find".to_string()));
        assert_eq!(root.to_string(), "*/15 0 1,15 * 1-5 /usr/bin/find");
    }

    #[test]
    fn test_step_hint() {
        let tokens = tokenize("1/10 1 1 1 1 test").unwrap();
        let err = parse(&tokens).unwrap_err();
        assert_eq!(
            err,
            ParseError::Field {
                index: 1,
                source: FieldError::MissingSpace {
                    found: Token::Slash,
                    expression: "1".to_string(),
                    hint: Some(StepHint {
                        step: num("10"),
                        range: num("1"),
                    }),
                },
            }
        );
    }

    #[test]
    fn test_missing_expression_reports_field_index() {
        let tokens = tokenize("* ").unwrap();
        assert_eq!(
            parse(&tokens).unwrap_err(),
            ParseError::Field {
                index: 2,
                source: FieldError::NoTimeExpression,
            }
        );
    }

    #[test]
    fn test_empty_command() {
        let tokens = tokenize("1 1 1 1 1 ").unwrap();
        assert_eq!(parse(&tokens).unwrap_err(), ParseError::MissingCommand);
    }

    #[test]
    fn test_trailing_tokens() {
        let mut tokens = tokenize("1 1 1 1 1 ls").unwrap();
        tokens.insert(tokens.len() - 1, Token::Comma);
        assert_eq!(parse(&tokens).unwrap_err(), ParseError::TrailingTokens);
    }
}
