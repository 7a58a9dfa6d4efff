use thiserror;

use crate::tokenizer::Token;

/// Errors returned by [`compile`](crate::compile), one variant per pipeline stage.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("failed to tokenize your cron string: {0}")]
    Tokenize(#[from] TokenizeError),
    #[error("could not parse cron task: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to extract valid cron task from syntax: {0}")]
    Semantic(#[from] SemanticError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("didn't find any valid characters in the cron string")]
    Empty,
    #[error(
        "invalid Tokens found in the cron string: [{}], need 5 time space-separated time fields followed by a command",
        join_chars(.0)
    )]
    InvalidCharacters(Vec<char>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `index` is 1-based.
    #[error("couldn't parse time field {index}: {source}")]
    Field { index: usize, source: FieldError },
    #[error("expected 5 space-separated time fields followed by a command")]
    MissingCommand,
    #[error("incorrect format: expected 5 space-separated time fields followed by a command")]
    TrailingTokens,
}

/// Why a single time field failed to parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("couldn't parse time expression")]
    NoTimeExpression,
    #[error(
        "expected a space after time expression - got {found} instead after parsing a complete time expression \"{expression}\" for this field{}",
        step_hint(.hint)
    )]
    MissingSpace {
        found: Token,
        expression: String,
        hint: Option<StepHint>,
    },
}

/// Tokens around a stray `/`, the usual sign of a step whose base never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepHint {
    pub step: Token,
    pub range: Token,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("invalid cron format, expected 5 time fields and a command")]
    ChildCount,
    #[error("expected 5 time fields followed by a command")]
    ExpectedField,
    #[error("expected a command after 5 time fields")]
    ExpectedCommand,
    #[error("invalid time expression format")]
    TimeExpression,
    #[error("time range needs to consist of 2 integers, got {0}")]
    RangeShape(String),
    #[error("invalid time steps format: {0}")]
    StepsShape(String),
    #[error("expected a valid number, got {0}")]
    InvalidNumber(String),
    #[error("time value needs to be between {min} and {max}, got {value}")]
    ValueOutOfRange { min: u32, max: u32, value: u32 },
    #[error("time range needs to start from a lower to a higher value, got {0}")]
    ReversedRange(String),
    #[error("time range needs to be between {min} and {max}, got {from} and {to}")]
    RangeOutOfBounds { min: u32, max: u32, from: u32, to: u32 },
    #[error("steps time range needs to be between {min} and {max}, got {from} and {to}")]
    StepsRangeOutOfBounds { min: u32, max: u32, from: u32, to: u32 },
    #[error("steps value needs to be a positive number, got {0}")]
    InvalidStep(u32),
}

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn step_hint(hint: &Option<StepHint>) -> String {
    match hint {
        Some(hint) => format!(
            ", it's possible you have provided an invalid value ({}) for the step number or the value range ({})?",
            hint.step, hint.range
        ),
        None => String::new(),
    }
}
