//! # Cron Compiler
//!
//! Compiles cron schedule strings into fully expanded, validated schedules.
//!
//! ## Usage
//!
//! Add cron_compiler crate to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cron_compiler = "0.1"
//! ```
//!
//! A cron string is five space-separated time fields followed by a command:
//!
//! ```text
//! min   hour   day of month   month   day of week   command
//! *     *      *              *       *             /usr/bin/find
//! ```
//!
//! Each field accepts `*`, numbers, ranges (`1-5`), steps (`*/15`, `0-30/5`)
//! and comma-separated lists of those. Everything after the fifth space is the
//! command and is kept verbatim.
//!
//! Compilation runs in three stages, each available on its own:
//! [`tokenize`], [`parse`] and [`analyze`]. [`compile`] chains them.
//!
//! ```rust
//! use cron_compiler::compile;
//!
//! let schedule = compile("*/15 0 1,15 * 1-5 /usr/bin/find").unwrap();
//!
//! assert_eq!(schedule.minutes, vec![0, 15, 30, 45]);
//! assert_eq!(schedule.hours, vec![0]);
//! assert_eq!(schedule.days_of_month, vec![1, 15]);
//! assert_eq!(schedule.months, (1..=12).collect::<Vec<_>>());
//! assert_eq!(schedule.days_of_week, vec![1, 2, 3, 4, 5]);
//! assert_eq!(schedule.command, "/usr/bin/find");
//!
//! print!("{schedule}");
//! ```
//!
//! Errors carry the stage they came from:
//!
//! ```rust
//! use cron_compiler::compile;
//!
//! let err = compile("1 40-50 1 1 1 test").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "failed to extract valid cron task from syntax: time range needs to be between 0 and 23, got 40 and 50"
//! );
//! ```

mod ast;
mod error;
mod parser;
mod schedule;
mod semantics;
mod tokenizer;

pub use crate::{
    ast::AstNode,
    error::{CompileError, FieldError, ParseError, SemanticError, StepHint, TokenizeError},
    parser::parse,
    schedule::{FieldKind, Schedule},
    semantics::analyze,
    tokenizer::{display_tokens, tokenize, Token},
};

pub type Result<T> = std::result::Result<T, CompileError>;

/// Compiles a cron string into a [`Schedule`].
///
/// The same input always yields the same schedule; no state is kept between
/// calls.
pub fn compile(cron: &str) -> Result<Schedule> {
    let tokens = tokenize(cron)?;
    let ast = parse(&tokens)?;
    let schedule = analyze(&ast)?;
    tracing::debug!(command = %schedule.command, "compiled cron string");
    Ok(schedule)
}
