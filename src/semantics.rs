//! Semantic analysis: expands the syntax tree into concrete value sets.

use std::collections::BTreeSet;

use crate::ast::AstNode;
use crate::error::SemanticError;
use crate::schedule::{FieldKind, Schedule};

type Result<T> = std::result::Result<T, SemanticError>;

/// Values contributed by one time part: `start, start + step, ...` up to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: u32,
    end: u32,
    step: u32,
}

impl Span {
    fn single(value: u32) -> Span {
        Span {
            start: value,
            end: value,
            step: 1,
        }
    }

    fn insert_into(self, values: &mut BTreeSet<u32>) {
        if self.start > self.end {
            return;
        }
        values.extend((self.start..=self.end).step_by(self.step as usize));
    }
}

fn number(node: &AstNode) -> Result<u32> {
    match node {
        AstNode::TimeVal(digits) => digits
            .parse()
            .map_err(|_| SemanticError::InvalidNumber(digits.clone())),
        other => Err(SemanticError::InvalidNumber(other.to_string())),
    }
}

/// Reads both ends of a range, rejecting non-numeric or reversed ends.
fn range_ends(from: &AstNode, to: &AstNode) -> Result<(u32, u32)> {
    if !matches!(from, AstNode::TimeVal(_)) || !matches!(to, AstNode::TimeVal(_)) {
        return Err(SemanticError::RangeShape(format!(
            "{} and {}",
            from.kind(),
            to.kind()
        )));
    }
    let (start, end) = (number(from)?, number(to)?);
    if start > end {
        return Err(SemanticError::ReversedRange(format!("{from}-{to}")));
    }
    Ok((start, end))
}

/// Validates one time part against the field's domain.
///
/// A range whose start lies below the domain is clamped, while an end above
/// the domain is an error. Node kinds that cannot appear in a time expression
/// contribute nothing.
fn resolve_part(part: &AstNode, field: FieldKind) -> Result<Option<Span>> {
    let (min, max) = field.bounds();

    let span = match part {
        AstNode::Asterisk => Span {
            start: min,
            end: max,
            step: 1,
        },
        AstNode::TimeVal(_) => {
            let value = number(part)?;
            if value < min || value > max {
                return Err(SemanticError::ValueOutOfRange { min, max, value });
            }
            Span::single(value)
        }
        AstNode::TimeRange { from, to } => {
            let (from, to) = range_ends(from, to)?;
            if from > max || to > max {
                return Err(SemanticError::RangeOutOfBounds { min, max, from, to });
            }
            Span {
                start: from.max(min),
                end: to.min(max),
                step: 1,
            }
        }
        AstNode::TimeSteps { base, step } => {
            if !matches!(step.as_ref(), AstNode::TimeVal(_)) {
                return Err(SemanticError::StepsShape(part.to_string()));
            }
            let step = number(step)?;
            if step == 0 {
                return Err(SemanticError::InvalidStep(step));
            }
            match base.as_ref() {
                AstNode::Asterisk => Span {
                    start: min,
                    end: max,
                    step,
                },
                AstNode::TimeRange { from, to } => {
                    let (from, to) = range_ends(from, to)?;
                    if from > max || to > max {
                        return Err(SemanticError::StepsRangeOutOfBounds { min, max, from, to });
                    }
                    Span {
                        start: from.max(min),
                        end: to.min(max),
                        step,
                    }
                }
                _ => return Err(SemanticError::StepsShape(part.to_string())),
            }
        }
        other => {
            tracing::debug!(kind = other.kind(), field = %field, "ignoring unexpected node in time expression");
            return Ok(None);
        }
    };
    Ok(Some(span))
}

/// Expands a `Field` node into its sorted values.
///
/// With `short_circuit` set, parts after the one that completes the domain
/// are still validated but no longer inserted. Validation must not stop
/// early: `*,99` has to fail whether or not the flag is set.
fn expand_field(node: &AstNode, field: FieldKind, short_circuit: bool) -> Result<Vec<u32>> {
    let parts = match node {
        AstNode::Field(expr) => match expr.as_ref() {
            AstNode::TimeExpr(parts) => parts,
            _ => return Err(SemanticError::TimeExpression),
        },
        _ => return Err(SemanticError::TimeExpression),
    };

    let mut values = BTreeSet::new();
    for part in parts {
        let span = resolve_part(part, field)?;
        if short_circuit && values.len() == field.size() {
            continue;
        }
        if let Some(span) = span {
            span.insert_into(&mut values);
        }
    }

    tracing::trace!(field = %field, count = values.len(), "expanded time field");
    Ok(values.into_iter().collect())
}

/// Turns a parsed task into a [`Schedule`].
///
/// The tree must be a `Task` of five `Field`s and a `Command`; any other shape
/// is reported as a format error.
pub fn analyze(ast: &AstNode) -> Result<Schedule> {
    let children = match ast {
        AstNode::Task(children) if children.len() == FieldKind::ALL.len() + 1 => children,
        _ => return Err(SemanticError::ChildCount),
    };
    let (fields, command) = children.split_at(FieldKind::ALL.len());
    if !fields.iter().all(|node| matches!(node, AstNode::Field(_))) {
        return Err(SemanticError::ExpectedField);
    }
    let command = match &command[0] {
        AstNode::Command(command) => command.clone(),
        _ => return Err(SemanticError::ExpectedCommand),
    };

    let mut expanded = Vec::with_capacity(fields.len());
    for (node, field) in fields.iter().zip(FieldKind::ALL) {
        expanded.push(expand_field(node, field, true)?);
    }
    let [minutes, hours, days_of_month, months, days_of_week]: [Vec<u32>; 5] = expanded
        .try_into()
        .map_err(|_| SemanticError::ChildCount)?;

    Ok(Schedule {
        minutes,
        hours,
        days_of_month,
        months,
        days_of_week,
        command,
    })
}
