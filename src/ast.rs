//! Syntax tree produced by the parser.

use std::fmt;

use serde::Serialize;

/// A node of the cron syntax tree, one variant per grammar production.
///
/// Productions with a fixed number of operands hold them directly. `Task` and
/// `TimeExpr` keep a list so that malformed shapes stay representable and can
/// be rejected by semantic analysis instead of being assumed away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AstNode {
    /// Root: five `Field`s followed by a `Command`.
    Task(Vec<AstNode>),
    /// A single time field wrapping its `TimeExpr`.
    Field(Box<AstNode>),
    /// Comma-separated list of time parts.
    TimeExpr(Vec<AstNode>),
    /// `base/step`, where base is an `Asterisk` or a `TimeRange`.
    TimeSteps { base: Box<AstNode>, step: Box<AstNode> },
    /// `from-to`.
    TimeRange { from: Box<AstNode>, to: Box<AstNode> },
    /// Numeric literal as written.
    TimeVal(String),
    Asterisk,
    Command(String),
}

impl AstNode {
    pub fn time_val(digits: impl Into<String>) -> AstNode {
        AstNode::TimeVal(digits.into())
    }

    pub fn time_range(from: AstNode, to: AstNode) -> AstNode {
        AstNode::TimeRange {
            from: Box::new(from),
            to: Box::new(to),
        }
    }

    pub fn time_steps(base: AstNode, step: AstNode) -> AstNode {
        AstNode::TimeSteps {
            base: Box::new(base),
            step: Box::new(step),
        }
    }

    /// Name of the grammar production this node was built from.
    pub fn kind(&self) -> &'static str {
        match self {
            AstNode::Task(_) => "Task",
            AstNode::Field(_) => "Field",
            AstNode::TimeExpr(_) => "TimeExpr",
            AstNode::TimeSteps { .. } => "TimeSteps",
            AstNode::TimeRange { .. } => "TimeRange",
            AstNode::TimeVal(_) => "TimeVal",
            AstNode::Asterisk => "Asterisk",
            AstNode::Command(_) => "Command",
        }
    }
}

/// Writes the source text the node covers, e.g. `1-10/2` or `1,15`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Task(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            AstNode::Field(expr) => write!(f, "{expr}"),
            AstNode::TimeExpr(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            AstNode::TimeSteps { base, step } => write!(f, "{base}/{step}"),
            AstNode::TimeRange { from, to } => write!(f, "{from}-{to}"),
            AstNode::TimeVal(digits) => f.write_str(digits),
            AstNode::Asterisk => f.write_str("*"),
            AstNode::Command(command) => f.write_str(command),
        }
    }
}
