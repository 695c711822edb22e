use super::Expr;

/// The WHERE part of a select.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Caller supplied filter text, passed through untouched
    Raw(String),

    /// Conditions that must all hold
    And(Vec<Expr>),
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::Raw(raw) => raw.trim().is_empty(),
            Filter::And(exprs) => exprs.is_empty(),
        }
    }
}
