use super::Value;

/// A single condition on a remote field.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `field <op> 'value'`
    BinaryOp {
        field: String,
        op: BinaryOp,
        value: Value,
    },

    /// `field = null` / `field != null`
    IsNull { field: String, negate: bool },

    /// `field IN (...)` / `field NOT IN (...)`
    InList {
        field: String,
        list: Vec<Value>,
        negate: bool,
    },

    /// `field LIKE '...'` / `(NOT field LIKE '...')`
    Like {
        field: String,
        pattern: Value,
        negate: bool,
    },

    /// Caller supplied condition text, rendered parenthesized
    Raw(String),
}

impl Expr {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::binary_op(field, BinaryOp::Eq, value)
    }

    pub fn binary_op(field: impl Into<String>, op: BinaryOp, value: impl Into<Value>) -> Expr {
        Expr::BinaryOp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn is_null(field: impl Into<String>) -> Expr {
        Expr::IsNull {
            field: field.into(),
            negate: false,
        }
    }

    pub fn in_list(field: impl Into<String>, list: Vec<Value>) -> Expr {
        Expr::InList {
            field: field.into(),
            list,
            negate: false,
        }
    }

    /// The remote field the condition tests. Raw conditions have none.
    pub fn field(&self) -> Option<&str> {
        match self {
            Expr::BinaryOp { field, .. }
            | Expr::IsNull { field, .. }
            | Expr::InList { field, .. }
            | Expr::Like { field, .. } => Some(field),
            Expr::Raw(_) => None,
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        }
    }
}
