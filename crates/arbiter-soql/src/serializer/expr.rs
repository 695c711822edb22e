use super::{Comma, Delimited, Formatter, Quoted, ToSql};

use arbiter_core::stmt;

impl ToSql for &stmt::Filter {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Filter::Raw(raw) => fmt!(f, raw),
            stmt::Filter::And(exprs) => fmt!(f, Delimited(exprs, " AND ")),
        }
    }
}

impl ToSql for &stmt::Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Expr::BinaryOp { field, op, value } => {
                fmt!(f, field " " op.as_str() " " Quoted(value));
            }
            stmt::Expr::IsNull { field, negate } => {
                let op = if *negate { " != null" } else { " = null" };
                fmt!(f, field op);
            }
            stmt::Expr::InList {
                field,
                list,
                negate,
            } => {
                let op = if *negate { " NOT IN (" } else { " IN (" };
                fmt!(f, field op Comma(list.iter().map(Quoted)) ")");
            }
            stmt::Expr::Like {
                field,
                pattern,
                negate,
            } => {
                if *negate {
                    fmt!(f, "(NOT " field " LIKE " Quoted(pattern) ")");
                } else {
                    fmt!(f, field " LIKE " Quoted(pattern));
                }
            }
            stmt::Expr::Raw(raw) => fmt!(f, "(" raw ")"),
        }
    }
}
