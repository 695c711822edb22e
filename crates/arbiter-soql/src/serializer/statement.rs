use super::{Comma, Formatter, ToSql};

use arbiter_core::stmt;

impl ToSql for &stmt::Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let filter = self
            .filter
            .as_ref()
            .filter(|filter| !filter.is_empty())
            .map(|filter| (" WHERE ", filter));

        let order_by = self
            .order_by
            .as_ref()
            .filter(|order_by| !order_by.exprs.is_empty())
            .map(|order_by| (" ORDER BY ", Comma(&order_by.exprs)));

        let limit = self.limit.map(|limit| (" LIMIT ", limit));
        let offset = self.offset.map(|offset| (" OFFSET ", offset));
        let source = &self.source;

        fmt!(
            f,
            "SELECT " Comma(&self.fields) " FROM " source
            filter order_by limit offset
        );
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let direction = match self.direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        };
        let field = &self.field;
        fmt!(f, field direction);
    }
}

impl<A: ToSql, B: ToSql> ToSql for (A, B) {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, self.0 self.1);
    }
}
