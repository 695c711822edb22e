mod expr;
pub use expr::{BinaryOp, Expr};

mod filter;
pub use filter::Filter;

mod order_by;
pub use order_by::{Direction, OrderBy, OrderByExpr};

mod select;
pub use select::Select;

mod value;
pub use value::Value;
