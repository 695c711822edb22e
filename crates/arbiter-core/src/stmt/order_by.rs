/// Sort order of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByExpr {
    /// Remote field path
    pub field: String,

    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Reads the `1` / `-1` sort convention.
    pub fn from_sign(sign: i64) -> Option<Direction> {
        match sign {
            1 => Some(Direction::Asc),
            -1 => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn sign(self) -> i64 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }
}

impl From<Vec<OrderByExpr>> for OrderBy {
    fn from(exprs: Vec<OrderByExpr>) -> Self {
        OrderBy { exprs }
    }
}
