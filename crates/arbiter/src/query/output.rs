use crate::Grunt;

/// What executing a query resolves to.
#[derive(Debug, Clone)]
pub enum Output {
    /// The query asked for a single record: `first()`, `find_one()` or
    /// `find_by_id()` with a single id
    One(Option<Grunt>),

    Many(Vec<Grunt>),
}

impl Output {
    pub fn is_one(&self) -> bool {
        matches!(self, Output::One(_))
    }

    /// The single record, or the first of a list.
    pub fn into_one(self) -> Option<Grunt> {
        match self {
            Output::One(one) => one,
            Output::Many(many) => many.into_iter().next(),
        }
    }

    /// Every record; a single-record result becomes a list of at most one.
    pub fn into_many(self) -> Vec<Grunt> {
        match self {
            Output::One(one) => one.into_iter().collect(),
            Output::Many(many) => many,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Output::One(one) => usize::from(one.is_some()),
            Output::Many(many) => many.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
