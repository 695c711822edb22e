use crate::mock_driver::{DriverOp, State};

use arbiter_core::driver::{
    operation::{Create, Find, Raw, Update},
    Operation,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Read access to the operations a [`MockDriver`](crate::MockDriver) ran.
pub struct ExecLog {
    state: Arc<Mutex<State>>,
}

impl ExecLog {
    pub(crate) fn new(state: Arc<Mutex<State>>) -> Self {
        Self { state }
    }

    fn ops(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("mock driver state poisoned")
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops().ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops().ops.is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops()
            .ops
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn finds(&self) -> Vec<Find> {
        self.filter_map(|op| match op {
            Operation::Find(find) => Some(find.clone()),
            _ => None,
        })
    }

    /// Rendered SOQL of every find, in execution order.
    pub fn soql(&self) -> Vec<String> {
        self.finds().into_iter().map(|find| find.soql).collect()
    }

    pub fn raws(&self) -> Vec<Raw> {
        self.filter_map(|op| match op {
            Operation::Raw(raw) => Some(raw.clone()),
            _ => None,
        })
    }

    pub fn creates(&self) -> Vec<Create> {
        self.filter_map(|op| match op {
            Operation::Create(create) => Some(create.clone()),
            _ => None,
        })
    }

    pub fn updates(&self) -> Vec<Update> {
        self.filter_map(|op| match op {
            Operation::Update(update) => Some(update.clone()),
            _ => None,
        })
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops().ops.clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&mut self) -> Option<DriverOp> {
        let mut state = self.ops();
        if state.ops.is_empty() {
            None
        } else {
            Some(state.ops.remove(0))
        }
    }

    fn filter_map<T>(&self, f: impl Fn(&Operation) -> Option<T>) -> Vec<T> {
        self.ops()
            .ops
            .iter()
            .filter_map(|op| f(&op.operation))
            .collect()
    }
}
