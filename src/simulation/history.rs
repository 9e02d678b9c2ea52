//! Ordered sequence of head fields produced by a run.

use std::ops::Deref;

use crate::field::Field2D;

/// Append-only head history.
///
/// Entry 0 is the initial condition; entry `t` is the head after `t`
/// steps. Dereferences to `[Field2D]` for indexing and iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadHistory {
    fields: Vec<Field2D>,
}

impl HeadHistory {
    /// Start a history from the initial head.
    pub(crate) fn new(initial: Field2D, capacity: usize) -> Self {
        let mut fields = Vec::with_capacity(capacity.max(1));
        fields.push(initial);
        Self { fields }
    }

    /// Append the head after the next step.
    pub(crate) fn push(&mut self, head: Field2D) {
        self.fields.push(head);
    }

    /// Initial condition.
    pub fn initial(&self) -> &Field2D {
        &self.fields[0]
    }

    /// Most recent head.
    pub fn latest(&self) -> &Field2D {
        // Never empty: constructed with the initial field.
        &self.fields[self.fields.len() - 1]
    }

    /// Number of completed steps (`len() - 1`).
    pub fn n_steps(&self) -> usize {
        self.fields.len() - 1
    }

    /// Consume the history, returning the fields.
    pub fn into_vec(self) -> Vec<Field2D> {
        self.fields
    }
}

impl Deref for HeadHistory {
    type Target = [Field2D];

    fn deref(&self) -> &[Field2D] {
        &self.fields
    }
}

impl From<HeadHistory> for Vec<Field2D> {
    fn from(history: HeadHistory) -> Self {
        history.fields
    }
}

impl<'a> IntoIterator for &'a HeadHistory {
    type Item = &'a Field2D;
    type IntoIter = std::slice::Iter<'a, Field2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
