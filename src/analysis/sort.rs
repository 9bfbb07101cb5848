//! Deterministic ordering of changes for display.
//!
//! Changes are ordered most impactful first
//! (`Delete > Replace > Update > Create > NoOp`), ties broken by address
//! (or output name) ascending. The sort is stable.

use crate::model::{Action, OutputChange, ResourceChange};

/// Anything the [`ChangeSorter`] can order.
pub trait SortableChange {
    /// Action used for the primary key.
    fn sort_action(&self) -> Action;

    /// Identifier used for the secondary key.
    fn sort_key(&self) -> &str;
}

impl SortableChange for ResourceChange {
    fn sort_action(&self) -> Action {
        self.effective_action()
    }

    fn sort_key(&self) -> &str {
        &self.address
    }
}

impl SortableChange for OutputChange {
    fn sort_action(&self) -> Action {
        self.action
    }

    fn sort_key(&self) -> &str {
        &self.name
    }
}

impl<T: SortableChange + ?Sized> SortableChange for &T {
    fn sort_action(&self) -> Action {
        (**self).sort_action()
    }

    fn sort_key(&self) -> &str {
        (**self).sort_key()
    }
}

/// Sorter producing the display order of changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeSorter;

impl ChangeSorter {
    /// Creates a new sorter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns references to `changes` in display order.
    #[must_use]
    pub fn sort<'a, T: SortableChange>(&self, changes: &'a [T]) -> Vec<&'a T> {
        let mut ordered: Vec<&T> = changes.iter().collect();
        self.sort_in_place(&mut ordered);
        ordered
    }

    /// Sorts a slice in place into display order.
    pub fn sort_in_place<T: SortableChange>(&self, changes: &mut [T]) {
        changes.sort_by(|a, b| {
            a.sort_action()
                .priority()
                .cmp(&b.sort_action().priority())
                .then_with(|| a.sort_key().cmp(b.sort_key()))
        });
    }
}
