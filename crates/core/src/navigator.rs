//! Cyclic cursor for stepping through a catalog one country at a time.

use crate::catalog::Catalog;
use crate::country::Country;

#[derive(Debug, Clone)]
pub struct Navigator {
    catalog: Catalog,
    index: usize,
}

impl Navigator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Country> {
        self.catalog.as_slice().get(self.index)
    }

    /// Move forward, wrapping from the last record to the first.
    pub fn next(&mut self) -> Option<&Country> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.len();
        self.current()
    }

    /// Move backward, wrapping from the first record to the last.
    pub fn previous(&mut self) -> Option<&Country> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + self.len() - 1) % self.len();
        self.current()
    }

    /// Jump to `name` (case and accent insensitive). Leaves the cursor alone
    /// when there is no such record.
    pub fn seek(&mut self, name: &str) -> Option<&Country> {
        let index = self.catalog.position_of(name)?;
        self.index = index;
        self.current()
    }
}
