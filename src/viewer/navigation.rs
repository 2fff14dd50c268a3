//! Active-photo navigation.

/// Direction of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Next,
    Previous,
}

/// The "active index" into the photo list.
///
/// Starts with nothing selected. From no selection, `next` selects the first
/// photo and `previous` the last. With an empty list every command is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    len: usize,
    active: Option<usize>,
}

impl Navigation {
    pub fn new(len: usize) -> Self {
        Self { len, active: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Change the list length. An active index past the new end is cleared.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.active.is_some_and(|i| i >= len) {
            self.active = None;
        }
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return self.active;
        }
        self.active = Some(match self.active {
            None => 0,
            Some(i) => (i + 1) % self.len,
        });
        self.active
    }

    pub fn previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return self.active;
        }
        self.active = Some(match self.active {
            None => self.len - 1,
            Some(i) => (i + self.len - 1) % self.len,
        });
        self.active
    }

    pub fn step(&mut self, direction: NavDirection) -> Option<usize> {
        match direction {
            NavDirection::Next => self.next(),
            NavDirection::Previous => self.previous(),
        }
    }

    /// Select a photo directly. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index < self.len {
            self.active = Some(index);
        }
        self.active
    }

    /// "`current` / `total`" label, 1-based, when something is active.
    pub fn counter_label(&self) -> Option<String> {
        self.active.map(|i| format!("{} / {}", i + 1, self.len))
    }
}
