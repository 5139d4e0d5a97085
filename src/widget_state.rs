//! Persistent per-widget state.
//!
//! The only state the engine retains across frames, keyed by widget
//! identifier. Entries are created lazily from a caller-supplied default on
//! first lookup and live until the host clears the whole store.

use std::collections::HashMap;

/// The per-widget-type state records the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Text-field edit cursor, as a character offset into the field's text.
    TextCursor { pos: usize },
}

/// Identifier-keyed store of [`WidgetState`] entries surviving across frames.
#[derive(Debug, Clone, Default)]
pub struct WidgetStateStore {
    entries: HashMap<String, WidgetState>,
}

impl WidgetStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a widget's state, inserting `default` on first access.
    pub fn get_or_insert(&mut self, id: &str, default: WidgetState) -> WidgetState {
        if let Some(state) = self.entries.get(id) {
            return *state;
        }
        self.entries.insert(id.to_owned(), default);
        default
    }

    /// Overwrite a widget's state.
    pub fn set(&mut self, id: &str, state: WidgetState) {
        self.entries.insert(id.to_owned(), state);
    }

    /// Drop every entry. The only way state is ever removed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no widget has state yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_default_then_persist() {
        let mut store = WidgetStateStore::new();
        let def = WidgetState::TextCursor { pos: 0 };

        assert_eq!(store.get_or_insert("field", def), def);

        store.set("field", WidgetState::TextCursor { pos: 4 });
        // A later default lookup sees the stored value, not the default
        assert_eq!(
            store.get_or_insert("field", def),
            WidgetState::TextCursor { pos: 4 }
        );
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut store = WidgetStateStore::new();
        store.set("a", WidgetState::TextCursor { pos: 1 });
        store.set("b", WidgetState::TextCursor { pos: 2 });
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(
            store.get_or_insert("a", WidgetState::TextCursor { pos: 0 }),
            WidgetState::TextCursor { pos: 0 }
        );
    }
}
