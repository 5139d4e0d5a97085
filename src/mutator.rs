//! One-shot mutator store.
//!
//! A mutator attaches a named override to the *next* call that reads it:
//! `next_width`/`next_height` feed the layout engine, `center` feeds text
//! drawing. An entry is consumed on first read unless its keep flag was set
//! since the last read, in which case it survives exactly one more read.
//! Every frame start discards the whole store, keep flags included.

use std::collections::HashMap;

/// Mutator name consumed by the next layout box for its width.
pub const NEXT_WIDTH: &str = "nextwidth";
/// Mutator name consumed by the next layout box for its height.
pub const NEXT_HEIGHT: &str = "nextheight";
/// Mutator name consumed by the next text draw for horizontal centering.
pub const CENTER: &str = "center";

/// The closed set of override values widgets understand.
///
/// A closed variant instead of a dynamic type: only pixel amounts and flags
/// exist, so readers never need a runtime downcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutatorValue {
    /// A pixel measure (width or height).
    Px(i32),
    /// A boolean switch.
    Flag(bool),
}

impl MutatorValue {
    /// The pixel amount, or `default` if this is not a `Px` value.
    pub fn px(self, default: i32) -> i32 {
        match self {
            MutatorValue::Px(v) => v,
            MutatorValue::Flag(_) => default,
        }
    }

    /// The flag, or `default` if this is not a `Flag` value.
    pub fn flag(self, default: bool) -> bool {
        match self {
            MutatorValue::Flag(v) => v,
            MutatorValue::Px(_) => default,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: MutatorValue,
    keep: bool,
}

/// Name-keyed store of one-shot overrides.
#[derive(Debug, Clone, Default)]
pub struct MutatorStore {
    entries: HashMap<&'static str, Entry>,
}

impl MutatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry. The keep flag resets to false.
    pub fn set(&mut self, name: &'static str, value: MutatorValue) {
        self.entries.insert(name, Entry { value, keep: false });
    }

    /// Mark an existing entry to survive its next read. No-op if absent.
    ///
    /// Meant to be chained right after a setter, before the widget call
    /// that consumes the entry.
    pub fn keep(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.keep = true;
        }
    }

    /// Read an entry, consuming it unless kept.
    ///
    /// Absent entries yield `default`. A kept entry has its flag cleared
    /// and survives; the next unkept read removes it.
    pub fn get(&mut self, name: &str, default: MutatorValue) -> MutatorValue {
        match self.entries.get_mut(name) {
            Some(entry) => {
                let value = entry.value;
                if entry.keep {
                    entry.keep = false;
                } else {
                    self.entries.remove(name);
                }
                value
            }
            None => default,
        }
    }

    /// Discard every entry unconditionally. Called at frame start.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
