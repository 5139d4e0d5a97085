//! Flow layout cursor.
//!
//! Widgets are placed top to bottom, one per line, each taking the full
//! remaining line width unless a `next_width` mutator narrows it. A
//! `same_line` call between two widgets keeps the second on the current
//! horizontal run; when the run finally breaks, the next line starts below
//! the tallest widget the run placed, not merely below the last one.

use crate::mutator::{MutatorStore, MutatorValue, NEXT_HEIGHT, NEXT_WIDTH};
use crate::types::Rect;

/// The layout cursor; all fields are positions in buffer pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowCursor {
    /// Current draw position.
    cur_x: i32,
    cur_y: i32,
    /// X immediately right of the last-placed widget (same-line target).
    next_x: i32,
    /// Top of the current horizontal run (same-line restores to this).
    last_y: i32,
    /// Max bottom among widgets on the current run.
    next_y: i32,
    /// Horizontal line limit, i.e. the window width.
    line_width: i32,
}

impl FlowCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the origin with the given line width. Called at frame start.
    pub fn reset(&mut self, line_width: i32) {
        *self = Self {
            line_width,
            ..Self::default()
        }
    }

    /// Current draw position.
    pub fn position(&self) -> (i32, i32) {
        (self.cur_x, self.cur_y)
    }

    /// Claim the next widget rectangle.
    ///
    /// Width defaults to the remaining line space and height to
    /// `height`, either overridden by a pending `next_width`/`next_height`
    /// mutator (consumed here). Advances the cursor to the start of the
    /// next line: x back to zero, y to the rectangle's bottom or the run's
    /// max bottom, whichever is lower on screen.
    pub fn get_box(&mut self, mutators: &mut MutatorStore, height: i32) -> Rect {
        let width = mutators
            .get(NEXT_WIDTH, MutatorValue::Px(self.line_width - self.cur_x))
            .px(self.line_width - self.cur_x);
        let height = mutators
            .get(NEXT_HEIGHT, MutatorValue::Px(height))
            .px(height);

        let rect = Rect::from_size(self.cur_x, self.cur_y, width, height);

        self.next_x = rect.max_x;
        self.last_y = self.cur_y;
        self.cur_x = 0;
        self.cur_y = rect.max_y.max(self.next_y);
        rect
    }

    /// Continue the current horizontal run with the next widget.
    ///
    /// Restores y to the just-placed widget's top and x to its right edge,
    /// after folding the pending line-break position into the run's max
    /// bottom so the eventual break clears every widget on the run.
    pub fn same_line(&mut self) {
        if self.next_y < self.cur_y {
            self.next_y = self.cur_y;
        }
        self.cur_y = self.last_y;
        self.cur_x = self.next_x;
    }
}
