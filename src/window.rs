//! The engine instance: frame lifecycle, widgets, and interaction status.
//!
//! One [`Window`] exists per rendering surface and owns everything: the
//! pixel buffer, the font, the layout cursor, the focus id, the
//! double-buffered input, the mutator store, and the per-widget state. The
//! host drives it in a loop:
//!
//! ```
//! use pixui::Window;
//!
//! let mut win = Window::new(200, 100);
//! win.start_frame();
//! if win.button("ok", "OK").clicked() {
//!     // react inline, in the same call that drew the widget
//! }
//! let frame = win.end_frame();
//! assert_eq!(frame.dimensions(), (200, 100));
//! ```
//!
//! Widget calls between `start_frame` and `end_frame` read only the active
//! input snapshot taken at frame start; ingestion keeps filling the pending
//! snapshot in the meantime.

use image::RgbaImage;
use tracing::{debug, trace};

use crate::draw;
use crate::font::{Font, PixelFont};
use crate::input::{InputState, MouseButton};
use crate::mutator::{CENTER, MutatorStore, MutatorValue, NEXT_HEIGHT, NEXT_WIDTH};
use crate::layout::FlowCursor;
use crate::types::{BLACK, Color, Rect, WHITE};
use crate::widget_state::{WidgetState, WidgetStateStore};

/// Default height of a widget row in pixels.
const WIDGET_HEIGHT: i32 = 12;

/// Pixels between a widget's border and its text.
const TEXT_INSET: i32 = 2;

/// Backspace, as it arrives through `push_char`.
const BACKSPACE: char = '\u{8}';

// =============================================================================
// Status
// =============================================================================

/// Interaction result of a single widget call.
///
/// A value snapshot of the widget's rectangle, identifier, and interaction
/// state, captured after any focus transfer the call performed. Valid only
/// for the frame that produced it. Holding it across frames answers about
/// a frame that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    rect: Rect,
    id: Option<String>,
    clicked: bool,
    focused: bool,
}

impl Status {
    /// True iff the primary button's press edge happened this frame with
    /// the mouse inside this widget's rectangle.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// True iff this widget's identifier holds the input focus.
    /// Always false for identifier-less widgets.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// The rectangle the widget was placed in.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The widget's identifier, if it has one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

// =============================================================================
// Window
// =============================================================================

/// An immediate-mode GUI engine bound to one pixel surface.
pub struct Window {
    width: u32,
    height: u32,

    buffer: RgbaImage,
    font: Box<dyn Font>,

    /// Foreground draw color; reset to white at frame start.
    pub fg: Color,
    /// Background draw color; reset to black at frame start.
    pub bg: Color,

    cursor: FlowCursor,
    focus_id: Option<String>,

    /// Continuously updated by ingestion calls.
    pending: InputState,
    /// Immutable snapshot for the current frame.
    active: InputState,
    /// Press edge of the primary button, recomputed at frame start.
    left_trigger: bool,

    mutators: MutatorStore,
    widget_state: WidgetStateStore,

    frame: u64,
    in_frame: bool,
}

impl Window {
    /// Create a window with the built-in 8px pixel font.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_font(width, height, Box::new(PixelFont::new()))
    }

    /// Create a window rendered with a caller-supplied font.
    pub fn with_font(width: u32, height: u32, font: Box<dyn Font>) -> Self {
        Self {
            width,
            height,
            buffer: RgbaImage::from_pixel(width, height, BLACK),
            font,
            fg: WHITE,
            bg: BLACK,
            cursor: FlowCursor::new(),
            focus_id: None,
            pending: InputState::new(),
            active: InputState::new(),
            left_trigger: false,
            mutators: MutatorStore::new(),
            widget_state: WidgetStateStore::new(),
            frame: 0,
            in_frame: false,
        }
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // =========================================================================
    // Input ingestion: pending snapshot only, callable at any time
    // =========================================================================

    /// Report the mouse position.
    pub fn mouse_pos(&mut self, x: i32, y: i32) {
        self.pending.set_mouse_pos(x, y);
    }

    /// Report a mouse button press.
    pub fn mouse_down(&mut self, button: MouseButton) {
        self.pending.press_button(button);
    }

    /// Report a mouse button release.
    pub fn mouse_up(&mut self, button: MouseButton) {
        self.pending.release_button(button);
    }

    /// Report a key press by integer code.
    pub fn key_down(&mut self, code: u32) {
        self.pending.press_key(code);
    }

    /// Report a key release.
    pub fn key_up(&mut self, code: u32) {
        self.pending.release_key(code);
    }

    /// Report a typed character. Backspace arrives as `'\u{8}'`.
    pub fn push_char(&mut self, ch: char) {
        self.pending.push_char(ch);
    }

    // =========================================================================
    // Active snapshot queries, for hosts building their own widgets
    // =========================================================================

    /// Whether a key is held in this frame's snapshot.
    pub fn key_held(&self, code: u32) -> bool {
        self.active.keys.contains(&code)
    }

    /// Whether a key transitioned to pressed since the previous frame.
    pub fn key_triggered(&self, code: u32) -> bool {
        self.active.key_triggers.contains(&code)
    }

    /// Mouse position in this frame's snapshot.
    pub fn mouse(&self) -> (i32, i32) {
        (self.active.mouse_x, self.active.mouse_y)
    }

    /// Press edge of the primary mouse button this frame.
    pub fn mouse_pressed(&self) -> bool {
        self.left_trigger
    }

    /// Characters typed since the previous frame, in arrival order.
    pub fn typed_chars(&self) -> &[char] {
        &self.active.chars
    }

    // =========================================================================
    // Frame lifecycle
    // =========================================================================

    /// Begin a frame.
    ///
    /// Resets the layout cursor and colors, clears the buffer to the
    /// background, computes the primary-button press edge, snapshots pending
    /// input into the active record, drains the pending one-shot sets, and
    /// discards all mutators. Calling `start_frame` again without an
    /// intervening `end_frame` simply redoes this initialization.
    pub fn start_frame(&mut self) {
        self.frame += 1;
        trace!(frame = self.frame, "start frame");

        self.cursor.reset(self.width as i32);
        self.fg = WHITE;
        self.bg = BLACK;
        draw::clear(&mut self.buffer, self.bg);

        // Edge: not held in the previous active snapshot, held now
        self.left_trigger = !self.active.left_down() && self.pending.left_down();

        self.active = self.pending.clone();
        self.pending.drain_one_shots();

        self.mutators.clear();
        self.in_frame = true;
    }

    /// Finish the frame and expose the rendered buffer.
    ///
    /// The buffer is not copied; it stays valid until the next
    /// `start_frame` clears it.
    pub fn end_frame(&mut self) -> &RgbaImage {
        trace!(frame = self.frame, "end frame");
        self.in_frame = false;
        &self.buffer
    }

    // =========================================================================
    // Layout modifiers
    // =========================================================================

    /// Keep the next widget on the current horizontal run.
    pub fn same_line(&mut self) -> &mut Self {
        self.cursor.same_line();
        self
    }

    /// Fix the next widget's width instead of the remaining line space.
    pub fn next_width(&mut self, width: i32) -> &mut Self {
        self.mutators.set(NEXT_WIDTH, MutatorValue::Px(width));
        self
    }

    /// Fix the next widget's height instead of its default.
    pub fn next_height(&mut self, height: i32) -> &mut Self {
        self.mutators.set(NEXT_HEIGHT, MutatorValue::Px(height));
        self
    }

    /// Center the next widget's text horizontally.
    pub fn center(&mut self) -> &mut Self {
        self.mutators.set(CENTER, MutatorValue::Flag(true));
        self
    }

    /// Mark the named mutator to survive its next read, so a modifier can
    /// apply to several consecutive widgets. Chain it right after the
    /// setter: `win.next_width(30).keep(pixui::mutator::NEXT_WIDTH)`.
    pub fn keep(&mut self, name: &str) -> &mut Self {
        self.mutators.keep(name);
        self
    }

    /// Direct access to the mutator store.
    pub fn mutators(&mut self) -> &mut MutatorStore {
        &mut self.mutators
    }

    // =========================================================================
    // Widget state
    // =========================================================================

    /// Direct access to the persistent widget state store.
    pub fn widget_states(&mut self) -> &mut WidgetStateStore {
        &mut self.widget_state
    }

    /// Drop all persistent widget state.
    pub fn clear_state(&mut self) {
        debug!("clearing widget state");
        self.widget_state.clear();
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Draw a block of text. Non-interactive and identifier-less.
    pub fn text(&mut self, text: &str) {
        debug_assert!(self.in_frame, "widget call outside start_frame/end_frame");
        let rect = self.cursor.get_box(&mut self.mutators, WIDGET_HEIGHT);
        draw::fill_rect(&mut self.buffer, rect, self.bg);
        self.draw_text_block(rect.inset(TEXT_INSET), text);
    }

    /// Draw a bordered box.
    ///
    /// The status carries no identifier: `focused` is always false and a
    /// click can never take focus; the box is decorative. `clicked` still
    /// answers via the rectangle hit test.
    pub fn boxed(&mut self) -> Status {
        debug_assert!(self.in_frame, "widget call outside start_frame/end_frame");
        let rect = self.cursor.get_box(&mut self.mutators, WIDGET_HEIGHT);
        self.draw_box(rect);
        self.status(rect)
    }

    /// Draw a button. A click moves the input focus to `id`.
    pub fn button(&mut self, id: &str, label: &str) -> Status {
        debug_assert!(self.in_frame, "widget call outside start_frame/end_frame");
        let rect = self.cursor.get_box(&mut self.mutators, WIDGET_HEIGHT);
        self.draw_box(rect);
        let status = self.interact(rect, id);
        self.draw_text_block(rect.inset(TEXT_INSET), label);
        status
    }

    /// Draw a single-line text field editing `text` in place.
    ///
    /// A click moves focus to `id`. While focused, this frame's typed
    /// characters are applied in arrival order: backspace removes the last
    /// character (no-op on empty text), anything else is appended.
    pub fn text_field(&mut self, id: &str, text: &mut String) -> Status {
        debug_assert!(self.in_frame, "widget call outside start_frame/end_frame");
        let rect = self.cursor.get_box(&mut self.mutators, WIDGET_HEIGHT);
        self.draw_box(rect);
        let status = self.interact(rect, id);

        if status.focused() {
            for &ch in &self.active.chars {
                match ch {
                    BACKSPACE => {
                        text.pop();
                    }
                    _ => text.push(ch),
                }
            }
        }

        // Edits land at the end of the text, so the cursor follows it
        let len = text.chars().count();
        let cursor = self
            .widget_state
            .get_or_insert(id, WidgetState::TextCursor { pos: len });
        let WidgetState::TextCursor { pos } = cursor;
        if pos != len {
            self.widget_state.set(id, WidgetState::TextCursor { pos: len });
        }

        self.draw_text_block(rect.inset(TEXT_INSET), text);
        status
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Background fill plus a one-pixel foreground border.
    fn draw_box(&mut self, rect: Rect) {
        draw::fill_rect(&mut self.buffer, rect, self.bg);
        draw::stroke_rect(&mut self.buffer, rect, self.fg);
    }

    /// Draw a multi-line text block clipped to `rect`.
    ///
    /// The `center` mutator is read once per block; when set, every line is
    /// centered independently within the rectangle.
    fn draw_text_block(&mut self, rect: Rect, text: &str) {
        let centered = self
            .mutators
            .get(CENTER, MutatorValue::Flag(false))
            .flag(false);
        let advance = self.font.line_advance();

        for (i, line) in text.split('\n').enumerate() {
            let mut x = rect.min_x;
            if centered {
                x += (rect.width() - self.font.measure(line)) / 2;
            }
            let y = rect.min_y + i as i32 * advance;
            self.font.draw_line(&mut self.buffer, rect, x, y, line, self.fg);
        }
    }

    /// Build a status for an identified widget, transferring focus on click.
    fn interact(&mut self, rect: Rect, id: &str) -> Status {
        let clicked = self.hit(rect);
        if clicked {
            debug!(id, "focus");
            self.focus_id = Some(id.to_owned());
        }
        Status {
            rect,
            id: Some(id.to_owned()),
            clicked,
            focused: self.focus_id.as_deref() == Some(id),
        }
    }

    /// Status for an identifier-less widget.
    fn status(&self, rect: Rect) -> Status {
        Status {
            rect,
            id: None,
            clicked: self.hit(rect),
            focused: false,
        }
    }

    /// Press edge this frame with the active mouse position inside `rect`.
    fn hit(&self, rect: Rect) -> bool {
        self.left_trigger && rect.contains(self.active.mouse_x, self.active.mouse_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::NEXT_WIDTH;

    fn win() -> Window {
        Window::new(200, 100)
    }

    #[test]
    fn test_press_edge_only_on_transition() {
        let mut w = win();

        w.mouse_down(MouseButton::Left);
        w.start_frame();
        assert!(w.mouse_pressed());
        w.end_frame();

        // Still held: no new edge
        w.start_frame();
        assert!(!w.mouse_pressed());
        w.end_frame();

        w.mouse_up(MouseButton::Left);
        w.start_frame();
        assert!(!w.mouse_pressed());
        w.end_frame();

        // Released then pressed again: new edge
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        assert!(w.mouse_pressed());
    }

    #[test]
    fn test_start_frame_drains_one_shots_keeps_level_state() {
        let mut w = win();
        w.key_down(42);
        w.push_char('x');
        w.mouse_pos(7, 8);

        w.start_frame();
        assert!(w.key_held(42));
        assert!(w.key_triggered(42));
        assert_eq!(w.typed_chars(), &['x']);
        assert_eq!(w.mouse(), (7, 8));
        w.end_frame();

        // Next frame: still held, no longer a trigger, chars gone
        w.start_frame();
        assert!(w.key_held(42));
        assert!(!w.key_triggered(42));
        assert!(w.typed_chars().is_empty());
        assert_eq!(w.mouse(), (7, 8));
    }

    #[test]
    fn test_start_frame_resets_colors_and_buffer() {
        let mut w = win();
        w.start_frame();
        w.fg = BLACK;
        w.bg = WHITE;
        w.end_frame();

        w.start_frame();
        assert_eq!(w.fg, WHITE);
        assert_eq!(w.bg, BLACK);
        let frame = w.end_frame();
        assert!(frame.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_frame_reset_clears_kept_mutators() {
        let mut w = win();
        w.start_frame();
        w.next_width(30).keep(NEXT_WIDTH);
        w.end_frame();

        w.start_frame();
        assert_eq!(
            w.mutators().get(NEXT_WIDTH, MutatorValue::Px(0)),
            MutatorValue::Px(0)
        );
    }

    #[test]
    fn test_text_widgets_stack_without_overlap() {
        let mut w = win();
        w.start_frame();
        let a = w.boxed();
        let b = w.boxed();

        assert_eq!(a.rect().max_y, b.rect().min_y);
        assert_eq!(a.rect().min_x, b.rect().min_x);
    }

    #[test]
    fn test_same_line_buttons_side_by_side() {
        let mut w = win();
        w.start_frame();
        w.next_width(40);
        let a = w.button("a", "X");
        w.same_line();
        w.next_width(40);
        let b = w.button("b", "Y");

        assert_eq!(a.rect().min_y, b.rect().min_y);
        assert_eq!(b.rect().min_x, a.rect().max_x);
    }

    #[test]
    fn test_boxed_is_never_focused() {
        let mut w = win();
        w.mouse_pos(5, 5);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        let s = w.boxed();

        assert!(s.clicked());
        assert!(!s.focused());
        assert!(s.id().is_none());
    }

    #[test]
    fn test_button_click_sets_focus() {
        let mut w = win();

        // Frame 1: no click
        w.start_frame();
        let s = w.button("ok", "OK");
        assert!(!s.clicked());
        assert!(!s.focused());
        w.end_frame();

        // Frame 2: press edge at the button's center
        let center = (s.rect().min_x + s.rect().width() / 2, s.rect().min_y + 6);
        w.mouse_pos(center.0, center.1);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        let s = w.button("ok", "OK");
        assert!(s.clicked());
        assert!(s.focused());
    }

    #[test]
    fn test_focus_stays_without_new_click() {
        let mut w = win();

        w.mouse_pos(5, 5);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        assert!(w.button("b1", "one").clicked());
        w.end_frame();

        w.mouse_up(MouseButton::Left);
        w.start_frame();
        let s1 = w.button("b1", "one");
        let s2 = w.button("b2", "two");
        assert!(s1.focused());
        assert!(!s2.focused());
        assert!(!s1.clicked());
        assert!(!s2.clicked());
    }

    #[test]
    fn test_text_field_appends_and_backspaces_in_order() {
        let mut w = win();
        let mut text = String::from("abc");

        // Click to focus
        w.mouse_pos(5, 5);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        assert!(w.text_field("f", &mut text).focused());
        w.end_frame();

        // Type while focused: order is arrival order
        w.push_char('d');
        w.push_char('\u{8}');
        w.push_char('e');
        w.start_frame();
        w.text_field("f", &mut text);
        assert_eq!(text, "abce");
    }

    #[test]
    fn test_text_field_backspace_on_empty_is_noop() {
        let mut w = win();
        let mut text = String::new();

        w.mouse_pos(5, 5);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        w.text_field("f", &mut text);
        w.end_frame();

        w.push_char('\u{8}');
        w.start_frame();
        w.text_field("f", &mut text);
        assert_eq!(text, "");
    }

    #[test]
    fn test_text_field_ignores_input_when_unfocused() {
        let mut w = win();
        let mut text = String::from("abc");

        w.push_char('x');
        w.start_frame();
        let s = w.text_field("f", &mut text);
        assert!(!s.focused());
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_text_field_tracks_cursor_state() {
        let mut w = win();
        let mut text = String::from("hi");

        w.start_frame();
        w.text_field("f", &mut text);
        assert_eq!(
            w.widget_states().get_or_insert("f", WidgetState::TextCursor { pos: 0 }),
            WidgetState::TextCursor { pos: 2 }
        );

        w.clear_state();
        assert!(w.widget_states().is_empty());
    }

    #[test]
    fn test_click_outside_rect_misses() {
        let mut w = win();
        w.mouse_pos(50, 50);
        w.mouse_down(MouseButton::Left);
        w.start_frame();
        w.next_width(40);
        let s = w.button("a", "A"); // rect (0,0)-(40,12)

        assert!(!s.clicked());
        // The press edge still landed somewhere this frame
        assert!(w.mouse_pressed());
    }

    #[test]
    fn test_end_frame_returns_surface_sized_buffer() {
        let mut w = win();
        w.start_frame();
        w.text("hello");
        let frame = w.end_frame();
        assert_eq!(frame.dimensions(), (200, 100));
    }
}
