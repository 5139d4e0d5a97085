//! pixui is an immediate-mode GUI engine over an in-memory pixel buffer.
//!
//! Every frame, the host re-describes its whole interface by calling widget
//! functions in order; the engine keeps no retained widget tree. Widgets
//! draw into an RGBA buffer (`image::RgbaImage`) and report interaction
//! (click, focus) inline from the same call that drew them.
//!
//! # Architecture
//!
//! ```text
//! host events ──► Input ingestion (pending snapshot)
//!                        │ start_frame: snapshot + press edge
//!                        ▼
//!                 active input ──┐
//!                                ├─► widget calls ──► pixel buffer
//!   mutators (one-shot) ─────────┤        │
//!   flow cursor (layout) ────────┘        ▼
//!                                   Status { clicked, focused }
//!                        │ end_frame
//!                        ▼
//!                 &RgbaImage (the finished frame)
//! ```
//!
//! # Example
//!
//! ```
//! use pixui::{MouseButton, Window};
//!
//! let mut win = Window::new(200, 100);
//!
//! // Events arrive between frames
//! win.mouse_pos(12, 6);
//! win.mouse_down(MouseButton::Left);
//!
//! win.start_frame();
//! if win.button("ok", "OK").clicked() {
//!     // handle the click right here
//! }
//! win.same_line();
//! win.text("a label on the same line");
//! let frame = win.end_frame();
//! # assert_eq!(frame.dimensions(), (200, 100));
//! ```

pub mod draw;
pub mod font;
pub mod input;
pub mod layout;
pub mod mutator;
pub mod types;
pub mod widget_state;
pub mod window;

pub use font::{Font, NotoFont, PixelFont};
pub use input::{InputState, MouseButton, MouseButtons};
pub use mutator::{MutatorStore, MutatorValue};
pub use types::{BLACK, Color, Rect, WHITE};
pub use widget_state::{WidgetState, WidgetStateStore};
pub use window::{Status, Window};
