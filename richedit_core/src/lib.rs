//! Core data structures and logic for the richedit text widget.
//!
//! This crate provides the widget's internal model: colored cell storage,
//! the blinking text cursor, dirty notification fan-out, the projection of
//! the buffer into positioned glyphs, and the key-to-edit input mapper. It
//! contains no terminal I/O, event loop, or border/title chrome; those belong
//! to the host toolkit.

#![deny(unsafe_code)]

pub mod buffer;
pub mod cell;
pub mod cursor;
pub mod event;
pub mod index;
pub mod input;
pub mod projection;
pub mod widget;

pub use buffer::Buffer;
pub use cell::{Attr, AttrFlags, Cell, Glyph};
pub use cursor::{BLINK_RATE, Cursor, CursorView};
pub use event::{DirtyHandlers, HandlerId};
pub use index::{Point, Rect};
pub use input::{EventHandler, InputEvent, Key, StdInput};
pub use projection::project;
pub use widget::{Container, Viewport, Widget};
