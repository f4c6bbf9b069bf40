//! Key-to-edit input mapping.
//!
//! The host event source delivers [`InputEvent`]s one at a time. An
//! [`EventHandler`] decides whether it consumed the event so the host can
//! fall through to other handling. [`StdInput`] is the standard text-editing
//! handler: it only acts while the widget's cursor is visible.

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_width::UnicodeWidthChar;

use crate::widget::{Container, Widget};

/// Named keys the widget distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Enter,
    Space,
    Tab,
    Escape,
    /// Function key F1..F24.
    F(u8),
}

/// A raw input event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A named key press.
    Key(Key),
    /// A character press.
    Char(char),
}

/// Consumes input events.
pub trait EventHandler {
    /// Handle one event. Returns `true` if it was consumed.
    fn handle_event(&mut self, event: &InputEvent) -> bool;
}

/// Standard editing keys for a [`Widget`].
///
/// Stateless apart from the widget it drives. While the cursor is hidden
/// every event is reported unhandled and nothing changes.
#[derive(Debug)]
pub struct StdInput<'w, C: Container> {
    widget: &'w Widget<C>,
}

impl<'w, C: Container> StdInput<'w, C> {
    pub fn new(widget: &'w Widget<C>) -> Self {
        Self { widget }
    }
}

impl<C: Container> EventHandler for StdInput<'_, C> {
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.widget.cursor_visible() {
            return false;
        }
        match *event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Char(ch) => {
                if is_printable(ch) {
                    self.widget.write_str(ch.encode_utf8(&mut [0; 4]));
                } else {
                    log::trace!("input: ignoring non-printable {ch:?}");
                }
            }
        }
        true
    }
}

impl<C: Container> StdInput<'_, C> {
    fn handle_key(&self, key: Key) {
        match key {
            Key::Left => self.widget.move_cursor(-1),
            Key::Right => self.widget.move_cursor(1),
            Key::Delete => self.widget.delete(1),
            Key::Backspace => self.widget.delete(-1),
            Key::Enter => {
                self.widget.write_str("\n");
            }
            Key::Space => {
                self.widget.write_str(" ");
            }
            // Line and page navigation are not supported; the remaining keys
            // have no editing meaning.
            Key::Home
            | Key::End
            | Key::Up
            | Key::Down
            | Key::PageUp
            | Key::PageDown
            | Key::Tab
            | Key::Escape
            | Key::F(_) => {}
        }
    }
}

/// Whether `ch` is a printable character: a letter, mark, number,
/// punctuation, symbol, or the ASCII space.
///
/// Controls, format characters, private-use and unassigned code points, and
/// every separator other than U+0020 are rejected.
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    let rejected = matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::Surrogate
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    );
    !rejected && UnicodeWidthChar::width(ch).is_some()
}
