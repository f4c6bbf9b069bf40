//! The text widget: buffer, cursor, and projection behind one thread-safe
//! handle.
//!
//! `Widget` is shared by the host's input handling and the cursor's blink
//! thread. Buffer contents and the cursor offset sit behind one `RwLock`, so
//! an edit and the offset move it implies are a single step as far as
//! `render` is concerned. Cursor show/hide/restart is serialized separately
//! inside [`Cursor`]. The document lock is always released before the cursor
//! is restarted and before dirty handlers run.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::buffer::Buffer;
use crate::cell::{Attr, Glyph};
use crate::cursor::{BLINK_RATE, Cursor};
use crate::event::{DirtyHandlers, HandlerId};
use crate::index::Rect;
use crate::projection::project;

/// The host block the widget is drawn into.
///
/// The host owns position, size, and any border or title chrome. The widget
/// re-reads the bounds on every render, so hosts may change them at any time.
pub trait Container {
    /// Region the text is laid out in (inside any border).
    fn inner_bounds(&self) -> Rect;

    /// Glyphs drawn beneath the text, such as a border or title.
    fn chrome(&self) -> Vec<Glyph> {
        Vec::new()
    }
}

/// A bare rectangle with no chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub bounds: Rect,
}

impl Viewport {
    pub const fn new(bounds: Rect) -> Self {
        Self { bounds }
    }
}

impl Container for Viewport {
    fn inner_bounds(&self) -> Rect {
        self.bounds
    }
}

/// Buffer plus cursor offset. Invariant: `cursor <= buffer.len()`.
#[derive(Debug, Default)]
struct Document {
    buffer: Buffer,
    cursor: usize,
}

impl Document {
    /// Clamp a signed offset into `[0, len]`.
    fn clamp(&self, pos: isize) -> usize {
        usize::try_from(pos).map_or(0, |p| p.min(self.buffer.len()))
    }

    /// Offset moved by `delta`, clamped into `[0, len]`.
    fn offset_by(&self, delta: isize) -> usize {
        if delta >= 0 {
            self.cursor.saturating_add(delta.unsigned_abs()).min(self.buffer.len())
        } else {
            self.cursor.saturating_sub(delta.unsigned_abs())
        }
    }
}

/// Settings read on every write.
#[derive(Debug, Clone, Copy)]
struct Settings {
    write_fg: Attr,
    write_bg: Attr,
    multi_line: bool,
    wrap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            write_fg: Attr::default_fg(),
            write_bg: Attr::default_bg(),
            multi_line: true,
            wrap: false,
        }
    }
}

/// Rich single/multi-line text editing widget.
///
/// Every operation clamps out-of-range arguments; none of them fail.
pub struct Widget<C: Container = Viewport> {
    container: RwLock<C>,
    doc: RwLock<Document>,
    settings: RwLock<Settings>,
    cursor: Cursor,
    dirty: Arc<DirtyHandlers>,
}

impl<C: Container> Widget<C> {
    /// Create an empty, multi-line widget with a hidden cursor.
    pub fn new(container: C) -> Self {
        Self::with_blink_period(container, BLINK_RATE)
    }

    /// Like [`new`](Self::new) with a custom cursor blink period.
    pub fn with_blink_period(container: C, period: Duration) -> Self {
        let dirty = Arc::new(DirtyHandlers::new());
        Self {
            container: RwLock::new(container),
            doc: RwLock::new(Document::default()),
            settings: RwLock::new(Settings::default()),
            cursor: Cursor::with_period(Arc::clone(&dirty), period),
            dirty,
        }
    }

    // --- Rendering -------------------------------------------------------

    /// Chrome glyphs followed by the projected text, ready to draw.
    pub fn render(&self) -> Vec<Glyph> {
        let (mut glyphs, bounds) = {
            let container = self.container.read();
            (container.chrome(), container.inner_bounds())
        };
        let doc = self.doc.read();
        let cursor = self.cursor.view(doc.cursor);
        glyphs.extend(project(doc.buffer.cells(), cursor, bounds));
        glyphs
    }

    /// Current text area.
    pub fn inner_bounds(&self) -> Rect {
        self.container.read().inner_bounds()
    }

    /// Read the container.
    pub fn with_container<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.container.read())
    }

    /// Mutate the container (move, resize, retitle) and mark dirty.
    pub fn update_container(&self, f: impl FnOnce(&mut C)) {
        f(&mut self.container.write());
        self.dirty.notify();
    }

    // --- Editing ---------------------------------------------------------

    /// Insert `text` at the cursor using the write colors, then move the
    /// cursor past it. In single-line mode line breaks are dropped. Returns
    /// the number of characters inserted.
    pub fn write_str(&self, text: &str) -> usize {
        let settings = *self.settings.read();
        let inserted = {
            let mut doc = self.doc.write();
            let at = doc.cursor;
            let inserted = doc
                .buffer
                .insert(at, text, settings.write_fg, settings.write_bg, settings.multi_line);
            doc.cursor = at + inserted;
            inserted
        };
        log::trace!("widget: inserted {inserted} chars");
        self.cursor.restart();
        self.dirty.notify();
        inserted
    }

    /// Delete `n` characters at the cursor: forward for positive `n`,
    /// backward (moving the cursor) for negative `n`. Clipped to the buffer.
    ///
    /// Always marks the widget dirty, even when nothing was removed.
    pub fn delete(&self, n: isize) {
        let removed = {
            let mut doc = self.doc.write();
            let at = doc.cursor;
            let removed = doc.buffer.delete(at, n);
            if n < 0 {
                doc.cursor = at - removed;
            }
            removed
        };
        log::trace!("widget: delete({n}) removed {removed}");
        if n < 0 {
            self.cursor.restart();
        }
        self.dirty.notify();
    }

    /// Full text content, colors discarded.
    pub fn text(&self) -> String {
        self.doc.read().buffer.text()
    }

    /// Number of characters, line breaks included.
    pub fn len(&self) -> usize {
        self.doc.read().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.read().buffer.is_empty()
    }

    // --- Cursor ----------------------------------------------------------

    /// Move the cursor to `pos`, clamped into `[0, len]`.
    ///
    /// A visible cursor restarts its blink so it is drawn solid right after
    /// the move.
    pub fn set_cursor_pos(&self, pos: isize) {
        {
            let mut doc = self.doc.write();
            doc.cursor = doc.clamp(pos);
        }
        self.cursor.restart();
    }

    /// Move the cursor by `delta` characters, clamped into `[0, len]`.
    pub fn move_cursor(&self, delta: isize) {
        {
            let mut doc = self.doc.write();
            doc.cursor = doc.offset_by(delta);
        }
        self.cursor.restart();
    }

    /// Cursor offset into the buffer.
    pub fn cursor_pos(&self) -> usize {
        self.doc.read().cursor
    }

    /// Show the cursor and start blinking.
    pub fn cursor_show(&self) {
        self.cursor.show();
    }

    /// Hide the cursor and stop blinking.
    pub fn cursor_hide(&self) {
        self.cursor.hide();
    }

    /// Whether the cursor is shown and the widget accepts editing input.
    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    // --- Notifications ---------------------------------------------------

    /// Register a callback run after any change that affects rendering.
    ///
    /// Callbacks may run on the cursor blink thread and must not edit the
    /// widget synchronously.
    pub fn add_dirty_handler<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.dirty.add(handler)
    }

    /// Unregister a callback added with [`add_dirty_handler`](Self::add_dirty_handler).
    pub fn remove_dirty_handler(&self, id: HandlerId) -> bool {
        self.dirty.remove(id)
    }

    // --- Settings --------------------------------------------------------

    /// Set the wrap flag. Marks dirty only when the value changes.
    ///
    /// Layout currently wraps by column count regardless of this flag.
    pub fn set_wrap(&self, wrap: bool) {
        let changed = {
            let mut settings = self.settings.write();
            let changed = settings.wrap != wrap;
            settings.wrap = wrap;
            changed
        };
        if changed {
            self.dirty.notify();
        }
    }

    pub fn wrap_on(&self) {
        self.set_wrap(true);
    }

    pub fn wrap_off(&self) {
        self.set_wrap(false);
    }

    pub fn wrap(&self) -> bool {
        self.settings.read().wrap
    }

    /// Allow or drop line breaks in subsequent writes.
    pub fn set_multi_line(&self, multi_line: bool) {
        self.settings.write().multi_line = multi_line;
    }

    pub fn multi_line(&self) -> bool {
        self.settings.read().multi_line
    }

    /// Colors applied to subsequently written text.
    pub fn set_write_attrs(&self, fg: Attr, bg: Attr) {
        let mut settings = self.settings.write();
        settings.write_fg = fg;
        settings.write_bg = bg;
    }

    /// Current write colors as `(fg, bg)`.
    pub fn write_attrs(&self) -> (Attr, Attr) {
        let settings = self.settings.read();
        (settings.write_fg, settings.write_bg)
    }
}

impl<C: Container> fmt::Display for Widget<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.doc.read().buffer, f)
    }
}

impl<C: Container> fmt::Debug for Widget<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.read();
        f.debug_struct("Widget")
            .field("len", &doc.buffer.len())
            .field("cursor_pos", &doc.cursor)
            .field("cursor", &self.cursor)
            .field("settings", &*self.settings.read())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

/// Byte sink that writes text at the cursor. Invalid UTF-8 is replaced.
impl<C: Container> io::Write for &Widget<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: Container> io::Write for Widget<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
