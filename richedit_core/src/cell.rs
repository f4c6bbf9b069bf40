//! Cell and glyph types.
//!
//! A `Cell` is one stored character with its foreground and background
//! attributes. A `Glyph` is a cell placed at a screen coordinate, ready for
//! the host renderer. Attributes pair a color with style flags; reverse video
//! is a flag bit so the cursor can be composited by XOR.

use bitflags::bitflags;
use vte::ansi::{Color, NamedColor};

use crate::index::Point;

bitflags! {
    /// Style bits carried alongside a color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u8 {
        const BOLD      = 1 << 0;
        const UNDERLINE = 1 << 1;
        const REVERSE   = 1 << 2;
    }
}

impl Default for AttrFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A color plus style flags, used for both foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    pub color: Color,
    pub flags: AttrFlags,
}

impl Attr {
    /// Attribute with the given color and no style flags.
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            flags: AttrFlags::empty(),
        }
    }

    /// The terminal's default foreground.
    pub const fn default_fg() -> Self {
        Self::new(Color::Named(NamedColor::Foreground))
    }

    /// The terminal's default background.
    pub const fn default_bg() -> Self {
        Self::new(Color::Named(NamedColor::Background))
    }

    /// Returns a copy with the given flags added.
    #[must_use]
    pub fn with_flags(mut self, flags: AttrFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Returns a copy with the reverse-video bit flipped.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.flags ^= AttrFlags::REVERSE;
        self
    }

    /// Whether reverse video is set.
    pub fn is_reverse(&self) -> bool {
        self.flags.contains(AttrFlags::REVERSE)
    }
}

/// One stored character with its colors.
///
/// Cells are never edited in place: an edit replaces them wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Attr,
    pub bg: Attr,
}

impl Cell {
    pub const fn new(ch: char, fg: Attr, bg: Attr) -> Self {
        Self { ch, fg, bg }
    }

    /// Whether this cell is a line break.
    pub fn is_line_break(&self) -> bool {
        self.ch == '\n'
    }

    /// Place this cell on screen.
    pub fn glyph_at(&self, point: Point) -> Glyph {
        Glyph {
            ch: self.ch,
            fg: self.fg,
            bg: self.bg,
            point,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Attr::default_fg(), Attr::default_bg())
    }
}

/// A character positioned on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Attr,
    pub bg: Attr,
    pub point: Point,
}

impl Glyph {
    /// Flip reverse video on both attributes.
    pub fn toggle_reverse(&mut self) {
        self.fg = self.fg.reversed();
        self.bg = self.bg.reversed();
    }
}
