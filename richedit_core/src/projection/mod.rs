//! Buffer-to-screen projection.
//!
//! Lays the buffer's cells out left to right, top to bottom inside a
//! viewport rectangle. Wrapping is purely column-count based: a row ends when
//! the right edge is reached or a line break is seen. Content past the bottom
//! edge is dropped (no scrolling). The cursor, when drawn, takes precedence
//! over whatever cell it sits on and is rendered by flipping reverse video on
//! both colors.

use crate::cell::{Attr, Cell, Glyph};
use crate::cursor::CursorView;
use crate::index::{Point, Rect};

/// Project `cells` into `area`, compositing the cursor described by `cursor`.
///
/// Line breaks produce no glyph. When the cursor sits on a line break it is
/// drawn as a reverse-video space where the break would be (end of that row).
/// When it sits past the last cell and nothing was clipped, a reverse-video
/// space is appended at the next free position.
pub fn project(cells: &[Cell], cursor: CursorView, area: Rect) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(cells.len().min(area.width.saturating_mul(area.height)) + 1);
    if area.is_empty() {
        return glyphs;
    }

    let right = area.right();
    let bottom = area.bottom();
    let mut col = area.x;
    let mut row = area.y;

    for (i, cell) in cells.iter().enumerate() {
        if cell.is_line_break() {
            let break_at = Point::new(col, row);
            row += 1;
            if row >= bottom {
                return glyphs;
            }
            col = area.x;
            if cursor.draws_at(i) {
                let mut glyph = Cell::new(' ', cell.fg, cell.bg).glyph_at(break_at);
                glyph.toggle_reverse();
                glyphs.push(glyph);
            }
            continue;
        }

        let mut glyph = cell.glyph_at(Point::new(col, row));
        if cursor.draws_at(i) {
            glyph.toggle_reverse();
        }
        glyphs.push(glyph);

        col += 1;
        if col >= right {
            col = area.x;
            row += 1;
            if row >= bottom {
                return glyphs;
            }
        }
    }

    if cursor.draws_at(cells.len()) {
        glyphs.push(Glyph {
            ch: ' ',
            fg: Attr::default_fg().reversed(),
            bg: Attr::default_bg().reversed(),
            point: Point::new(col, row),
        });
    }
    glyphs
}
