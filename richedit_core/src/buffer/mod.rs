//! Cell buffer: the widget's text storage.
//!
//! A flat, ordered `Vec<Cell>` edited by splicing at an offset. Buffers here
//! hold interactive text, not large documents, so insert and delete are
//! O(tail length). All offsets and counts are clamped, never rejected.

use std::fmt;

use crate::cell::{Attr, Cell};

/// Ordered sequence of colored characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of cells, line breaks included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of the cells in document order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Insert `text` at `offset`, tagging every new cell with `fg`/`bg`.
    ///
    /// `offset` is clamped to the buffer length. With `multi_line` off, line
    /// breaks are dropped instead of inserted. Returns the number of cells
    /// actually inserted.
    pub fn insert(&mut self, offset: usize, text: &str, fg: Attr, bg: Attr, multi_line: bool) -> usize {
        let offset = offset.min(self.cells.len());
        let before = self.cells.len();
        let new_cells = text
            .chars()
            .filter(|&ch| multi_line || ch != '\n')
            .map(|ch| Cell::new(ch, fg, bg));
        self.cells.splice(offset..offset, new_cells);
        self.cells.len() - before
    }

    /// Delete a run of cells around `offset`.
    ///
    /// Positive `n` deletes forward from `offset`, negative `n` deletes
    /// backward ending at `offset`. The run is clipped to the buffer, so this
    /// never fails. Returns the number of cells removed.
    pub fn delete(&mut self, offset: usize, n: isize) -> usize {
        let offset = offset.min(self.cells.len());
        let range = if n > 0 {
            let end = offset.saturating_add(n.unsigned_abs()).min(self.cells.len());
            offset..end
        } else if n < 0 {
            let start = offset.saturating_sub(n.unsigned_abs());
            start..offset
        } else {
            return 0;
        };
        let removed = range.len();
        self.cells.drain(range);
        removed
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The buffer's characters as a flat string, colors discarded.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;

        for cell in &self.cells {
            f.write_char(cell.ch)?;
        }
        Ok(())
    }
}
