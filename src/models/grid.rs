//! Grid geometry derived from a measured container.

use serde::{Deserialize, Serialize};

/// Derived geometry for rendering a key set inside a measured container.
///
/// Invariant: `columns * rows >= key_count`, and `placeholder_count` is the
/// number of trailing cells left empty to keep the grid rectangular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of grid columns.
    pub columns: u16,
    /// Number of grid rows.
    pub rows: u16,
    /// Width of one cell in terminal columns.
    pub cell_width: u16,
    /// Height of one cell in terminal lines.
    pub cell_height: u16,
    /// Trailing cells not backed by a key slot.
    pub placeholder_count: usize,
}

impl GridLayout {
    /// Computes the grid geometry for `key_count` keys in a container of the
    /// given size.
    ///
    /// `rows` is `ceil(key_count / columns)`, so the grid always has room for
    /// every key even when the key count is not a multiple of the column
    /// count; the excess cells become placeholders.
    #[must_use]
    pub fn compute(
        container_width: u16,
        container_height: u16,
        key_count: usize,
        columns: u16,
    ) -> Self {
        let columns = columns.max(1);
        let rows = (key_count.div_ceil(usize::from(columns)).max(1)) as u16;
        let cells = usize::from(columns) * usize::from(rows);
        Self {
            columns,
            rows,
            cell_width: container_width / columns,
            cell_height: (container_height / rows).max(1),
            placeholder_count: cells.saturating_sub(key_count),
        }
    }

    /// Total cell count of the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let layout = GridLayout::compute(50, 18, 30, 5);
        assert_eq!(layout.rows, 6);
        assert_eq!(layout.cell_width, 10);
        assert_eq!(layout.cell_height, 3);
        assert_eq!(layout.placeholder_count, 0);
    }

    #[test]
    fn test_placeholders_for_ragged_last_row() {
        let layout = GridLayout::compute(60, 20, 26, 5);
        assert_eq!(layout.rows, 6);
        assert_eq!(layout.placeholder_count, 4);
        assert!(layout.cell_count() >= 26);
    }

    #[test]
    fn test_zero_columns_is_clamped() {
        let layout = GridLayout::compute(40, 10, 26, 0);
        assert_eq!(layout.columns, 1);
        assert!(layout.cell_count() >= 26);
    }

    #[test]
    fn test_tiny_container_keeps_nonzero_cell_height() {
        let layout = GridLayout::compute(10, 2, 30, 5);
        assert!(layout.cell_height >= 1);
    }
}
