//! Two-dimensional views over flat slices.

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for [T] {}
}

use self::sealed::Sealed;

pub trait GridExt<T>: Sealed {
    /// Convert type into grid with a stride of `0`.
    ///
    /// See [GridExt::as_grid_with_stride].
    #[inline]
    fn as_grid(&self, columns: usize) -> SliceGrid<'_, T> {
        self.as_grid_with_stride(columns, 0)
    }

    /// Convert type into a grid with the given topology.
    ///
    /// The `columns` is the width of a row while `stride` is the number of
    /// elements skipped between rows, like the newline ending each row of
    /// puzzle input.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = b"abc\ndef\n";
    /// let grid = data.as_grid_with_stride(3, 1);
    ///
    /// assert_eq!(grid.rows_len(), 2);
    /// assert_eq!(grid.row(1), Some(&b"def"[..]));
    /// assert_eq!(grid.try_get(1, 2), Some(&b'f'));
    /// assert_eq!(grid.try_get(0, 3), None);
    /// ```
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> SliceGrid<'_, T>;
}

impl<T> GridExt<T> for [T] {
    #[inline]
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> SliceGrid<'_, T> {
        SliceGrid::new(self, columns, stride)
    }
}

pub trait Grid<T> {
    /// Access the specified row in the grid.
    fn row(&self, row: usize) -> Option<&[T]>;

    /// Get number of rows in the grid.
    fn rows_len(&self) -> usize;

    /// Get number of columns in the grid.
    fn columns_len(&self) -> usize;

    /// Get the element at the given row and column.
    #[inline]
    #[track_caller]
    fn get(&self, row: usize, column: usize) -> &T {
        match self.try_get(row, column) {
            Some(value) => value,
            None => panic!("missing row `{row}`, column `{column}`"),
        }
    }

    /// Get the element at the given row and column.
    #[inline]
    fn try_get(&self, row: usize, column: usize) -> Option<&T> {
        self.row(row)?.get(column)
    }
}

/// A grid backed by a slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceGrid<'a, T> {
    data: &'a [T],
    columns: usize,
    stride: usize,
}

impl<'a, T> SliceGrid<'a, T> {
    fn new(data: &'a [T], columns: usize, stride: usize) -> Self {
        Self {
            data,
            columns,
            stride,
        }
    }
}

impl<T> Grid<T> for SliceGrid<'_, T> {
    #[inline]
    fn row(&self, row: usize) -> Option<&[T]> {
        let start = row.checked_mul(self.columns + self.stride)?;
        self.data.get(start..start.checked_add(self.columns)?)
    }

    #[inline]
    fn rows_len(&self) -> usize {
        let width = self.columns + self.stride;

        if width == 0 {
            return 0;
        }

        // The trailing stride of the last row may be missing.
        (self.data.len() + self.stride) / width
    }

    #[inline]
    fn columns_len(&self) -> usize {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridExt};

    #[test]
    fn test_rows_without_trailing_stride() {
        let data = b"ab\ncd\nef";
        let grid = data.as_grid_with_stride(2, 1);

        assert_eq!(grid.rows_len(), 3);
        assert_eq!(grid.row(2), Some(&b"ef"[..]));
        assert_eq!(grid.row(3), None);
        assert_eq!(*grid.get(1, 0), b'c');
    }
}
