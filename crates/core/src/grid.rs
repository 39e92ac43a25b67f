//! Two-dimensional row-major grid of unbounded `f64` values.
//!
//! A `Grid` stores `cols * rows` values with `index = y * cols + x`. Unlike a
//! wrapping field, out-of-range coordinates are clamped to the nearest edge
//! cell, which is what flow-field sampling wants for particles that drift
//! off the viewport.

use crate::error::EngineError;

/// A `cols x rows` grid of `f64` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Builds a grid by evaluating `f(x, y)` for every cell in row-major order.
    ///
    /// Returns `EngineError::InvalidGrid` if either dimension is zero or if
    /// `cols * rows` overflows `usize`.
    pub fn from_fn(
        cols: usize,
        rows: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, EngineError> {
        let len = checked_len(cols, rows)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..rows {
            for x in 0..cols {
                data.push(f(x, y));
            }
        }
        Ok(Self { cols, rows, data })
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Read-only access to the row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(x, y)` with each axis clamped into the grid.
    pub fn get_clamped(&self, x: i64, y: i64) -> f64 {
        let xi = x.clamp(0, self.cols as i64 - 1) as usize;
        let yi = y.clamp(0, self.rows as i64 - 1) as usize;
        self.data[yi * self.cols + xi]
    }

    /// Replaces every value by re-evaluating `f(x, y)` in row-major order.
    pub fn refill(&mut self, mut f: impl FnMut(usize, usize) -> f64) {
        let cols = self.cols;
        self.data
            .iter_mut()
            .enumerate()
            .for_each(|(i, v)| *v = f(i % cols, i / cols));
    }

    #[cfg(test)]
    fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.cols && y < self.rows).then(|| self.data[y * self.cols + x])
    }
}

fn checked_len(cols: usize, rows: usize) -> Result<usize, EngineError> {
    let invalid = EngineError::InvalidGrid { cols, rows };
    if cols == 0 || rows == 0 {
        return Err(invalid);
    }
    cols.checked_mul(rows).ok_or(invalid)
}
