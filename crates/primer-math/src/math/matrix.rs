use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{check_len, MathError, Result};
use crate::math::vector::Vector;

/// Rectangular matrix stored row-major. Every row has `cols` entries and an
/// empty matrix has zero columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        check_len(rows * cols, data.len())?;
        let cols = if rows == 0 { 0 } else { cols };
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from explicit rows, which must all share one length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            check_len(cols, row.len())?;
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, columns)`; columns is 0 for an empty matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> Result<&[f64]> {
        if row >= self.rows {
            return Err(MathError::IndexOutOfRange {
                index: row,
                len: self.rows,
            });
        }
        let start = self.offset(row, 0);
        Ok(&self.data[start..start + self.cols])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |row| {
            let start = self.offset(row, 0);
            &self.data[start..start + self.cols]
        })
    }

    pub fn get_row(&self, row: usize) -> Result<Vector> {
        self.row_slice(row).map(Vector::from)
    }

    pub fn get_col(&self, col: usize) -> Result<Vector> {
        if col >= self.cols {
            return Err(MathError::IndexOutOfRange {
                index: col,
                len: self.cols,
            });
        }
        Ok((0..self.rows).map(|row| self[(row, col)]).collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(index.1 < self.cols, "column index out of bounds");
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(index.1 < self.cols, "column index out of bounds");
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", Vector::from(row))?;
        }
        Ok(())
    }
}

/// `(number of rows, number of columns)` of `a`.
pub fn shape(a: &Matrix) -> (usize, usize) {
    a.shape()
}

pub fn get_row(a: &Matrix, i: usize) -> Result<Vector> {
    a.get_row(i)
}

pub fn get_col(a: &Matrix, j: usize) -> Result<Vector> {
    a.get_col(j)
}

/// Returns a `num_rows x num_cols` matrix whose `(i, j)` entry is
/// `entry_fn(i, j)`.
pub fn make_matrix<F>(num_rows: usize, num_cols: usize, mut entry_fn: F) -> Matrix
where
    F: FnMut(usize, usize) -> f64,
{
    let mut data = Vec::with_capacity(num_rows * num_cols);
    for i in 0..num_rows {
        for j in 0..num_cols {
            data.push(entry_fn(i, j));
        }
    }
    Matrix {
        data,
        rows: num_rows,
        cols: if num_rows == 0 { 0 } else { num_cols },
    }
}

pub fn identity_matrix(n: usize) -> Matrix {
    make_matrix(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
}
