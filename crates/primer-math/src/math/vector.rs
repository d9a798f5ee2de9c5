use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::error::{check_len, MathError, Result};

/// Fixed-length sequence of reals. Operations return new vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::new(data)
    }

    pub fn zeros(len: usize) -> Self {
        Self::from_elem(len, 0.0)
    }

    pub fn from_elem(len: usize, value: f64) -> Self {
        Vector::from_vec(vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, f64> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn mapv<F>(&self, mut f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        self.data.iter().map(|&v| f(v)).collect()
    }

    /// Checked element access.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<&[f64]> for Vector {
    fn from(value: &[f64]) -> Self {
        Vector::from_vec(value.to_vec())
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

fn zip_with<F>(v: &Vector, w: &Vector, f: F) -> Result<Vector>
where
    F: Fn(f64, f64) -> f64,
{
    check_len(v.len(), w.len())?;
    Ok(v.iter().zip(w.iter()).map(|(&a, &b)| f(a, b)).collect())
}

/// Element-wise `v + w`.
pub fn add(v: &Vector, w: &Vector) -> Result<Vector> {
    zip_with(v, w, |a, b| a + b)
}

/// Element-wise `v - w`.
pub fn subtract(v: &Vector, w: &Vector) -> Result<Vector> {
    zip_with(v, w, |a, b| a - b)
}

/// Position-wise sum of a non-empty collection of equal-length vectors.
pub fn vector_sum(vectors: &[Vector]) -> Result<Vector> {
    let first = vectors.first().ok_or(MathError::EmptyInput("vector_sum"))?;
    let mut acc = first.clone();
    for v in &vectors[1..] {
        check_len(acc.len(), v.len())?;
        for (a, b) in acc.iter_mut().zip(v.iter()) {
            *a += b;
        }
    }
    Ok(acc)
}

pub fn scalar_multiply(c: f64, v: &Vector) -> Vector {
    v.mapv(|x| c * x)
}

/// Position-wise mean of a non-empty collection of equal-length vectors.
pub fn vector_mean(vectors: &[Vector]) -> Result<Vector> {
    if vectors.is_empty() {
        return Err(MathError::EmptyInput("vector_mean"));
    }
    let n = vectors.len() as f64;
    Ok(scalar_multiply(1.0 / n, &vector_sum(vectors)?))
}

pub fn dot(v: &Vector, w: &Vector) -> Result<f64> {
    check_len(v.len(), w.len())?;
    Ok(dot_scalar_f64(v.as_slice(), w.as_slice()))
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

pub fn sum_of_squares(v: &Vector) -> f64 {
    dot_scalar_f64(v.as_slice(), v.as_slice())
}

/// Euclidean length of `v`.
pub fn magnitude(v: &Vector) -> f64 {
    sum_of_squares(v).sqrt()
}

pub fn squared_distance(v: &Vector, w: &Vector) -> Result<f64> {
    Ok(sum_of_squares(&subtract(v, w)?))
}

pub fn distance(v: &Vector, w: &Vector) -> Result<f64> {
    Ok(magnitude(&subtract(v, w)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(values: &[f64]) -> Vector {
        Vector::from(values)
    }

    #[test]
    fn add_and_subtract() {
        let v = vec_of(&[1.0, 2.0, 3.0]);
        let w = vec_of(&[4.0, 5.0, 6.0]);
        assert_eq!(add(&v, &w).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!(
            subtract(&vec_of(&[5.0, 7.0, 9.0]), &w).unwrap().to_vec(),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn add_rejects_mismatched_lengths() {
        let err = add(&vec_of(&[1.0]), &vec_of(&[1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            MathError::LengthMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn sums_and_means() {
        let vs = vec![
            vec_of(&[1.0, 2.0]),
            vec_of(&[3.0, 4.0]),
            vec_of(&[5.0, 6.0]),
            vec_of(&[7.0, 8.0]),
        ];
        assert_eq!(vector_sum(&vs).unwrap().to_vec(), vec![16.0, 20.0]);
        assert_eq!(vector_mean(&vs[..3]).unwrap().to_vec(), vec![3.0, 4.0]);
        assert_eq!(scalar_multiply(2.0, &vec_of(&[1.0, 2.0, 3.0])).to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn aggregates_reject_empty_input() {
        assert!(matches!(vector_sum(&[]), Err(MathError::EmptyInput(_))));
        assert!(matches!(vector_mean(&[]), Err(MathError::EmptyInput(_))));
    }

    #[test]
    fn vector_sum_rejects_ragged_rows() {
        let vs = vec![vec_of(&[1.0, 2.0]), vec_of(&[3.0])];
        assert!(matches!(
            vector_sum(&vs),
            Err(MathError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn euclidean_helpers() {
        let v = vec_of(&[1.0, 2.0, 3.0]);
        let w = vec_of(&[4.0, 5.0, 6.0]);
        assert_eq!(dot(&v, &w).unwrap(), 32.0);
        assert_eq!(sum_of_squares(&v), 14.0);
        assert_eq!(magnitude(&vec_of(&[3.0, 4.0])), 5.0);
        assert_eq!(squared_distance(&v, &w).unwrap(), 27.0);
        assert!((distance(&v, &w).unwrap() - 27f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn checked_get() {
        let v = vec_of(&[1.0]);
        assert_eq!(v.get(0).unwrap(), 1.0);
        assert_eq!(
            v.get(3).unwrap_err(),
            MathError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn display_formats_as_list() {
        assert_eq!(vec_of(&[1.0, 2.5]).to_string(), "[1, 2.5]");
    }
}
