//! Integration tests for the Vector and Matrix types and their arithmetic.

use primer_math::math::{
    add, distance, dot, identity_matrix, magnitude, make_matrix, subtract, vector_mean,
    vector_sum, Matrix, Vector,
};
use primer_math::MathError;

fn samples() -> Vec<Vector> {
    vec![
        Vector::from(vec![1.0, 2.0, 3.0]),
        Vector::from(vec![-4.5, 0.0, 7.25]),
        Vector::from(vec![0.1, 0.2, 0.3]),
        Vector::from(vec![1e6, -1e-6, 42.0]),
    ]
}

// ---------------------------------------------------------------------------
// Vector arithmetic
// ---------------------------------------------------------------------------

#[test]
fn add_then_subtract_reconstructs() {
    for v in samples() {
        for w in samples() {
            let back = subtract(&add(&v, &w).unwrap(), &w).unwrap();
            for (a, b) in back.iter().zip(v.iter()) {
                assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} vs {}", a, b);
            }
        }
    }
}

#[test]
fn distance_is_zero_on_self_and_symmetric() {
    for v in samples() {
        assert_eq!(distance(&v, &v).unwrap(), 0.0);
        for w in samples() {
            assert_eq!(distance(&v, &w).unwrap(), distance(&w, &v).unwrap());
        }
    }
}

#[test]
fn dot_commutes_and_magnitude_is_non_negative() {
    for v in samples() {
        assert!(magnitude(&v) >= 0.0);
        for w in samples() {
            assert_eq!(dot(&v, &w).unwrap(), dot(&w, &v).unwrap());
        }
    }
}

#[test]
fn worked_examples() {
    let v = Vector::from(vec![1.0, 2.0, 3.0]);
    let w = Vector::from(vec![4.0, 5.0, 6.0]);
    assert_eq!(add(&v, &w).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(dot(&v, &w).unwrap(), 32.0);
    assert_eq!(magnitude(&Vector::from(vec![3.0, 4.0])), 5.0);
}

#[test]
fn mismatched_lengths_fail_fast() {
    let v = Vector::from(vec![1.0, 2.0]);
    let w = Vector::from(vec![1.0, 2.0, 3.0]);
    for result in [add(&v, &w), subtract(&v, &w)] {
        assert_eq!(
            result.unwrap_err(),
            MathError::LengthMismatch {
                expected: 2,
                found: 3
            }
        );
    }
    assert!(dot(&v, &w).is_err());
    assert!(distance(&v, &w).is_err());
    assert!(vector_sum(&[v.clone(), w.clone()]).is_err());
    assert!(vector_mean(&[v, w]).is_err());
}

#[test]
fn error_messages_are_readable() {
    let err = vector_mean(&[]).unwrap_err();
    assert_eq!(err.to_string(), "vector_mean requires a non-empty input");
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

#[test]
fn identity_matrix_shape_and_entries() {
    for n in 0..6 {
        let id = identity_matrix(n);
        assert_eq!(id.shape(), (n, n));
        for (i, row) in id.rows().enumerate() {
            for (j, &x) in row.iter().enumerate() {
                assert_eq!(x, if i == j { 1.0 } else { 0.0 });
            }
        }
    }
}

#[test]
fn matrix_from_rows_matches_generator() {
    let explicit = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 2.0], vec![2.0, 3.0]]).unwrap();
    let generated = make_matrix(3, 2, |i, j| (i + j) as f64);
    assert_eq!(explicit, generated);
    assert_eq!(generated.get_col(1).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn matrix_display() {
    let m = identity_matrix(2);
    assert_eq!(m.to_string(), "[1, 0]\n[0, 1]\n");
}
