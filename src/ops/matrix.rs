// src/ops/matrix.rs
// Dense matrix operations on row-major nested arrays
//
// Every input must be non-empty and rectangular. The determinant uses
// cofactor expansion along the first row, which is O(n!) and meant for
// small matrices.

use crate::error::{DomainError, Result};
use crate::format::{self, num};
use crate::registry::{Args, Handler, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "matrix";

pub type Matrix = Vec<Vec<f64>>;

type Computed<T> = std::result::Result<T, DomainError>;

/// Pivots smaller than this mark the matrix as singular
const SINGULAR_EPSILON: f64 = 1e-10;

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        two("matrix_add", "Matrix addition", "Element-wise sum of two matrices", matrix_add),
        two(
            "matrix_subtract",
            "Matrix subtraction",
            "Element-wise difference of two matrices",
            matrix_subtract,
        ),
        two(
            "matrix_multiply",
            "Matrix multiplication",
            "Standard product A × B",
            matrix_multiply,
        ),
        one("matrix_transpose", "Matrix transpose", "Transpose of a matrix", matrix_transpose),
        one(
            "matrix_determinant",
            "Determinant",
            "Determinant of a square matrix",
            matrix_determinant,
        ),
        one(
            "matrix_inverse",
            "Matrix inverse",
            "Inverse of a square matrix by Gauss-Jordan elimination",
            matrix_inverse,
        ),
        one(
            "matrix_trace",
            "Trace",
            "Sum of the diagonal of a square matrix",
            matrix_trace,
        ),
    ]
}

fn two(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::matrix("matrix_a", "First matrix (array of rows)"))
        .param(ParameterSpec::matrix("matrix_b", "Second matrix (array of rows)"))
}

fn one(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, description, handler)
        .param(ParameterSpec::matrix("matrix", "Input matrix (array of rows)"))
}

/// (rows, cols) of a non-empty rectangular matrix
pub fn shape(m: &Matrix) -> Computed<(usize, usize)> {
    let cols = m.first().map(Vec::len).unwrap_or(0);
    if m.is_empty() || cols == 0 {
        return Err(DomainError::Empty("Matrix"));
    }
    if let Some(i) = m.iter().position(|row| row.len() != cols) {
        return Err(DomainError::DimensionMismatch(format!(
            "row {} has {} columns, expected {}",
            i,
            m[i].len(),
            cols
        )));
    }
    Ok((m.len(), cols))
}

fn square(m: &Matrix, what: &'static str) -> Computed<usize> {
    let (rows, cols) = shape(m)?;
    if rows != cols {
        return Err(DomainError::NotSquare(what));
    }
    Ok(rows)
}

fn elementwise(a: &Matrix, b: &Matrix, f: impl Fn(f64, f64) -> f64) -> Computed<Matrix> {
    let sa = shape(a)?;
    let sb = shape(b)?;
    if sa != sb {
        return Err(DomainError::DimensionMismatch(format!(
            "{}x{} and {}x{} matrices must have the same dimensions",
            sa.0, sa.1, sb.0, sb.1
        )));
    }
    Ok(a.iter()
        .zip(b)
        .map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| f(*x, *y)).collect())
        .collect())
}

pub fn add(a: &Matrix, b: &Matrix) -> Computed<Matrix> {
    elementwise(a, b, |x, y| x + y)
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Computed<Matrix> {
    elementwise(a, b, |x, y| x - y)
}

pub fn multiply(a: &Matrix, b: &Matrix) -> Computed<Matrix> {
    let (_, a_cols) = shape(a)?;
    let (b_rows, b_cols) = shape(b)?;
    if a_cols != b_rows {
        return Err(DomainError::DimensionMismatch(format!(
            "columns of the first matrix ({}) must equal rows of the second ({})",
            a_cols, b_rows
        )));
    }
    Ok(a.iter()
        .map(|row| {
            (0..b_cols)
                .map(|j| row.iter().zip(b).map(|(x, b_row)| x * b_row[j]).sum())
                .collect()
        })
        .collect())
}

pub fn transpose(m: &Matrix) -> Computed<Matrix> {
    let (rows, cols) = shape(m)?;
    Ok((0..cols)
        .map(|j| (0..rows).map(|i| m[i][j]).collect())
        .collect())
}

pub fn determinant(m: &Matrix) -> Computed<f64> {
    square(m, "determinant")?;
    Ok(cofactor_expansion(m))
}

fn cofactor_expansion(m: &Matrix) -> f64 {
    match m.len() {
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        n => (0..n)
            .map(|i| {
                let minor: Matrix = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(j, _)| *j != i)
                            .map(|(_, v)| *v)
                            .collect()
                    })
                    .collect();
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[0][i] * cofactor_expansion(&minor)
            })
            .sum(),
    }
}

/// Gauss-Jordan elimination on `[A | I]` with partial pivoting
pub fn inverse(m: &Matrix) -> Computed<Matrix> {
    let n = square(m, "inverse")?;

    let mut aug: Matrix = m
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            r
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col + 1..n).fold(col, |best, k| {
            if aug[k][col].abs() > aug[best][col].abs() { k } else { best }
        });
        aug.swap(col, pivot_row);

        let pivot = aug[col][col];
        if pivot.abs() < SINGULAR_EPSILON {
            return Err(DomainError::Singular);
        }
        for v in aug[col].iter_mut() {
            *v /= pivot;
        }

        let pivot_values = aug[col].clone();
        for (k, row) in aug.iter_mut().enumerate() {
            if k == col {
                continue;
            }
            let factor = row[col];
            for (v, p) in row.iter_mut().zip(&pivot_values) {
                *v -= factor * p;
            }
        }
    }

    Ok(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

pub fn trace(m: &Matrix) -> Computed<f64> {
    let n = square(m, "trace")?;
    Ok((0..n).map(|i| m[i][i]).sum())
}

fn pair(args: &Args) -> Result<(Matrix, Matrix)> {
    Ok((args.matrix("matrix_a")?, args.matrix("matrix_b")?))
}

fn matrix_add(args: &Args) -> Result<Response> {
    let (a, b) = pair(args)?;
    let r = add(&a, &b)?;
    Ok(Response::success(format!(
        "Matrix addition result:\n{}",
        format::matrix(&r, None)
    )))
}

fn matrix_subtract(args: &Args) -> Result<Response> {
    let (a, b) = pair(args)?;
    let r = subtract(&a, &b)?;
    Ok(Response::success(format!(
        "Matrix subtraction result:\n{}",
        format::matrix(&r, None)
    )))
}

fn matrix_multiply(args: &Args) -> Result<Response> {
    let (a, b) = pair(args)?;
    let r = multiply(&a, &b)?;
    Ok(Response::success(format!(
        "Matrix multiplication result:\n{}",
        format::matrix(&r, None)
    )))
}

fn matrix_transpose(args: &Args) -> Result<Response> {
    let m = args.matrix("matrix")?;
    let r = transpose(&m)?;
    Ok(Response::success(format!(
        "Matrix transpose result:\n{}",
        format::matrix(&r, None)
    )))
}

fn matrix_determinant(args: &Args) -> Result<Response> {
    let m = args.matrix("matrix")?;
    let d = determinant(&m)?;
    Ok(Response::success(format!("Matrix determinant: det = {}", num(d))))
}

fn matrix_inverse(args: &Args) -> Result<Response> {
    let m = args.matrix("matrix")?;
    let inv = inverse(&m)?;
    Ok(Response::success(format!(
        "Inverse matrix:\n{}",
        format::matrix(&inv, Some(6))
    )))
}

fn matrix_trace(args: &Args) -> Result<Response> {
    let m = args.matrix("matrix")?;
    let t = trace(&m)?;
    Ok(Response::success(format!("Matrix trace: tr = {}", num(t))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn call(op: &str, raw: Value) -> Result<Response> {
        crate::ops::testing::call(operations(), op, raw)
    }

    fn m(rows: &[&[f64]]) -> Matrix {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    // ============================================================================
    // Shape checks
    // ============================================================================

    #[test]
    fn test_empty_rejected() {
        assert_eq!(shape(&vec![]), Err(DomainError::Empty("Matrix")));
        assert_eq!(shape(&vec![vec![]]), Err(DomainError::Empty("Matrix")));
    }

    #[test]
    fn test_ragged_rejected() {
        let ragged = m(&[&[1.0, 2.0], &[3.0]]);
        assert!(matches!(shape(&ragged), Err(DomainError::DimensionMismatch(_))));
        assert!(transpose(&ragged).is_err());
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[1.0], &[2.0]]);
        assert!(add(&a, &b).is_err());
    }

    // ============================================================================
    // Products and transforms
    // ============================================================================

    #[test]
    fn test_multiply() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        assert_eq!(multiply(&a, &b).unwrap(), m(&[&[19.0, 22.0], &[43.0, 50.0]]));
        assert!(multiply(&a, &m(&[&[1.0, 2.0, 3.0]])).is_err());
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(
            transpose(&a).unwrap(),
            m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]])
        );
    }

    #[test]
    fn test_determinant() {
        assert_eq!(determinant(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap(), -2.0);
        let identity = m(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]]);
        assert_eq!(determinant(&identity).unwrap(), 1.0);
        let a = m(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 2.0]]);
        assert_eq!(determinant(&a).unwrap(), 6.0);
        assert_eq!(
            determinant(&m(&[&[1.0, 2.0]])),
            Err(DomainError::NotSquare("determinant"))
        );
    }

    #[test]
    fn test_inverse_reconstructs_identity() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let inv = inverse(&a).unwrap();
        let product = multiply(&inv, &a).unwrap();
        for (i, row) in product.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_inverse_needs_pivoting() {
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(inverse(&a).unwrap(), a);
    }

    #[test]
    fn test_singular() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(inverse(&a), Err(DomainError::Singular));
    }

    #[test]
    fn test_inverse_text() {
        let r = call("matrix_inverse", json!({"matrix": [[4, 7], [2, 6]]})).unwrap();
        assert_eq!(
            r.text(),
            "Inverse matrix:\n[0.600000, -0.700000]\n[-0.200000, 0.400000]"
        );
    }

    #[test]
    fn test_trace() {
        assert_eq!(trace(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap(), 5.0);
        assert!(call("matrix_trace", json!({"matrix": [[1, 2, 3]]})).is_err());
    }
}
