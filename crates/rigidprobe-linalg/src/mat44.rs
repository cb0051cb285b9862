use faer::prelude::SolverCore;

use crate::LinalgError;

/// A 4x4 row-major matrix.
pub type Mat44 = [[f64; 4]; 4];

/// The 4x4 identity matrix.
pub const IDENTITY44: Mat44 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Determinant magnitude, relative to the product of the row norms, at or
/// below which a matrix is treated as singular.
///
/// The product of the row norms bounds the determinant (Hadamard), so the
/// ratio does not depend on the scale of the coordinates.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Multiply a row vector by a 4x4 matrix, `v * m`.
///
/// Example:
///
/// ```
/// use rigidprobe_linalg::mat44::{vecmat4, IDENTITY44};
///
/// let v = [1.0, 2.0, 3.0, 1.0];
/// assert_eq!(vecmat4(&v, &IDENTITY44), v);
/// ```
pub fn vecmat4(v: &[f64; 4], m: &Mat44) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (j, val) in out.iter_mut().enumerate() {
        *val = v[0] * m[0][j] + v[1] * m[1][j] + v[2] * m[2][j] + v[3] * m[3][j];
    }
    out
}

/// Multiply two 4x4 matrices, `m = a * b`.
///
/// # Arguments
///
/// * `a` - The left hand side matrix.
/// * `b` - The right hand side matrix.
/// * `m` - The output matrix.
pub fn matmul44(a: &Mat44, b: &Mat44, m: &mut Mat44) {
    for (row_a, row_m) in a.iter().zip(m.iter_mut()) {
        *row_m = vecmat4(row_a, b);
    }
}

/// Entrywise difference of two N x 4 blocks, `dst = a - b`.
pub fn sub_rows4(
    a: &[[f64; 4]],
    b: &[[f64; 4]],
    dst: &mut [[f64; 4]],
) -> Result<(), LinalgError> {
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch(a.len(), b.len()));
    }
    if a.len() != dst.len() {
        return Err(LinalgError::DimensionMismatch(a.len(), dst.len()));
    }

    for ((row_a, row_b), row_dst) in a.iter().zip(b.iter()).zip(dst.iter_mut()) {
        for k in 0..4 {
            row_dst[k] = row_a[k] - row_b[k];
        }
    }

    Ok(())
}

/// Transpose a 4x4 matrix.
pub fn transpose44(m: &Mat44) -> Mat44 {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = m[j][i];
        }
    }
    out
}

/// Compute the determinant of a 4x4 matrix.
///
/// Uses the Laplace expansion over the 2x2 minors of the first two rows and
/// their complementary minors in the last two rows.
pub fn det_mat44(m: &Mat44) -> f64 {
    // minors of rows 0 and 1
    let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
    let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
    let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
    let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
    let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
    let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

    // minors of rows 2 and 3
    let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
    let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
    let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
    let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
    let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
    let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

    s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
}

/// Product of the euclidean norms of the rows, an upper bound of `|det(m)|`.
pub fn hadamard_bound44(m: &Mat44) -> f64 {
    m.iter()
        .map(|row| row.iter().map(|x| x * x).sum::<f64>().sqrt())
        .product()
}

/// Whether `|det(m)|` is negligible compared to [`hadamard_bound44`].
pub fn is_singular44(m: &Mat44) -> bool {
    let det = det_mat44(m);
    !det.is_finite() || det.abs() <= SINGULAR_EPSILON * hadamard_bound44(m)
}

/// Compute the inverse of a 4x4 matrix.
///
/// The inverse is computed with a partial pivoting LU decomposition.
///
/// # Arguments
///
/// * `m` - The matrix to invert.
///
/// # Returns
///
/// The inverse matrix, or [`LinalgError::SingularMatrix`] if the matrix is
/// singular according to [`is_singular44`].
///
/// Example:
///
/// ```
/// use rigidprobe_linalg::mat44::{inverse_mat44, IDENTITY44};
///
/// let inv = inverse_mat44(&IDENTITY44).unwrap();
/// assert_eq!(inv, IDENTITY44);
/// ```
pub fn inverse_mat44(m: &Mat44) -> Result<Mat44, LinalgError> {
    if is_singular44(m) {
        return Err(LinalgError::SingularMatrix(det_mat44(m)));
    }

    let mat = faer::Mat::<f64>::from_fn(4, 4, |i, j| m[i][j]);
    let inv = mat.partial_piv_lu().inverse();

    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = inv.read(i, j);
        }
    }

    if out.iter().flatten().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFiniteInverse);
    }

    Ok(out)
}

/// Round every entry to the nearest integer.
///
/// Negative zeros are normalized to positive zero.
pub fn round_mat44(m: &Mat44) -> Mat44 {
    let mut out = [[0.0; 4]; 4];
    for (row_out, row_m) in out.iter_mut().zip(m.iter()) {
        for (val, &x) in row_out.iter_mut().zip(row_m.iter()) {
            // adding 0.0 turns -0.0 into 0.0
            *val = x.round() + 0.0;
        }
    }
    out
}

/// Largest distance between an entry and its nearest integer, NaN if any entry is not finite.
pub fn max_rounding_deviation(m: &Mat44) -> f64 {
    m.iter().flatten().fold(0.0f64, |acc, &x| {
        if acc.is_nan() || !x.is_finite() {
            f64::NAN
        } else {
            acc.max((x - x.round()).abs())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const B: Mat44 = [
        [627.0, 391.0, 574.0, 1.0],
        [640.0, 355.0, 394.0, 1.0],
        [-630.0, 680.0, 673.0, 1.0],
        [811.0, -701.0, 682.0, 1.0],
    ];

    #[test]
    fn test_matmul44_identity() {
        let mut m = [[0.0; 4]; 4];
        matmul44(&B, &IDENTITY44, &mut m);
        assert_eq!(m, B);
        matmul44(&IDENTITY44, &B, &mut m);
        assert_eq!(m, B);
    }

    #[test]
    fn test_sub_rows4() -> Result<(), LinalgError> {
        let a = [[1.0, 2.0, 3.0, 1.0], [4.0, 5.0, 6.0, 1.0]];
        let b = [[0.5, 2.0, -3.0, 1.0], [4.0, 0.0, 6.0, 1.0]];
        let mut dst = [[0.0; 4]; 2];
        sub_rows4(&a, &b, &mut dst)?;
        assert_eq!(dst, [[0.5, 0.0, 6.0, 0.0], [0.0, 5.0, 0.0, 0.0]]);
        Ok(())
    }

    #[test]
    fn test_det_mat44() {
        assert_eq!(det_mat44(&IDENTITY44), 1.0);
        assert_eq!(det_mat44(&B), 241236072.0);

        let swap_xy = [
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        assert_eq!(det_mat44(&swap_xy), -1.0);
    }

    #[test]
    fn test_inverse_mat44() -> Result<(), LinalgError> {
        let b_inv = inverse_mat44(&B)?;
        let mut m = [[0.0; 4]; 4];
        matmul44(&B, &b_inv, &mut m);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(m[i][j], IDENTITY44[i][j], epsilon = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_inverse_mat44_singular() {
        // four coplanar points (z = 0) make the homogeneous matrix singular
        let coplanar = [
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
        ];
        assert!(matches!(
            inverse_mat44(&coplanar),
            Err(LinalgError::SingularMatrix(_))
        ));
    }

    #[test]
    fn test_inverse_mat44_singular_large_coordinates() {
        // coplanar on x + y + z = 3e9, the f64 determinant is rounding noise
        let coplanar = [
            [1_000_000_000.0, 1_000_000_000.0, 1_000_000_000.0, 1.0],
            [1_000_000_007.0, 999_999_990.0, 1_000_000_003.0, 1.0],
            [999_999_981.0, 1_000_000_013.0, 1_000_000_006.0, 1.0],
            [1_000_000_011.0, 1_000_000_002.0, 999_999_987.0, 1.0],
        ];
        assert!(is_singular44(&coplanar));
        assert!(matches!(
            inverse_mat44(&coplanar),
            Err(LinalgError::SingularMatrix(_))
        ));
    }

    #[test]
    fn test_is_singular44_scale_free() {
        assert!(!is_singular44(&B));
        assert!(!is_singular44(&IDENTITY44));

        let mut scaled = B;
        for row in scaled.iter_mut() {
            for x in row.iter_mut().take(3) {
                *x *= 1e6;
            }
        }
        assert!(!is_singular44(&scaled));
        assert!(inverse_mat44(&scaled).is_ok());
    }

    #[test]
    fn test_round_mat44() {
        let mut m = IDENTITY44;
        m[0][0] = 0.9999999;
        m[1][2] = -0.0000001;
        m[3][0] = -37.9999;
        let rounded = round_mat44(&m);
        assert_eq!(rounded[0][0], 1.0);
        assert_eq!(rounded[3][0], -38.0);
        assert!(rounded[1][2].is_sign_positive());
        assert_relative_eq!(max_rounding_deviation(&m), 1e-4, epsilon = 1e-9);

        m[2][2] = f64::INFINITY;
        assert!(max_rounding_deviation(&m).is_nan());
    }

    #[test]
    fn test_transpose44() {
        let t = transpose44(&B);
        assert_eq!(t[0], [627.0, 640.0, -630.0, 811.0]);
        assert_eq!(transpose44(&t), B);
    }
}
