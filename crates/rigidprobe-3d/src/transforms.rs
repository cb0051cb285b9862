use rigidprobe_linalg::mat44::{det_mat44, matmul44, transpose44, Mat44, IDENTITY44};

use crate::ProbeError;

/// Where points live relative to a homogeneous transform.
///
/// The two conventions hold the same transform transposed: the translation
/// sits in the last row for row vectors and in the last column for column
/// vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorConvention {
    /// Points are rows and transforms act from the right, `p' = p * T`.
    RowVector,
    /// Points are columns and transforms act from the left, `p' = T * p`.
    ColumnVector,
}

/// Orientation class of a signed axis permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    /// Proper rotations, determinant +1.
    Proper,
    /// Reflections, determinant -1.
    Improper,
    /// Both.
    Any,
}

/// Build a pure translation for the given convention.
///
/// # Arguments
///
/// * `translation` - The translation vector `[dx, dy, dz]`.
/// * `convention` - Where the translation is stored.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::transforms::{translation_matrix, VectorConvention};
///
/// let t = translation_matrix(&[-38.0, -1103.0, 1.0], VectorConvention::RowVector);
/// assert_eq!(t[3], [-38.0, -1103.0, 1.0, 1.0]);
/// ```
pub fn translation_matrix(translation: &[f64; 3], convention: VectorConvention) -> Mat44 {
    let mut m = IDENTITY44;
    match convention {
        VectorConvention::RowVector => {
            m[3][..3].copy_from_slice(translation);
        }
        VectorConvention::ColumnVector => {
            for (row, &d) in m.iter_mut().zip(translation.iter()) {
                row[3] = d;
            }
        }
    }
    m
}

/// Re-express a transform written for one convention in another.
pub fn convert_convention(m: &Mat44, from: VectorConvention, to: VectorConvention) -> Mat44 {
    if from == to {
        *m
    } else {
        transpose44(m)
    }
}

/// Compose two transforms so that `first` is applied before `then`.
///
/// For row vectors this is `first * then`, for column vectors `then * first`.
pub fn compose(first: &Mat44, then: &Mat44, convention: VectorConvention) -> Mat44 {
    let mut m = [[0.0; 4]; 4];
    match convention {
        VectorConvention::RowVector => matmul44(first, then, &mut m),
        VectorConvention::ColumnVector => matmul44(then, first, &mut m),
    }
    m
}

/// Build a signed axis permutation for the row vector convention.
///
/// Output axis `j` takes input axis `axes[j]`, negated when `flips[j]` is set.
///
/// # Arguments
///
/// * `axes` - A permutation of `[0, 1, 2]`.
/// * `flips` - Which output axes are negated.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::transforms::signed_axis_permutation;
///
/// // x' = -x, y' = z, z' = y
/// let r = signed_axis_permutation([0, 2, 1], [true, false, false]).unwrap();
/// assert_eq!(
///     r,
///     [
///         [-1.0, 0.0, 0.0, 0.0],
///         [0.0, 0.0, 1.0, 0.0],
///         [0.0, 1.0, 0.0, 0.0],
///         [0.0, 0.0, 0.0, 1.0],
///     ]
/// );
/// ```
pub fn signed_axis_permutation(axes: [usize; 3], flips: [bool; 3]) -> Result<Mat44, ProbeError> {
    let mut seen = [false; 3];
    for &axis in axes.iter() {
        if axis > 2 || seen[axis] {
            return Err(ProbeError::InvalidAxisPermutation(axes));
        }
        seen[axis] = true;
    }

    let mut m = [[0.0; 4]; 4];
    for (j, (&axis, &flip)) in axes.iter().zip(flips.iter()).enumerate() {
        m[axis][j] = if flip { -1.0 } else { 1.0 };
    }
    m[3][3] = 1.0;

    Ok(m)
}

const AXIS_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Enumerate every signed axis permutation of the requested handedness.
///
/// There are 24 proper rotations and 24 reflections. The identity comes
/// first when it is included.
pub fn signed_axis_permutations(handedness: Handedness) -> Vec<Mat44> {
    let mut out = Vec::with_capacity(48);
    for axes in AXIS_PERMUTATIONS {
        for bits in 0..8u8 {
            let flips = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0];
            let Ok(m) = signed_axis_permutation(axes, flips) else {
                continue;
            };
            let keep = match handedness {
                Handedness::Proper => det_mat44(&m) > 0.0,
                Handedness::Improper => det_mat44(&m) < 0.0,
                Handedness::Any => true,
            };
            if keep {
                out.push(m);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Mat44 = [
        [-1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[test]
    fn test_r_is_involution() {
        let mut m = [[0.0; 4]; 4];
        matmul44(&R, &R, &mut m);
        assert_eq!(m, IDENTITY44);
    }

    #[test]
    fn test_translation_conventions() {
        let d = [-38.0, -1103.0, 1.0];
        let t1 = translation_matrix(&d, VectorConvention::ColumnVector);
        let t2 = translation_matrix(&d, VectorConvention::RowVector);
        assert_eq!(t1[0][3], -38.0);
        assert_eq!(t1[1][3], -1103.0);
        assert_eq!(t1[2][3], 1.0);
        assert_eq!(t1[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            convert_convention(&t1, VectorConvention::ColumnVector, VectorConvention::RowVector),
            t2
        );
        assert_eq!(
            convert_convention(&t2, VectorConvention::RowVector, VectorConvention::RowVector),
            t2
        );
    }

    #[test]
    fn test_compose_conventions_agree() {
        let d = [5.0, -7.0, 11.0];
        let row = compose(
            &R,
            &translation_matrix(&d, VectorConvention::RowVector),
            VectorConvention::RowVector,
        );
        let col = compose(
            &transpose44(&R),
            &translation_matrix(&d, VectorConvention::ColumnVector),
            VectorConvention::ColumnVector,
        );
        assert_eq!(transpose44(&col), row);
        // r leaves the homogeneous row alone, so r * t2 carries d in its last row
        assert_eq!(row[3], [5.0, -7.0, 11.0, 1.0]);
    }

    #[test]
    fn test_signed_axis_permutation_invalid() {
        assert!(matches!(
            signed_axis_permutation([0, 0, 1], [false; 3]),
            Err(ProbeError::InvalidAxisPermutation([0, 0, 1]))
        ));
        assert!(signed_axis_permutation([0, 1, 3], [false; 3]).is_err());
    }

    #[test]
    fn test_signed_axis_permutations_counts() {
        let proper = signed_axis_permutations(Handedness::Proper);
        let improper = signed_axis_permutations(Handedness::Improper);
        let all = signed_axis_permutations(Handedness::Any);
        assert_eq!(proper.len(), 24);
        assert_eq!(improper.len(), 24);
        assert_eq!(all.len(), 48);
        assert_eq!(proper[0], IDENTITY44);
        assert!(proper.contains(&R));
        assert!(improper.iter().all(|m| det_mat44(m) == -1.0));

        // every proper candidate is orthogonal: m * m^T = I
        for m in proper.iter() {
            let mut p = [[0.0; 4]; 4];
            matmul44(m, &transpose44(m), &mut p);
            assert_eq!(p, IDENTITY44);
        }
    }
}
