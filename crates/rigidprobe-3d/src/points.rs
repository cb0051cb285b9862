use rigidprobe_linalg::mat44::{vecmat4, Mat44};

use crate::{display::MatrixDisplay, ProbeError};

/// An ordered set of 3D points in homogeneous coordinates.
///
/// Each point is stored as a row `[x, y, z, 1]`, so the set reads as an
/// N x 4 matrix acted on by transforms from the right.
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousPoints {
    rows: Vec<[f64; 4]>,
}

impl HomogeneousPoints {
    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no points. Always false for sets built with [`build_homogeneous`].
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The N x 4 rows of the set.
    pub fn rows(&self) -> &[[f64; 4]] {
        &self.rows
    }

    /// A single homogeneous row.
    pub fn row(&self, index: usize) -> Option<&[f64; 4]> {
        self.rows.get(index)
    }

    /// Pick rows by index, in the given order.
    ///
    /// Fails with [`ProbeError::IndexOutOfRange`] for an index past the end.
    pub fn select(&self, indices: &[usize]) -> Result<HomogeneousPoints, ProbeError> {
        let rows = indices
            .iter()
            .map(|&i| {
                self.rows
                    .get(i)
                    .copied()
                    .ok_or(ProbeError::IndexOutOfRange(i, self.rows.len()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(ProbeError::EmptyPointSet);
        }

        Ok(HomogeneousPoints { rows })
    }

    /// View a 4 point set as a square matrix.
    ///
    /// Fails with [`ProbeError::NotSquare`] for any other number of points.
    pub fn to_mat44(&self) -> Result<Mat44, ProbeError> {
        match <[[f64; 4]; 4]>::try_from(self.rows.as_slice()) {
            Ok(mat) => Ok(mat),
            Err(_) => Err(ProbeError::NotSquare(self.rows.len())),
        }
    }

    /// Apply a transform under the row vector convention, returning `self * transform`.
    pub fn transform(&self, transform: &Mat44) -> HomogeneousPoints {
        HomogeneousPoints {
            rows: self.rows.iter().map(|p| vecmat4(p, transform)).collect(),
        }
    }
}

impl std::fmt::Display for HomogeneousPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", MatrixDisplay(&self.rows))
    }
}

/// Largest coordinate magnitude accepted by [`build_homogeneous`].
///
/// Coordinates and their pairwise differences stay exactly representable as `f64`.
pub const MAX_COORDINATE_MAGNITUDE: i64 = 1 << 52;

/// Build a homogeneous point set from integer 3D coordinates.
///
/// Appends a trailing 1 to every point and keeps the points in order.
/// Coordinates beyond [`MAX_COORDINATE_MAGNITUDE`] are rejected with
/// [`ProbeError::CoordinateOutOfRange`].
///
/// # Arguments
///
/// * `points` - The 3D points, at least one.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::points::build_homogeneous;
///
/// let points = build_homogeneous(&[[627, 391, 574], [640, 355, 394]]).unwrap();
/// assert_eq!(points.rows(), &[[627.0, 391.0, 574.0, 1.0], [640.0, 355.0, 394.0, 1.0]]);
/// ```
pub fn build_homogeneous(points: &[[i64; 3]]) -> Result<HomogeneousPoints, ProbeError> {
    if points.is_empty() {
        return Err(ProbeError::EmptyPointSet);
    }

    if let Some(&x) = points
        .iter()
        .flatten()
        .find(|x| x.unsigned_abs() > MAX_COORDINATE_MAGNITUDE as u64)
    {
        return Err(ProbeError::CoordinateOutOfRange(x));
    }

    let rows = points
        .iter()
        .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64, 1.0])
        .collect();

    Ok(HomogeneousPoints { rows })
}
