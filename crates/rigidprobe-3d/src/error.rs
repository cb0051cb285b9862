use rigidprobe_linalg::LinalgError;

/// An error type for the transform probe.
#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    /// Error when a point set has no points.
    #[error("Point set must contain at least one point")]
    EmptyPointSet,

    /// Error when a point set cannot be used as a square 4x4 matrix.
    #[error("Point set has {0} points, exactly 4 are required for inversion")]
    NotSquare(usize),

    /// Error when a coordinate cannot be represented exactly.
    #[error("Coordinate {0} is out of the exactly representable range")]
    CoordinateOutOfRange(i64),

    /// Error when a point index is past the end of the set.
    #[error("Point index {0} is out of range for {1} points")]
    IndexOutOfRange(usize, usize),

    /// Error when correspondences are requested with no shared distance.
    #[error("At least one shared distance is required to pair points")]
    InvalidMinShared,

    /// Error when two point sets differ in size.
    #[error("Point set sizes do not match ({0} vs {1})")]
    LengthMismatch(usize, usize),

    /// Error when the axes of a signed permutation are not a permutation of x, y, z.
    #[error("Invalid axis permutation {0:?}")]
    InvalidAxisPermutation([usize; 3]),

    /// Error when the recovered transform is too far from an integral matrix.
    #[error("Recovered transform is not integral (deviation {max_deviation} > tolerance {tolerance})")]
    NonIntegralTransform {
        /// Largest distance between an entry and its nearest integer.
        max_deviation: f64,
        /// Accepted distance.
        tolerance: f64,
    },

    /// Error from the linear algebra backend.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
