/// An error type for the linalg module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LinalgError {
    /// Error when the matrix to invert is singular.
    #[error("Singular matrix (det = {0})")]
    SingularMatrix(f64),

    /// Error when the inverse contains non finite values.
    #[error("Inverse contains non finite values")]
    NonFiniteInverse,

    /// Error when two row blocks differ in length.
    #[error("Row count ({0}) does not match the destination row count ({1})")]
    DimensionMismatch(usize, usize),
}
