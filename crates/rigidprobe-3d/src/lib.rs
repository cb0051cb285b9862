#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
pub use error::ProbeError;

/// Point correspondences from shared pairwise distances.
pub mod correspondence;

/// Numpy style formatting of matrices.
pub mod display;

/// Homogeneous point sets.
pub mod points;

/// Transform recovery, verification and candidate search.
pub mod probe;

/// Residuals between point sets.
pub mod residual;

/// Candidate transforms: translations, signed axis permutations and composition.
pub mod transforms;
