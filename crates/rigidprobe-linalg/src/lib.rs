#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
pub use error::LinalgError;

/// Operations on 4x4 homogeneous matrices and row-major point blocks.
pub mod mat44;
