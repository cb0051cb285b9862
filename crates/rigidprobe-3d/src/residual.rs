use rigidprobe_linalg::mat44::sub_rows4;

use crate::{display::MatrixDisplay, points::HomogeneousPoints, ProbeError};

/// Entrywise difference between an expected and an actual point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    rows: Vec<[f64; 4]>,
}

impl Residual {
    /// Compute `expected - actual`.
    ///
    /// Fails with [`ProbeError::LengthMismatch`] when the sets differ in size.
    pub fn between(
        expected: &HomogeneousPoints,
        actual: &HomogeneousPoints,
    ) -> Result<Self, ProbeError> {
        if expected.len() != actual.len() {
            return Err(ProbeError::LengthMismatch(expected.len(), actual.len()));
        }

        let mut rows = vec![[0.0; 4]; expected.len()];
        sub_rows4(expected.rows(), actual.rows(), &mut rows)?;

        Ok(Self { rows })
    }

    /// The N x 4 difference rows.
    pub fn rows(&self) -> &[[f64; 4]] {
        &self.rows
    }

    /// Largest absolute entry, NaN if any entry is NaN.
    pub fn max_abs(&self) -> f64 {
        self.rows.iter().flatten().fold(0.0f64, |acc, &x| {
            if acc.is_nan() || x.is_nan() {
                f64::NAN
            } else {
                acc.max(x.abs())
            }
        })
    }

    /// Whether every entry is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.rows.iter().flatten().all(|&x| x == 0.0)
    }

    /// Whether every entry is within `tolerance` of zero.
    ///
    /// NaN entries never count as near zero.
    pub fn is_near_zero(&self, tolerance: f64) -> bool {
        self.rows.iter().flatten().all(|x| x.abs() <= tolerance)
    }
}

impl std::fmt::Display for Residual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", MatrixDisplay(&self.rows))
    }
}
