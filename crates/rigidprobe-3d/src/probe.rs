use rigidprobe_linalg::mat44::{
    inverse_mat44, matmul44, max_rounding_deviation, round_mat44, vecmat4, Mat44,
};

use crate::{
    points::HomogeneousPoints,
    residual::Residual,
    transforms::{compose, translation_matrix, VectorConvention},
    ProbeError,
};

/// Solve `target = source * T` for `T` by inverting `source`, without rounding.
///
/// Both sets must hold exactly 4 affinely independent points.
///
/// # Arguments
///
/// * `target` - The point set `A`.
/// * `source` - The point set `B`.
///
/// # Returns
///
/// The raw transform `B^-1 * A`.
pub fn solve_transform(
    target: &HomogeneousPoints,
    source: &HomogeneousPoints,
) -> Result<Mat44, ProbeError> {
    if target.len() != source.len() {
        return Err(ProbeError::LengthMismatch(target.len(), source.len()));
    }

    let a_mat = target.to_mat44()?;
    let b_mat = source.to_mat44()?;

    let b_inv = inverse_mat44(&b_mat)?;

    let mut transform = [[0.0; 4]; 4];
    matmul44(&b_inv, &a_mat, &mut transform);

    log::debug!(
        "solved transform, max rounding deviation: {:e}",
        max_rounding_deviation(&transform)
    );

    Ok(transform)
}

/// Recover the integral transform `T` with `target ≈ source * T`.
///
/// Computes `round(B^-1 * A)` entrywise. The rounding is unconditional: a
/// wrong point correspondence still yields some integral matrix. Use
/// [`recover_transform_checked`] to reject non-integral solutions.
///
/// # Arguments
///
/// * `target` - The point set `A`, 4 points.
/// * `source` - The point set `B`, 4 affinely independent points.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::{points::build_homogeneous, probe::recover_transform};
///
/// let b = build_homogeneous(&[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]).unwrap();
/// let a = build_homogeneous(&[[5, 6, 7], [6, 6, 7], [5, 7, 7], [5, 6, 8]]).unwrap();
/// let t = recover_transform(&a, &b).unwrap();
/// assert_eq!(t[3], [5.0, 6.0, 7.0, 1.0]);
/// ```
pub fn recover_transform(
    target: &HomogeneousPoints,
    source: &HomogeneousPoints,
) -> Result<Mat44, ProbeError> {
    let transform = solve_transform(target, source)?;
    Ok(round_mat44(&transform))
}

/// Like [`recover_transform`], but fails when the solved transform is not integral.
///
/// # Arguments
///
/// * `target` - The point set `A`, 4 points.
/// * `source` - The point set `B`, 4 affinely independent points.
/// * `tolerance` - Largest accepted distance between an entry of `B^-1 * A`
///   and its nearest integer.
pub fn recover_transform_checked(
    target: &HomogeneousPoints,
    source: &HomogeneousPoints,
    tolerance: f64,
) -> Result<Mat44, ProbeError> {
    let transform = solve_transform(target, source)?;

    let max_deviation = max_rounding_deviation(&transform);
    // NaN deviations fail the check too
    if !(max_deviation <= tolerance) {
        log::warn!(
            "recovered transform is not integral: {} > {}",
            max_deviation,
            tolerance
        );
        return Err(ProbeError::NonIntegralTransform {
            max_deviation,
            tolerance,
        });
    }

    Ok(round_mat44(&transform))
}

/// Compute the residual `target - source * transform`.
///
/// An all zero residual confirms the transform hypothesis.
pub fn verify(
    source: &HomogeneousPoints,
    transform: &Mat44,
    target: &HomogeneousPoints,
) -> Result<Residual, ProbeError> {
    Residual::between(target, &source.transform(transform))
}

/// A candidate that maps the source set exactly onto the target set.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMatch {
    /// Position of the matching candidate in the searched slice.
    pub index: usize,
    /// The linear candidate itself.
    pub linear: Mat44,
    /// Translation applied after the linear part.
    pub translation: [f64; 3],
    /// The full row vector transform, `linear * translation`.
    pub transform: Mat44,
}

/// Try linear candidates in order until one explains the point sets.
///
/// For each candidate `R` the translation is fixed by the first point pair,
/// `d = a_0 - b_0 * R`, and the hypothesis `R * t(d)` is accepted when its
/// residual is exactly zero. Any number of points is accepted since no
/// inversion takes place.
///
/// # Arguments
///
/// * `target` - The point set `A`.
/// * `source` - The point set `B`, in the same point order as `A`.
/// * `candidates` - Linear transforms for the row vector convention.
///
/// # Returns
///
/// The first matching candidate, or `None` when no candidate fits.
pub fn search_candidates(
    target: &HomogeneousPoints,
    source: &HomogeneousPoints,
    candidates: &[Mat44],
) -> Result<Option<CandidateMatch>, ProbeError> {
    if target.len() != source.len() {
        return Err(ProbeError::LengthMismatch(target.len(), source.len()));
    }

    let (Some(a0), Some(b0)) = (target.row(0), source.row(0)) else {
        return Err(ProbeError::EmptyPointSet);
    };

    for (index, linear) in candidates.iter().enumerate() {
        let moved = vecmat4(b0, linear);
        let translation = [a0[0] - moved[0], a0[1] - moved[1], a0[2] - moved[2]];

        let transform = compose(
            linear,
            &translation_matrix(&translation, VectorConvention::RowVector),
            VectorConvention::RowVector,
        );

        let residual = verify(source, &transform, target)?;
        log::debug!(
            "candidate {}: translation {:?}, max residual {}",
            index,
            translation,
            residual.max_abs()
        );

        if residual.is_zero() {
            return Ok(Some(CandidateMatch {
                index,
                linear: *linear,
                translation,
                transform,
            }));
        }
    }

    Ok(None)
}
