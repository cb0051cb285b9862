use std::collections::{HashMap, HashSet};

use crate::{points::HomogeneousPoints, ProbeError};

/// Squared distances from every point to every other point of the set.
///
/// Coordinates are integral, so the distances are exact and can be compared
/// across point sets.
pub fn squared_distances_by_point(points: &HomogeneousPoints) -> Vec<HashSet<i128>> {
    let rows = points.rows();
    let mut dists = vec![HashSet::new(); rows.len()];

    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let d = squared_distance(&rows[i], &rows[j]);
            dists[i].insert(d);
            dists[j].insert(d);
        }
    }

    dists
}

fn squared_distance(p: &[f64; 4], q: &[f64; 4]) -> i128 {
    (0..3)
        .map(|k| {
            let delta = (p[k] - q[k]) as i128;
            delta * delta
        })
        .sum()
}

/// Pair the points of two readings of the same scene.
///
/// Distances are invariant under rigid transforms, so a point of `target`
/// and a point of `source` are paired when they share at least `min_shared`
/// squared distances to the other points of their sets. A point seen by both
/// readings together with `k` other common points shares `k` distances.
///
/// # Arguments
///
/// * `target` - The point set `A`.
/// * `source` - The point set `B`, in any order.
/// * `min_shared` - Minimum number of shared distances, at least 1.
///
/// # Returns
///
/// The `(target index, source index)` pairs sorted by target index. Feed the
/// two index columns to [`HomogeneousPoints::select`] to line the sets up.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::{correspondence::find_correspondences, points::build_homogeneous};
///
/// let a = build_homogeneous(&[[0, 0, 0], [1, 0, 0], [0, 2, 0], [0, 0, 3]]).unwrap();
/// let b = build_homogeneous(&[[0, 0, 3], [0, 0, 0], [2, 0, 0], [0, 1, 0]]).unwrap();
/// let pairs = find_correspondences(&a, &b, 3).unwrap();
/// assert_eq!(pairs, vec![(0, 1), (1, 3), (2, 2), (3, 0)]);
/// ```
pub fn find_correspondences(
    target: &HomogeneousPoints,
    source: &HomogeneousPoints,
    min_shared: usize,
) -> Result<Vec<(usize, usize)>, ProbeError> {
    if target.is_empty() || source.is_empty() {
        return Err(ProbeError::EmptyPointSet);
    }
    if min_shared == 0 {
        return Err(ProbeError::InvalidMinShared);
    }

    let dists_target = squared_distances_by_point(target);
    let dists_source = squared_distances_by_point(source);

    // index source points by distance so only candidates sharing one are compared
    let mut source_by_dist: HashMap<i128, Vec<usize>> = HashMap::new();
    for (j, dists) in dists_source.iter().enumerate() {
        for &d in dists {
            source_by_dist.entry(d).or_default().push(j);
        }
    }

    let mut pairs = Vec::new();
    for (i, dists) in dists_target.iter().enumerate() {
        let mut shared: HashMap<usize, usize> = HashMap::new();
        for d in dists {
            for &j in source_by_dist.get(d).into_iter().flatten() {
                *shared.entry(j).or_default() += 1;
            }
        }

        let mut matched: Vec<usize> = shared
            .into_iter()
            .filter(|&(_, count)| count >= min_shared)
            .map(|(j, _)| j)
            .collect();
        matched.sort_unstable();

        if matched.len() > 1 {
            log::debug!("point {} matches several source points: {:?}", i, matched);
        }

        pairs.extend(matched.into_iter().map(|j| (i, j)));
    }

    log::debug!("found {} correspondences", pairs.len());

    Ok(pairs)
}
