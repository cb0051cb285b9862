use rigidprobe::geometry::{
    display::MatrixDisplay,
    points::build_homogeneous,
    probe::{recover_transform, solve_transform, verify},
    transforms::{compose, signed_axis_permutation, translation_matrix, VectorConvention},
};
use rigidprobe::linalg::mat44::{det_mat44, IDENTITY44};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // beacons seen by the reference scanner
    let a = build_homogeneous(&[
        [-665, -529, 392],
        [-678, -709, 356],
        [592, -430, 681],
        [-849, -421, -700],
    ])?;

    // the same beacons seen by the second scanner
    let b = build_homogeneous(&[
        [627, 391, 574],
        [640, 355, 394],
        [-630, 680, 673],
        [811, -701, 682],
    ])?;

    println!("{}", b);
    println!("{}", verify(&b, &IDENTITY44, &a)?);

    // x' = -x, y' = z, z' = y
    let r = signed_axis_permutation([0, 2, 1], [true, false, false])?;
    log::debug!("det(r) = {}", det_mat44(&r));

    println!("{}", b.transform(&r));
    println!("{}", verify(&b, &r, &a)?);

    let d = [-38.0, -1103.0, 1.0];
    let t2 = translation_matrix(&d, VectorConvention::RowVector);
    let r_t2 = compose(&r, &t2, VectorConvention::RowVector);

    println!("{}", b.transform(&r_t2));

    let b0 = build_homogeneous(&[[627, 391, 574]])?;
    println!("{}", b0.transform(&r_t2));

    println!("{}", MatrixDisplay(&r_t2));

    // a = b * r * t2, so b^-1 * a = r * t2
    let solved = solve_transform(&a, &b)?;
    println!("{}", MatrixDisplay(&solved));

    let recovered = recover_transform(&a, &b)?;
    println!("{}", MatrixDisplay(&recovered));

    println!("{}", b.transform(&recovered));

    let residual = verify(&b, &recovered, &a)?;
    log::info!(
        "recovered transform matches r * t2: {}, residual is zero: {}",
        recovered == r_t2,
        residual.is_zero()
    );

    Ok(())
}
