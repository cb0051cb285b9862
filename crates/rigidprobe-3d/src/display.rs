use std::fmt;

/// Display adapter printing an N x 4 matrix the way numpy does.
///
/// Integral matrices print as right aligned integers, anything else with 8
/// decimals.
///
/// Example:
///
/// ```
/// use rigidprobe_3d::display::MatrixDisplay;
///
/// let m = [[627.0, 391.0, 574.0, 1.0], [-630.0, 680.0, 673.0, 1.0]];
/// assert_eq!(
///     MatrixDisplay(&m).to_string(),
///     "[[ 627  391  574    1]\n [-630  680  673    1]]"
/// );
/// ```
pub struct MatrixDisplay<'a>(pub &'a [[f64; 4]]);

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let integral = self
            .0
            .iter()
            .flatten()
            .all(|x| x.is_finite() && x.fract() == 0.0);

        let cells: Vec<String> = self
            .0
            .iter()
            .flatten()
            .map(|&x| {
                // avoid printing -0
                let x = x + 0.0;
                if integral {
                    format!("{}", x as i64)
                } else {
                    format!("{:.8}", x)
                }
            })
            .collect();

        let width = cells.iter().map(String::len).max().unwrap_or(0);

        write!(f, "[")?;
        for (i, row) in cells.chunks(4).enumerate() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cell, width = width)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_integral() {
        let m = [[-1.0, 0.0, 0.0, 0.0], [-0.0, 0.0, 1.0, 0.0]];
        assert_eq!(
            MatrixDisplay(&m).to_string(),
            "[[-1  0  0  0]\n [ 0  0  1  0]]"
        );
    }

    #[test]
    fn test_display_fractional() {
        let m = [[0.5, -1.0, 0.0, 2.0]];
        assert_eq!(
            MatrixDisplay(&m).to_string(),
            "[[ 0.50000000 -1.00000000  0.00000000  2.00000000]]"
        );
    }
}
