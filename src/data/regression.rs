//! Ordinary least-squares trend line over two numeric series.

use super::error::DataError;

/// A fitted trend line: `y = slope * x + intercept`, with the coefficient
/// of determination and the two segment endpoints at min(x) / max(x).
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    /// `[[x1, y1], [x2, y2]]` – endpoints for drawing the straight segment.
    pub points: [[f64; 2]; 2],
}

/// Fit a least-squares line through `(xs[i], ys[i])`.
///
/// Degenerate inputs (fewer than two points, mismatched lengths, zero
/// variance in x, non-finite values) return
/// [`DataError::DegenerateRegression`] instead of NaN coefficients.
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Regression, DataError> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return Err(DataError::DegenerateRegression);
    }

    let nf = n as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();
    let sum_yy: f64 = ys.iter().map(|y| y * y).sum();

    let denom = nf * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON || !denom.is_finite() {
        // All x identical: no unique line.
        return Err(DataError::DegenerateRegression);
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / nf;

    let y_var = nf * sum_yy - sum_y * sum_y;
    // Constant y: the fit is exact, r² conventionally 1.
    let r2 = if y_var.abs() < f64::EPSILON {
        1.0
    } else {
        let r = (nf * sum_xy - sum_x * sum_y) / (denom * y_var).sqrt();
        r * r
    };

    if !slope.is_finite() || !intercept.is_finite() || !r2.is_finite() {
        return Err(DataError::DegenerateRegression);
    }

    let x1 = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let x2 = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Ok(Regression {
        slope,
        intercept,
        r2,
        points: [[x1, slope * x1 + intercept], [x2, slope * x2 + intercept]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn exact_line_through_origin() {
        // y = 2x on (1,2), (2,4), (3,6)
        let r = fit(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r.slope - 2.0).abs() < EPS);
        assert!(r.intercept.abs() < EPS);
        assert!((r.r2 - 1.0).abs() < EPS);
        assert_eq!(r.points[0][0], 1.0);
        assert_eq!(r.points[1][0], 3.0);
        assert!((r.points[1][1] - 6.0).abs() < EPS);
    }

    #[test]
    fn offset_line() {
        // y = 3x + 2
        let r = fit(&[0.0, 1.0, 2.0], &[2.0, 5.0, 8.0]).unwrap();
        assert!((r.slope - 3.0).abs() < EPS);
        assert!((r.intercept - 2.0).abs() < EPS);
    }

    #[test]
    fn noisy_data_has_r2_below_one() {
        let r = fit(&[1.0, 2.0, 3.0, 4.0], &[2.1, 3.9, 6.2, 7.8]).unwrap();
        assert!(r.r2 > 0.9 && r.r2 < 1.0);
    }

    #[test]
    fn degenerate_inputs_are_reported() {
        assert_eq!(fit(&[1.0], &[2.0]), Err(DataError::DegenerateRegression));
        assert_eq!(fit(&[], &[]), Err(DataError::DegenerateRegression));
        // Zero variance in x.
        assert_eq!(
            fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(DataError::DegenerateRegression)
        );
        // Length mismatch.
        assert_eq!(
            fit(&[1.0, 2.0], &[1.0]),
            Err(DataError::DegenerateRegression)
        );
    }
}
