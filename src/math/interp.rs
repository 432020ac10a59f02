//! Piecewise-linear interpolation on the sample grid.

/// Evaluate the polyline through `(xs[k], ys[k])` at every index `0..n`.
///
/// Control points must be sorted by strictly increasing index. Queries before
/// the first control point or after the last hold the nearest control value.
/// A single control point yields a constant curve.
///
/// Returns `None` when there are no control points.
///
/// # Example
///
/// ```
/// use itd_decomposition::math::interp_linear;
///
/// let curve = interp_linear(&[1, 3], &[2.0, 4.0], 5).unwrap();
/// assert_eq!(curve, vec![2.0, 2.0, 3.0, 4.0, 4.0]);
/// ```
#[must_use]
pub fn interp_linear(xs: &[usize], ys: &[f64], n: usize) -> Option<Vec<f64>> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.windows(2).all(|w| w[0] < w[1]));

    let (&first_x, &first_y) = xs.first().zip(ys.first())?;
    let (&last_x, &last_y) = xs.last().zip(ys.last())?;

    let mut out = Vec::with_capacity(n);
    let mut seg = 0;

    for t in 0..n {
        let value = if t <= first_x {
            first_y
        } else if t >= last_x {
            last_y
        } else {
            // Advance to the segment containing t: xs[seg] < t <= xs[seg + 1]
            while xs[seg + 1] < t {
                seg += 1;
            }
            let (x0, x1) = (xs[seg], xs[seg + 1]);
            let (y0, y1) = (ys[seg], ys[seg + 1]);
            let frac = (t - x0) as f64 / (x1 - x0) as f64;
            (1.0 - frac) * y0 + frac * y1
        };
        out.push(value);
    }

    Some(out)
}
