// ---------------------------------------------------------------------------
// Small numeric helpers shared by the views
// ---------------------------------------------------------------------------

/// Bin count of every numerical histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Arithmetic mean, `None` for no values.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean that reports `0.0` instead of nothing.
pub fn mean_or_zero<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    mean(values).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Equal-width histogram
// ---------------------------------------------------------------------------

/// One histogram bin. Covers `[lower, upper)`, except the last bin which
/// also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Split `[min, max]` of `values` into `bins` equal intervals and count.
///
/// When every value is the same the range is widened to `value ± 0.5`, so a
/// non-empty input always yields `bins` bins. Empty input yields none.
pub fn equal_width_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| lo + (hi - lo) * i as f64 / bins as f64)
        .collect();
    edges[bins] = hi;

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = (((v - lo) / width) as usize).min(bins - 1);
        // Correct rounding at the shared edges.
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. `1.0` when every y is identical.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x, y)` pairs. Undefined for fewer than two points
/// or when all x are equal.
pub fn ordinary_least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (sxx, sxy, syy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), &(x, y)| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
    });
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean_or_zero(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_histogram_has_thirty_bins_summing_to_input() {
        let values: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let bins = equal_width_histogram(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        for pair in bins.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn test_histogram_edges_are_closed_open_except_last() {
        // Range 0..30 gives unit-width bins; 1.0 sits on the edge of bin 1.
        let values = [0.0, 1.0, 29.0, 30.0];
        let bins = equal_width_histogram(&values, 30);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[29].count, 2);
        assert_eq!(bins[29].upper, 30.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = equal_width_histogram(&[4.0, 4.0, 4.0], 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(bins[0].lower < 4.0 && bins[29].upper > 4.0);
        assert!(equal_width_histogram(&[], 30).is_empty());
    }

    #[test]
    fn test_ols_recovers_exact_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let fit = ordinary_least_squares(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!((fit.predict(20.0) - 41.0).abs() < 1e-9);
    }

    #[test]
    fn test_ols_undefined_cases() {
        assert!(ordinary_least_squares(&[]).is_none());
        assert!(ordinary_least_squares(&[(1.0, 2.0)]).is_none());
        assert!(ordinary_least_squares(&[(3.0, 1.0), (3.0, 5.0), (3.0, 9.0)]).is_none());
    }
}
