use serde::Serialize;

/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// Also carries Pearson's correlation coefficient between `x` and `y`.
///
/// # Examples
///
/// ```
/// use engagement_stats::regression::LinearFit;
///
/// let fit = LinearFit::new([(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!((fit.correlation - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson's r. Zero when `y` has no variance.
    pub correlation: f64,
    /// Number of points the fit was computed from.
    pub count: usize,
}

impl LinearFit {
    /// Fits a line through `(x, y)` points, skipping non-finite pairs.
    ///
    /// Returns `None` if fewer than two points remain or all `x` are equal.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect::<Vec<_>>();
        let count = points.len();
        if count < 2 {
            return None;
        }

        let n = count as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, syy, sxy) = points
            .iter()
            .fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (x, y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
            });

        if sxx <= f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let correlation = if syy <= f64::EPSILON {
            0.0
        } else {
            sxy / (sxx.sqrt() * syy.sqrt())
        };

        Some(Self {
            slope,
            intercept,
            correlation,
            count,
        })
    }

    /// Evaluates the fitted line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
