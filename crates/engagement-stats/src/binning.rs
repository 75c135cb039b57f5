//! Interval binning for data analysis
//!
//! This module partitions a continuous numeric axis into labeled,
//! contiguous intervals so that numeric columns can be aggregated like
//! categorical ones.
//!
//! Two constructions are provided:
//!
//! - **Fixed edges** ([`IntervalBins::new`]): caller-supplied boundaries,
//!   e.g. `[-1, 2, 5, 10, 19]` for player-frequency segments.
//! - **Equal width** ([`IntervalBins::equal_width`]): `n` bins of identical
//!   width spanning the observed range of the data. The lowest edge is moved
//!   down by 0.1% of the range so that the minimum value falls inside the
//!   first right-closed bin.
//!
//! Values outside every interval (or non-finite values) are *unbinnable*:
//! [`IntervalBins::assign`] returns `None` for them and callers exclude the
//! row from the binned view.
//!
//! # Examples
//!
//! ```
//! use engagement_stats::binning::{Closed, IntervalBins};
//!
//! let bins = IntervalBins::new(vec![-1.0, 2.0, 5.0, 10.0, 19.0], Closed::Right).unwrap();
//!
//! assert_eq!(bins.assign(2.0), Some(0));
//! assert_eq!(bins.assign(3.0), Some(1));
//! assert_eq!(bins.assign(11.0), Some(3));
//! assert_eq!(bins.assign(20.0), None);
//! ```

use std::fmt;

use serde::Serialize;

/// Which side of each interval is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Closed {
    /// `[start, end)`
    Left,
    /// `(start, end]`
    Right,
}

/// A single half-open interval of a binning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub closed: Closed,
}

impl Interval {
    /// Returns `true` if `value` falls inside the interval.
    ///
    /// ```
    /// # use engagement_stats::binning::{Closed, Interval};
    /// let interval = Interval { start: 2.0, end: 5.0, closed: Closed::Right };
    /// assert!(!interval.contains(2.0));
    /// assert!(interval.contains(5.0));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        match self.closed {
            Closed::Left => self.start <= value && value < self.end,
            Closed::Right => self.start < value && value <= self.end,
        }
    }

    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.closed {
            Closed::Left => ('[', ')'),
            Closed::Right => ('(', ']'),
        };
        write!(
            f,
            "{open}{}, {}{close}",
            format_edge(self.start),
            format_edge(self.end)
        )
    }
}

/// Formats an edge with at most three decimals and no trailing zeros.
fn format_edge(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// A contiguous sequence of intervals defined by ascending edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalBins {
    edges: Vec<f64>,
    closed: Closed,
}

impl IntervalBins {
    /// Creates bins from explicit edges.
    ///
    /// `n + 1` edges produce `n` bins. Returns `None` if fewer than two edges
    /// are given, any edge is non-finite, or the edges are not strictly
    /// increasing.
    ///
    /// ```
    /// # use engagement_stats::binning::{Closed, IntervalBins};
    /// assert!(IntervalBins::new(vec![0.0, 1.0], Closed::Left).is_some());
    /// assert!(IntervalBins::new(vec![1.0, 1.0], Closed::Left).is_none());
    /// assert!(IntervalBins::new(vec![0.0], Closed::Left).is_none());
    /// ```
    #[must_use]
    pub fn new(edges: Vec<f64>, closed: Closed) -> Option<Self> {
        if edges.len() < 2
            || edges.iter().any(|e| !e.is_finite())
            || !edges.windows(2).all(|w| w[0] < w[1])
        {
            return None;
        }
        Some(Self { edges, closed })
    }

    /// Creates `num_bins` right-closed bins of equal width spanning the
    /// finite values of `values`.
    ///
    /// The first edge is lowered by 0.1% of the data range so that the
    /// minimum value is included. When all values are equal, the range is
    /// widened by 0.1% of the value (or by 0.001 for zero) on both sides.
    ///
    /// Returns `None` if `num_bins` is zero or there is no finite value.
    ///
    /// # Examples
    ///
    /// ```
    /// use engagement_stats::binning::IntervalBins;
    ///
    /// let bins = IntervalBins::equal_width([0.0, 10.0], 5).unwrap();
    /// assert_eq!(bins.len(), 5);
    /// assert_eq!(bins.assign(0.0), Some(0));
    /// assert_eq!(bins.assign(2.0), Some(0));
    /// assert_eq!(bins.assign(2.5), Some(1));
    /// assert_eq!(bins.assign(10.0), Some(4));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn equal_width<I>(values: I, num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if num_bins == 0 {
            return None;
        }

        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        let (start, end) = if (max - min).abs() < f64::EPSILON {
            let adjust = if min == 0.0 { 0.001 } else { min.abs() * 0.001 };
            (min - adjust, max + adjust)
        } else {
            (min, max)
        };

        let width = (end - start) / num_bins as f64;
        let mut edges = (0..num_bins)
            .map(|i| start + width * i as f64)
            .collect::<Vec<_>>();
        edges.push(end);
        if (max - min).abs() >= f64::EPSILON {
            edges[0] -= (max - min) * 0.001;
        }

        Self::new(edges, Closed::Right)
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always `false`: a valid binning has at least one bin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn closed(&self) -> Closed {
        self.closed
    }

    /// Returns the interval of the bin at `index`.
    #[must_use]
    pub fn interval(&self, index: usize) -> Option<Interval> {
        let start = *self.edges.get(index)?;
        let end = *self.edges.get(index + 1)?;
        Some(Interval {
            start,
            end,
            closed: self.closed,
        })
    }

    /// Iterates over all intervals in ascending order.
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.edges.windows(2).map(|w| Interval {
            start: w[0],
            end: w[1],
            closed: self.closed,
        })
    }

    /// Returns the index of the bin containing `value`, or `None` if the
    /// value is non-finite or outside all bins.
    #[must_use]
    pub fn assign(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let idx = match self.closed {
            Closed::Left => self.edges.partition_point(|&e| e <= value),
            Closed::Right => self.edges.partition_point(|&e| e < value),
        };
        (1..self.edges.len()).contains(&idx).then(|| idx - 1)
    }
}
