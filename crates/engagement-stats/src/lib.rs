//! Statistical utilities for player-behavior analysis.
//!
//! This crate provides a collection of statistical tools including:
//!
//! - **Descriptive statistics**: Calculate count, mean, median, variance, standard deviation, etc.
//! - **Percentiles**: Interpolated percentiles and five-number (box plot) summaries
//! - **Binning**: Fixed-edge and equal-width interval binning of numeric columns
//! - **Regression**: Least-squares line fit and Pearson correlation
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and five-number summaries
//! - [`binning`]: Interval binning with inclusive/exclusive edge control
//! - [`regression`]: Linear relationship between two numeric columns
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use engagement_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Binning a numeric column
//!
//! ```
//! use engagement_stats::binning::IntervalBins;
//!
//! let levels = [1.0, 20.0, 45.0, 80.0, 99.0];
//! let bins = IntervalBins::equal_width(levels, 5).unwrap();
//! assert_eq!(bins.assign(1.0), Some(0));
//! assert_eq!(bins.assign(99.0), Some(4));
//! ```
//!
//! ## Fitting a regression line
//!
//! ```
//! use engagement_stats::regression::LinearFit;
//!
//! let fit = LinearFit::new([(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! ```

pub mod binning;
pub mod descriptive;
pub mod percentiles;
pub mod regression;
