//! Domain types for player engagement analysis
//!
//! - [`PlayerRecord`]: a single, fully specified player submitted for scoring
//! - [`EngagementLevel`]: the Low/Medium/High engagement category
//! - [`Dataset`]: the read-only behavioral dataset aggregated by the
//!   exploration views

pub use self::{dataset::*, engagement::*, player::*};

pub mod dataset;
pub mod engagement;
pub mod player;
