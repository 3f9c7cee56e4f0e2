//! Numerical optimization
//!
//! Univariate line search used for lambda estimation.

pub mod brent;

pub use brent::{bracket, brent_minimize, Bracket, BracketPoints, BrentConfig, LineSearchResult};
