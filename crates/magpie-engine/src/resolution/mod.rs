//! Strategy-chain action resolution.
//!
//! Each logical action maps to an ordered list of resolution strategies,
//! tried in priority order with per-attempt isolation: a strategy's success
//! short-circuits the chain, a definitive failure (no match, bounded wait
//! elapsed) moves to the next entry, and only an unexpected failure of the
//! surface itself propagates as a hard error.

mod engine;
mod outcome;
pub mod row;
mod select;

pub use engine::ActionResolver;
pub use outcome::{Attempt, ResolutionOutcome};
