//! Knowledge-base records and query-side tags.

mod chunk;
mod profile;

pub use chunk::Chunk;
pub use profile::{ProfileParseError, RiskProfile};
