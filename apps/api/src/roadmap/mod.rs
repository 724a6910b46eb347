// Canonical roadmap domain: schema, upstream normalization, progress
// tracking, and the daily assessment state machine.

pub mod assessment;
pub mod handlers;
pub mod normalize;
pub mod progress;
pub mod schema;
