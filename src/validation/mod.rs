pub mod invariants;
pub mod same_language;
