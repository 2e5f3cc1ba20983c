//! Domain modules — vertical slices with wire types, conversions, and state.

pub mod balance;
pub mod order;
