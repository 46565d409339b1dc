//! Domain model module declarations.

pub mod deal;
