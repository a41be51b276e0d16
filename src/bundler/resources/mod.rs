//! Bundle resource handling.

pub mod icons;
