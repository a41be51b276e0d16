//! Shared utilities for the bundling pipeline.

pub mod fs;
