//! CLI library components for the FMEA extractor.

pub mod logging;
pub mod render;
