//! CLI library components for the study quality snapshot runner.

pub mod export;
pub mod logging;
