//! Core services for scanning, probing, aggregation, and duration formatting

pub mod aggregate;
pub mod format;
pub mod probe;
pub mod scan;
