//! Trip aggregation and descriptive analysis.
//!
//! This module groups enriched trips by membership type and weekday or
//! month, computes ride counts, classic-bike shares, and average duration
//! and distance, and logs the descriptive statistics of the trip table.

pub mod aggregate;
pub mod analyzer;
pub mod describe;
pub mod types;
pub mod utility;
