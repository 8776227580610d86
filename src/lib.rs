pub mod analyzers;
pub mod features;
pub mod loader;
pub mod output;
pub mod trips;
pub mod weekday;
