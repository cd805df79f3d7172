pub mod config;
pub mod dataset;
pub mod detection;
pub mod evaluation;
pub mod grouping;
pub mod shared;
