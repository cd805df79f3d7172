pub mod directory;
pub mod error;
pub mod features;
pub mod ground_truth;
pub mod json_file;
