pub mod constants;
pub mod error;
pub mod person;
pub mod pose;
pub mod position;
pub mod timestamp;
