pub mod assignment;
pub mod detector_registry;
pub mod em_optimizer;
pub mod grow_detector;
pub mod non_group_detector;
pub mod one_group_detector;
pub mod shrink2_detector;
pub mod shrink_detector;
