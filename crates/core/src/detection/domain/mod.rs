pub mod group_detector;
