/// `cos` of the angle above which another person no longer occludes.
pub const VISIBILITY_ANGLE_THRESHOLD: f64 = 0.75;

/// Base `K` of the occlusion penalty `K^(cos * d_self / d_other)`.
pub const VISIBILITY_COST_BASE: f64 = 100.0;

/// Upper bound of a single occlusion penalty (reached as `d_other -> 0`).
pub const VISIBILITY_COST_CEILING: f64 = 10_000_000.0;

/// Default group-intersection threshold for a true positive.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 2.0 / 3.0;

/// Iteration cap of the pairwise center refinement.
pub const MAX_CENTER_ITERATIONS: usize = 1000;

/// Iteration cap of the E/M refinement for a fixed group count.
pub const MAX_REFINE_ITERATIONS: usize = 1000;

/// Iteration cap of the grow/shrink loops.
pub const MAX_OUTER_ITERATIONS: usize = 10_000;

/// Frames between two progress reports of the evaluation.
pub const PROGRESS_INTERVAL: usize = 100;

pub const FEATURES_FILE_NAME: &str = "features.json";
pub const GROUND_TRUTH_FILE_NAME: &str = "groundtruth.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
