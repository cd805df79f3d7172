pub mod error;
pub mod evaluate_use_case;
pub mod evaluation_logger;
pub mod evaluation_options;
pub mod evaluation_printer;
pub mod frame_executor;
pub mod infrastructure;
pub mod rotation_modifier;
