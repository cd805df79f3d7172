pub mod matlab_printer;
pub mod printer_factory;
pub mod sequential_frame_executor;
#[cfg(test)]
mod test_fixtures;
pub mod threaded_frame_executor;
pub mod tsv_participants_printer;
pub mod tsv_printer;
