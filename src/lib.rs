pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::runner::{run, run_default, RunReport};
