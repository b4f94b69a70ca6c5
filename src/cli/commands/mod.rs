pub mod env;
pub mod records;

pub use env::handle_env_command;
pub use records::{RecordCommands, handle_records_command};
