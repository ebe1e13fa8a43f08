//! CLI command handlers. Each command is in its own file.

mod input;
mod sign;
mod source;
mod status;
mod verify;

pub use sign::run_sign;
pub use source::run_source;
pub use status::run_status;
pub use verify::run_verify;
