//! CLI command implementations.

mod extract;
mod models;

pub use extract::cmd_extract;
pub use models::cmd_list_models;
