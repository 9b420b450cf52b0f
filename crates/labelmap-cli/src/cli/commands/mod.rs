//! CLI command handlers. Each command is in its own file.

mod checksum;
mod completions;
mod generate;
mod list;
mod man;

pub use checksum::run_checksum;
pub use completions::run_completions;
pub use generate::{generate_options, run_generate};
pub use list::run_list;
pub use man::run_man;
