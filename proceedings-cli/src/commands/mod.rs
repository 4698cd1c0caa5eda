//! CLI command implementations.

pub mod check;
pub mod compile;
pub mod init;
pub mod list;

pub use check::check_project;
pub use compile::run_compiler;
pub use init::{init_project, print_example};
pub use list::list_project;
