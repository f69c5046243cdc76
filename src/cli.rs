//! CLI domain: parse, route and output only.
//! No pipeline logic lives here; routes call straight into the library.

mod output;
mod parse;
mod route;

pub use output::{map_error, CliError};
pub use parse::{Cli, Commands};
pub use route::RunContext;
