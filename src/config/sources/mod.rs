//! Config sources, in precedence order from lowest to highest.

pub mod global_file;
pub mod workspace_file;
