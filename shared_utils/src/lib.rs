//! Small pieces shared by every crate in the workspace: environment lookups,
//! the application configuration, and logging bootstrap.

pub mod config;
pub mod env;
pub mod logging;
