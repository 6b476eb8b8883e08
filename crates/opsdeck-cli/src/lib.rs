//! OpsDeck CLI
//!
//! Command-line front end for the OpsDeck dashboard core. Each subcommand
//! resolves its flags against [`opsdeck_config::DashboardConfig`] and drives
//! one of the library crates:
//!
//! - `audit list|export|print`: [`opsdeck_audit`] pipeline over a log source
//! - `analytics`: [`opsdeck_analytics`] series and rollups
//! - `users list|add|remove`: [`opsdeck_users`] directory over a JSON store
//! - `config show|init`: [`opsdeck_config`] manager

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
