pub mod commands;
pub mod config;
pub mod error;
pub mod instance;
pub mod layout;
pub mod process;
pub mod runner;
pub mod session;
pub mod terminal;

#[cfg(test)]
mod tests;

pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use instance::{Instance, InstanceDetails, Monitor};
pub use runner::{CommandRunner, SystemRunner, ToolOutput};
