pub mod dispatcher;
pub mod main_types;

pub use dispatcher::Dispatcher;
pub use main_types::{Cli, Commands, ConfigCommands};
